//! `JsValue` <-> serde conversions.

use serde::Serialize;
use wasm_bindgen::JsValue;

/// Converts to a plain JS object (not an ES `Map`), as extension APIs expect.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
	value
		.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
		.map_err(JsValue::from)
}

pub fn to_json(value: JsValue) -> Result<serde_json::Value, JsValue> {
	if value.is_undefined() {
		return Ok(serde_json::Value::Null);
	}
	serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

pub fn stringify_js_error(err: JsValue) -> String {
	err.as_string()
		.or_else(|| js_sys::JSON::stringify(&err).ok()?.as_string())
		.unwrap_or_else(|| format!("{:?}", err))
}
