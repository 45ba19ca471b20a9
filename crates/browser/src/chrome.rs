//! Raw `chrome.*` extension API bindings.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
	#[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = get, catch)]
	pub fn storage_local_get(keys: &JsValue) -> Result<js_sys::Promise, JsValue>;

	#[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = set, catch)]
	pub fn storage_local_set(items: &JsValue) -> Result<js_sys::Promise, JsValue>;

	#[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = remove, catch)]
	pub fn storage_local_remove(keys: &JsValue) -> Result<js_sys::Promise, JsValue>;

	#[wasm_bindgen(js_namespace = ["chrome", "runtime"], js_name = sendMessage, catch)]
	pub fn runtime_send_message(message: &JsValue) -> Result<js_sys::Promise, JsValue>;

	#[wasm_bindgen(js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
	pub fn runtime_on_message_add_listener(cb: &Closure<dyn FnMut(JsValue, JsValue, JsValue)>);

	#[wasm_bindgen(js_namespace = ["chrome", "runtime", "onInstalled"], js_name = addListener)]
	pub fn runtime_on_installed_add_listener(cb: &Closure<dyn FnMut(JsValue)>);

	#[wasm_bindgen(js_namespace = ["chrome", "tabs"], js_name = query)]
	pub fn tabs_query(query: &JsValue) -> js_sys::Promise;

	#[wasm_bindgen(js_namespace = ["chrome", "tabs"], js_name = sendMessage, catch)]
	pub fn tabs_send_message(tab_id: i32, message: &JsValue) -> Result<js_sys::Promise, JsValue>;

	#[wasm_bindgen(js_namespace = ["chrome", "sidePanel"], js_name = setPanelBehavior)]
	pub fn side_panel_set_panel_behavior(behavior: &JsValue) -> js_sys::Promise;
}
