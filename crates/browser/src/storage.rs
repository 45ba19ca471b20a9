//! [`KeyValueStorage`] over `chrome.storage.local`.

use async_trait::async_trait;
use omnipanel::{Error, KeyValueStorage, Result};
use serde_json::{Map, Value};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::chrome;
use crate::js::{stringify_js_error, to_js, to_json};

#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeStorage;

fn storage_err(err: JsValue) -> Error {
	Error::Storage(stringify_js_error(err))
}

#[async_trait(?Send)]
impl KeyValueStorage for ChromeStorage {
	async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
		let keys = to_js(keys).map_err(storage_err)?;
		let promise = chrome::storage_local_get(&keys).map_err(storage_err)?;
		let items = JsFuture::from(promise).await.map_err(storage_err)?;
		match to_json(items).map_err(storage_err)? {
			Value::Object(map) => Ok(map),
			_ => Ok(Map::new()),
		}
	}

	async fn set(&self, items: Map<String, Value>) -> Result<()> {
		let items = to_js(&items).map_err(storage_err)?;
		let promise = chrome::storage_local_set(&items).map_err(storage_err)?;
		JsFuture::from(promise).await.map_err(storage_err)?;
		Ok(())
	}

	async fn remove(&self, keys: &[&str]) -> Result<()> {
		let keys = to_js(keys).map_err(storage_err)?;
		let promise = chrome::storage_local_remove(&keys).map_err(storage_err)?;
		JsFuture::from(promise).await.map_err(storage_err)?;
		Ok(())
	}
}
