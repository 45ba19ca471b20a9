//! Durable key-value storage seam.
//!
//! The extension backs this with `chrome.storage.local`; tests and previews
//! use [`MemoryStorage`].

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;

/// Asynchronous key-value storage shared by every extension context.
///
/// Writes overwrite whole values; there is no compare-and-swap.
#[async_trait(?Send)]
pub trait KeyValueStorage {
	/// Returns the stored values for `keys`. Missing keys are absent from the map.
	async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>>;

	/// Writes every entry of `items`.
	async fn set(&self, items: Map<String, Value>) -> Result<()>;

	/// Deletes `keys`. Missing keys are ignored.
	async fn remove(&self, keys: &[&str]) -> Result<()>;
}

/// In-process storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
	items: RefCell<HashMap<String, Value>>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates storage pre-populated with `items`.
	pub fn with_items<I, K>(items: I) -> Self
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		Self {
			items: RefCell::new(items.into_iter().map(|(k, v)| (k.into(), v)).collect()),
		}
	}

	/// Returns a copy of the value stored under `key`.
	pub fn snapshot(&self, key: &str) -> Option<Value> {
		self.items.borrow().get(key).cloned()
	}
}

#[async_trait(?Send)]
impl KeyValueStorage for MemoryStorage {
	async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
		let items = self.items.borrow();
		Ok(keys
			.iter()
			.filter_map(|k| items.get(*k).map(|v| (k.to_string(), v.clone())))
			.collect())
	}

	async fn set(&self, items: Map<String, Value>) -> Result<()> {
		self.items.borrow_mut().extend(items);
		Ok(())
	}

	async fn remove(&self, keys: &[&str]) -> Result<()> {
		let mut items = self.items.borrow_mut();
		for key in keys {
			items.remove(*key);
		}
		Ok(())
	}
}

#[async_trait(?Send)]
impl<T: KeyValueStorage + ?Sized> KeyValueStorage for std::rc::Rc<T> {
	async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
		(**self).get(keys).await
	}

	async fn set(&self, items: Map<String, Value>) -> Result<()> {
		(**self).set(items).await
	}

	async fn remove(&self, keys: &[&str]) -> Result<()> {
		(**self).remove(keys).await
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[tokio::test]
	async fn get_returns_only_present_keys() {
		let storage = MemoryStorage::with_items([("a", json!(1))]);
		let got = storage.get(&["a", "b"]).await.unwrap();
		assert_eq!(got.len(), 1);
		assert_eq!(got["a"], json!(1));
	}

	#[tokio::test]
	async fn set_overwrites_and_remove_deletes() {
		let storage = MemoryStorage::new();
		let mut items = Map::new();
		items.insert("k".into(), json!("first"));
		storage.set(items.clone()).await.unwrap();
		items.insert("k".into(), json!("second"));
		storage.set(items).await.unwrap();
		assert_eq!(storage.snapshot("k"), Some(json!("second")));

		storage.remove(&["k", "missing"]).await.unwrap();
		assert_eq!(storage.snapshot("k"), None);
	}
}
