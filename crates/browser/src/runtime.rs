//! Best-effort `chrome.runtime` / `chrome.tabs` messaging.
//!
//! Sends never fail from the caller's point of view. A missing receiver or an
//! invalidated extension context is logged at `trace` and dropped.

use omnipanel::notifier::MessageSender;
use omnipanel::{Error, Result};
use omnipanel::protocol::Message;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::chrome;
use crate::js::{stringify_js_error, to_js, to_json};

/// Sends to every extension page (side panel, background) via `chrome.runtime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeSender;

impl MessageSender for RuntimeSender {
	fn send(&self, message: &Message) {
		let Ok(value) = to_js(message) else {
			return;
		};
		match chrome::runtime_send_message(&value) {
			Ok(promise) => swallow(promise, message.action()),
			Err(err) => tracing::trace!(error = %stringify_js_error(err), "runtime send failed"),
		}
	}
}

/// Sends `message` to the content scripts of one tab.
pub fn send_to_tab(tab_id: i32, message: &Message) {
	let Ok(value) = to_js(message) else {
		return;
	};
	match chrome::tabs_send_message(tab_id, &value) {
		Ok(promise) => swallow(promise, message.action()),
		Err(err) => tracing::trace!(tab_id, error = %stringify_js_error(err), "tab send failed"),
	}
}

fn swallow(promise: js_sys::Promise, action: &'static str) {
	wasm_bindgen_futures::spawn_local(async move {
		if let Err(err) = JsFuture::from(promise).await {
			tracing::trace!(action, error = %stringify_js_error(err), "message not delivered");
		}
	});
}

/// Registers `handler` for decoded runtime messages. Malformed messages never
/// reach the handler.
pub fn on_message<F>(mut handler: F)
where
	F: FnMut(Message) + 'static,
{
	let listener = Closure::<dyn FnMut(JsValue, JsValue, JsValue)>::new(
		move |message: JsValue, _sender: JsValue, _respond: JsValue| {
			let Ok(value) = to_json(message) else {
				return;
			};
			if let Some(message) = Message::decode(&value) {
				handler(message);
			}
		},
	);
	chrome::runtime_on_message_add_listener(&listener);
	listener.forget();
}

/// Ids of all open tabs.
pub async fn all_tab_ids() -> Result<Vec<i32>> {
	let transport = |err: JsValue| Error::Transport(stringify_js_error(err));
	let query = to_js(&serde_json::json!({})).map_err(transport)?;
	let tabs = JsFuture::from(chrome::tabs_query(&query)).await.map_err(transport)?;
	let tabs = js_sys::Array::from(&tabs);
	Ok(tabs
		.iter()
		.filter_map(|tab| {
			let tab = tab.dyn_into::<js_sys::Object>().ok()?;
			js_sys::Reflect::get(&tab, &JsValue::from_str("id"))
				.ok()?
				.as_f64()
				.map(|id| id as i32)
		})
		.collect())
}
