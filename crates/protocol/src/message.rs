//! Runtime messages exchanged between extension contexts.
//!
//! Every message is a small record tagged by its `action` field:
//!
//! 1. A hosted page reports navigation with [`Message::SessionUrlUpdate`]
//! 2. The side panel (or background) asks a hosted page to insert text with
//!    [`Message::InjectText`]
//!
//! Delivery is best-effort. Receivers decode with [`Message::decode`], which
//! drops anything malformed instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message sent over `chrome.runtime` / `chrome.tabs` messaging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
	/// A hosted page navigated (or was first loaded) to `url`.
	SessionUrlUpdate {
		/// Full URL of the hosted page, as reported by `location.href`.
		url: String,
	},
	/// Insert literal `text` into the hosted page's primary input control.
	InjectText {
		/// Text to insert, unmodified.
		text: String,
	},
}

impl Message {
	/// Builds a navigation report.
	pub fn session_url_update(url: impl Into<String>) -> Self {
		Self::SessionUrlUpdate { url: url.into() }
	}

	/// Builds a text injection request.
	pub fn inject_text(text: impl Into<String>) -> Self {
		Self::InjectText { text: text.into() }
	}

	/// Returns the `action` tag as it appears on the wire.
	pub fn action(&self) -> &'static str {
		match self {
			Self::SessionUrlUpdate { .. } => "SESSION_URL_UPDATE",
			Self::InjectText { .. } => "INJECT_TEXT",
		}
	}

	/// Decodes a received value, returning [`None`] for unknown actions,
	/// missing fields, and empty payloads.
	pub fn decode(value: &Value) -> Option<Self> {
		let message = Self::deserialize(value).ok()?;
		let empty = match &message {
			Self::SessionUrlUpdate { url } => url.is_empty(),
			Self::InjectText { text } => text.is_empty(),
		};
		(!empty).then_some(message)
	}
}
