//! Persisted record layout in `chrome.storage.local`.
//!
//! The record is stored as loosely as possible: provider names are plain
//! strings and every field is optional, so that a record written by an older
//! or newer build always deserializes. Validation against the provider table
//! happens in the core crate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Storage key of the current session record.
pub const STATE_KEY: &str = "omniState_v2";

/// Storage key of optional panel configuration overrides.
pub const CONFIG_KEY: &str = "omniConfig";

/// Zoom level written by builds that kept zoom outside the session record.
pub const LEGACY_ZOOM_KEY: &str = "omniZoomLevel";

/// Keys of earlier record generations, removed on load.
pub const LEGACY_KEYS: &[&str] = &["omniSessionState", "lastAiUrl", LEGACY_ZOOM_KEY];

/// Session record as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
	/// Provider name to last session URL. Values that are not strings are ignored on load.
	#[serde(default)]
	pub sessions: BTreeMap<String, Value>,
	/// Provider that was active when the panel was last used.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_provider: Option<String>,
	/// Panel zoom factor.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub zoom_level: Option<f64>,
}

impl PersistedState {
	/// Parses a stored value, treating anything unreadable as an empty record.
	pub fn from_stored(value: Option<&Value>) -> Self {
		value
			.and_then(|v| Self::deserialize(v).ok())
			.unwrap_or_default()
	}

	/// Iterates session entries whose URL is a string.
	pub fn string_sessions(&self) -> impl Iterator<Item = (&str, &str)> {
		self.sessions
			.iter()
			.filter_map(|(name, url)| Some((name.as_str(), url.as_str()?)))
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn serializes_camel_case() {
		let state = PersistedState {
			sessions: BTreeMap::from([("Claude".to_string(), json!("https://claude.ai/chat/1"))]),
			last_provider: Some("Claude".into()),
			zoom_level: Some(1.1),
		};
		let json = serde_json::to_value(&state).unwrap();
		assert_eq!(
			json,
			json!({
				"sessions": {"Claude": "https://claude.ai/chat/1"},
				"lastProvider": "Claude",
				"zoomLevel": 1.1,
			})
		);
	}

	#[test]
	fn missing_fields_default() {
		let state = PersistedState::from_stored(Some(&json!({})));
		assert!(state.sessions.is_empty());
		assert_eq!(state.last_provider, None);
		assert_eq!(state.zoom_level, None);
	}

	#[test]
	fn unreadable_record_is_empty() {
		assert_eq!(PersistedState::from_stored(Some(&json!("garbage"))), PersistedState::default());
		assert_eq!(PersistedState::from_stored(Some(&json!({"zoomLevel": "big"}))), PersistedState::default());
		assert_eq!(PersistedState::from_stored(None), PersistedState::default());
	}

	#[test]
	fn string_sessions_skips_non_strings() {
		let state = PersistedState::from_stored(Some(&json!({
			"sessions": {"Gemini": "https://gemini.google.com/app/1", "Grok": 12, "Claude": null},
		})));
		let entries: Vec<_> = state.string_sessions().collect();
		assert_eq!(entries, vec![("Gemini", "https://gemini.google.com/app/1")]);
	}
}
