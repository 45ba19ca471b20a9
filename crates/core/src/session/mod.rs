//! Per-provider session state and its persistence.
//!
//! * [`SessionState`]: the in-memory record owned by the panel
//! * [`SessionStore`]: load/save and the mutation rules
//! * [`sync`]: classification of navigation reports from hosted pages

use std::collections::BTreeMap;

use omnipanel_protocol::PersistedState;
use serde_json::Value;

use crate::provider::{DEFAULT_PROVIDER, Provider};
use crate::zoom::ZoomLevel;

pub mod store;
pub mod sync;

#[cfg(test)]
mod tests;

pub use store::{AUTH_URL_PATTERNS, NavigationRecord, SessionChange, SessionStore, is_auth_url};
pub use sync::{Classified, classify};

/// Session record: remembered URLs, active provider, and zoom.
///
/// Field types carry the record's invariants: session keys and the active
/// provider are always registered providers, and the zoom is always in range.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
	/// Last non-default, non-auth URL per provider.
	pub sessions: BTreeMap<Provider, String>,
	/// Provider that is (or was last) shown in the panel.
	pub last_provider: Provider,
	pub zoom: ZoomLevel,
}

impl Default for SessionState {
	fn default() -> Self {
		Self {
			sessions: BTreeMap::new(),
			last_provider: DEFAULT_PROVIDER,
			zoom: ZoomLevel::default(),
		}
	}
}

impl SessionState {
	/// Returns the remembered session URL for `provider`.
	pub fn session(&self, provider: Provider) -> Option<&str> {
		self.sessions.get(&provider).map(String::as_str)
	}

	/// URL to load for `provider`: its session if any, else its default URL.
	pub fn target_url(&self, provider: Provider) -> &str {
		self.session(provider).unwrap_or_else(|| provider.default_url())
	}

	/// Builds a validated state from a stored record, dropping unknown
	/// providers and falling back to defaults for missing fields.
	pub fn from_persisted(persisted: &PersistedState) -> Self {
		let sessions = persisted
			.string_sessions()
			.filter_map(|(name, url)| Some((Provider::from_name(name)?, url.to_string())))
			.collect();
		let last_provider = persisted
			.last_provider
			.as_deref()
			.and_then(Provider::from_name)
			.unwrap_or(DEFAULT_PROVIDER);
		let zoom = persisted.zoom_level.map(ZoomLevel::new).unwrap_or_default();

		Self {
			sessions,
			last_provider,
			zoom,
		}
	}

	pub fn to_persisted(&self) -> PersistedState {
		PersistedState {
			sessions: self
				.sessions
				.iter()
				.map(|(p, url)| (p.name().to_string(), Value::String(url.clone())))
				.collect(),
			last_provider: Some(self.last_provider.name().to_string()),
			zoom_level: Some(self.zoom.get()),
		}
	}
}
