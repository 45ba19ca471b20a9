//! Persistence and mutation rules for [`SessionState`].

use omnipanel_protocol::{LEGACY_KEYS, LEGACY_ZOOM_KEY, PersistedState, STATE_KEY};
use serde_json::Map;
use tracing::{debug, warn};

use super::SessionState;
use crate::error::Result;
use crate::provider::Provider;
use crate::storage::KeyValueStorage;
use crate::zoom::ZoomLevel;

/// URL fragments marking login and identity-provider detours.
pub const AUTH_URL_PATTERNS: &[&str] = &["accounts.google.com", "/signin", "/login", "/auth"];

/// Returns true if `url` contains any [`AUTH_URL_PATTERNS`] entry.
pub fn is_auth_url(url: &str) -> bool {
	AUTH_URL_PATTERNS.iter().any(|pattern| url.contains(pattern))
}

/// Effect of a recorded navigation on the provider's session entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
	/// The URL became the provider's session.
	Stored(String),
	/// The URL was a default or auth page and the session was dropped.
	Cleared,
}

/// Outcome of [`SessionStore::record_navigation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRecord {
	pub provider: Provider,
	pub change: SessionChange,
	/// Whether the state was flushed to storage.
	pub persisted: bool,
}

/// Reads and writes the session record under [`STATE_KEY`].
///
/// The store holds no state of its own; callers own the [`SessionState`] and
/// pass it in. Every save is a full-record overwrite (last writer wins).
#[derive(Debug)]
pub struct SessionStore<S> {
	storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
	pub fn new(storage: S) -> Self {
		Self { storage }
	}

	pub fn storage(&self) -> &S {
		&self.storage
	}

	/// Loads the stored record merged over defaults.
	///
	/// Zoom written by older builds under [`LEGACY_ZOOM_KEY`] is adopted when
	/// the record has none, and legacy keys are cleared once migrated. Only a
	/// failed read is an error; a failed migration is logged.
	pub async fn load(&self) -> Result<SessionState> {
		let mut keys = vec![STATE_KEY];
		keys.extend_from_slice(LEGACY_KEYS);
		let stored = self.storage.get(&keys).await?;

		let persisted = PersistedState::from_stored(stored.get(STATE_KEY));
		let mut state = SessionState::from_persisted(&persisted);

		if persisted.zoom_level.is_none() {
			if let Some(legacy) = stored.get(LEGACY_ZOOM_KEY).and_then(|v| v.as_f64()) {
				state.zoom = ZoomLevel::new(legacy);
			}
		}

		if LEGACY_KEYS.iter().any(|k| stored.contains_key(*k)) {
			debug!("migrating legacy storage keys");
			if let Err(err) = self.migrate(&state).await {
				warn!(error = %err, "legacy migration failed, keeping loaded state");
			}
		}

		Ok(state)
	}

	/// Writes the merged record, then drops the legacy keys. Legacy keys stay
	/// until the record is saved.
	async fn migrate(&self, state: &SessionState) -> Result<()> {
		self.save(state).await?;
		self.storage.remove(LEGACY_KEYS).await
	}

	/// Writes the full record.
	pub async fn save(&self, state: &SessionState) -> Result<()> {
		let mut items = Map::new();
		items.insert(STATE_KEY.to_string(), serde_json::to_value(state.to_persisted())?);
		self.storage.set(items).await
	}

	/// Applies a navigation of `provider` to `url`.
	///
	/// Default URLs and auth pages clear the provider's session; anything else
	/// replaces it. The state is always updated in memory but only flushed when
	/// `provider` is the active one.
	pub async fn record_navigation(
		&self,
		state: &mut SessionState,
		provider: Provider,
		url: &str,
	) -> Result<NavigationRecord> {
		let change = if url == provider.default_url() || is_auth_url(url) {
			state.sessions.remove(&provider);
			SessionChange::Cleared
		} else {
			state.sessions.insert(provider, url.to_string());
			SessionChange::Stored(url.to_string())
		};

		let persisted = provider == state.last_provider;
		if persisted {
			self.save(state).await?;
		}

		debug!(%provider, ?change, persisted, "recorded navigation");
		Ok(NavigationRecord {
			provider,
			change,
			persisted,
		})
	}

	/// Marks `provider` as active and persists.
	pub async fn set_active_provider(&self, state: &mut SessionState, provider: Provider) -> Result<()> {
		state.last_provider = provider;
		self.save(state).await
	}

	/// Clamps, rounds, stores, and persists the zoom. Returns the stored level.
	pub async fn set_zoom(&self, state: &mut SessionState, level: f64) -> Result<ZoomLevel> {
		state.zoom = ZoomLevel::new(level);
		self.save(state).await?;
		Ok(state.zoom)
	}
}
