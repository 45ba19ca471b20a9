use std::collections::BTreeMap;

use async_trait::async_trait;
use omnipanel_protocol::{LEGACY_ZOOM_KEY, STATE_KEY};
use serde_json::{Map, Value, json};

use super::sync::on_notification;
use super::*;
use crate::error::{Error, Result};
use crate::storage::{KeyValueStorage, MemoryStorage};
use crate::zoom::{ZOOM_MAX, ZOOM_MIN};

fn test_store() -> SessionStore<MemoryStorage> {
	SessionStore::new(MemoryStorage::new())
}

fn stored(store: &SessionStore<MemoryStorage>) -> serde_json::Value {
	store.storage().snapshot(STATE_KEY).unwrap_or_default()
}

#[test]
fn target_url_prefers_session() {
	let mut state = SessionState::default();
	assert_eq!(state.target_url(Provider::Claude), "https://claude.ai/new");

	state.sessions.insert(Provider::Claude, "https://claude.ai/chat/abc123".into());
	assert_eq!(state.target_url(Provider::Claude), "https://claude.ai/chat/abc123");
}

#[test]
fn auth_patterns_match_substrings() {
	assert!(is_auth_url("https://accounts.google.com/ServiceLogin?continue=x"));
	assert!(is_auth_url("https://chatgpt.com/auth/login"));
	assert!(is_auth_url("https://claude.ai/login?returnTo=/new"));
	assert!(is_auth_url("https://grok.com/signin"));
	assert!(!is_auth_url("https://chatgpt.com/c/1234"));
}

#[tokio::test]
async fn load_applies_defaults_on_empty_storage() {
	let store = test_store();
	let state = store.load().await.unwrap();
	assert_eq!(state, SessionState::default());
	assert_eq!(state.last_provider, Provider::Gemini);
}

#[tokio::test]
async fn load_drops_unknown_providers() {
	let storage = MemoryStorage::with_items([(
		STATE_KEY,
		json!({
			"sessions": {
				"Claude": "https://claude.ai/chat/1",
				"Bard": "https://bard.google.com/chat/2",
			},
			"lastProvider": "Bard",
			"zoomLevel": 9.0,
		}),
	)]);
	let state = SessionStore::new(storage).load().await.unwrap();

	assert_eq!(state.sessions.len(), 1);
	assert_eq!(state.session(Provider::Claude), Some("https://claude.ai/chat/1"));
	assert_eq!(state.last_provider, Provider::Gemini);
	assert_eq!(state.zoom.get(), ZOOM_MAX);
}

#[tokio::test]
async fn save_then_load_round_trips() {
	let store = test_store();
	let state = SessionState {
		sessions: BTreeMap::from([
			(Provider::ChatGPT, "https://chatgpt.com/c/42".to_string()),
			(Provider::Grok, "https://grok.com/chat/7".to_string()),
		]),
		last_provider: Provider::Grok,
		zoom: ZoomLevel::new(0.85),
	};

	store.save(&state).await.unwrap();
	assert_eq!(store.load().await.unwrap(), state);
}

#[tokio::test]
async fn load_migrates_legacy_zoom() {
	let storage = MemoryStorage::with_items([
		(LEGACY_ZOOM_KEY, json!(1.2)),
		("lastAiUrl", json!("https://claude.ai/chat/old")),
	]);
	let store = SessionStore::new(storage);

	let state = store.load().await.unwrap();
	assert_eq!(state.zoom.get(), 1.2);
	assert_eq!(store.storage().snapshot(LEGACY_ZOOM_KEY), None);
	assert_eq!(store.storage().snapshot("lastAiUrl"), None);
	assert_eq!(stored(&store)["zoomLevel"], json!(1.2));
}

/// Storage that serves reads but rejects every write.
struct ReadOnlyStorage(MemoryStorage);

#[async_trait(?Send)]
impl KeyValueStorage for ReadOnlyStorage {
	async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
		self.0.get(keys).await
	}

	async fn set(&self, _items: Map<String, Value>) -> Result<()> {
		Err(Error::Storage("read-only".into()))
	}

	async fn remove(&self, _keys: &[&str]) -> Result<()> {
		Err(Error::Storage("read-only".into()))
	}
}

#[tokio::test]
async fn failed_migration_keeps_loaded_state() {
	let storage = ReadOnlyStorage(MemoryStorage::with_items([
		(
			STATE_KEY,
			json!({
				"sessions": {"Claude": "https://claude.ai/chat/abc"},
				"lastProvider": "Claude",
				"zoomLevel": 0.8,
			}),
		),
		("lastAiUrl", json!("https://claude.ai/chat/old")),
	]));
	let store = SessionStore::new(storage);

	let state = store.load().await.unwrap();
	assert_eq!(state.last_provider, Provider::Claude);
	assert_eq!(state.zoom.get(), 0.8);
	assert_eq!(state.session(Provider::Claude), Some("https://claude.ai/chat/abc"));
	assert_eq!(store.storage().0.snapshot("lastAiUrl"), Some(json!("https://claude.ai/chat/old")));
}

#[tokio::test]
async fn record_zoom_wins_over_legacy_zoom() {
	let storage = MemoryStorage::with_items([
		(LEGACY_ZOOM_KEY, json!(1.2)),
		(STATE_KEY, json!({"zoomLevel": 0.8})),
	]);
	let state = SessionStore::new(storage).load().await.unwrap();
	assert_eq!(state.zoom.get(), 0.8);
}

#[tokio::test]
async fn navigation_to_default_url_clears_session() {
	let store = test_store();
	let mut state = SessionState::default();
	state.sessions.insert(Provider::Gemini, "https://gemini.google.com/app/1".into());

	for _ in 0..2 {
		let record = store
			.record_navigation(&mut state, Provider::Gemini, Provider::Gemini.default_url())
			.await
			.unwrap();
		assert_eq!(record.change, SessionChange::Cleared);
		assert_eq!(state.session(Provider::Gemini), None);
	}
}

#[tokio::test]
async fn auth_navigation_never_creates_session() {
	let store = test_store();
	for provider in Provider::ALL {
		let mut state = SessionState::default();
		store
			.record_navigation(&mut state, provider, "https://accounts.google.com/v3/signin")
			.await
			.unwrap();
		assert_eq!(state.session(provider), None, "{provider}");
	}
}

#[tokio::test]
async fn inactive_provider_updates_memory_only() {
	let store = test_store();
	let mut state = SessionState::default();

	let record = store
		.record_navigation(&mut state, Provider::Claude, "https://claude.ai/chat/bg")
		.await
		.unwrap();

	assert!(!record.persisted);
	assert_eq!(state.session(Provider::Claude), Some("https://claude.ai/chat/bg"));
	assert_eq!(store.storage().snapshot(STATE_KEY), None);
}

#[tokio::test]
async fn active_provider_updates_are_persisted() {
	let store = test_store();
	let mut state = SessionState {
		last_provider: Provider::Claude,
		..Default::default()
	};

	let record = store
		.record_navigation(&mut state, Provider::Claude, "https://claude.ai/chat/fg")
		.await
		.unwrap();

	assert!(record.persisted);
	assert_eq!(stored(&store)["sessions"]["Claude"], json!("https://claude.ai/chat/fg"));
}

#[tokio::test]
async fn set_zoom_clamps_and_is_idempotent() {
	let store = test_store();
	let mut state = SessionState::default();

	assert_eq!(store.set_zoom(&mut state, 0.01).await.unwrap().get(), ZOOM_MIN);
	assert_eq!(store.set_zoom(&mut state, 1.05).await.unwrap().get(), 1.05);
	assert_eq!(store.set_zoom(&mut state, 1.05).await.unwrap().get(), 1.05);
	assert_eq!(stored(&store)["zoomLevel"], json!(1.05));
}

#[tokio::test]
async fn set_active_provider_persists() {
	let store = test_store();
	let mut state = SessionState::default();
	store.set_active_provider(&mut state, Provider::DeepSeek).await.unwrap();
	assert_eq!(stored(&store)["lastProvider"], json!("DeepSeek"));
}

#[tokio::test]
async fn claude_session_scenario() {
	let store = test_store();
	let mut state = SessionState {
		last_provider: Provider::Claude,
		..Default::default()
	};

	on_notification(&store, &mut state, "https://claude.ai/chat/abc123").await.unwrap();
	assert_eq!(state.session(Provider::Claude), Some("https://claude.ai/chat/abc123"));

	on_notification(&store, &mut state, "https://claude.ai/new").await.unwrap();
	assert_eq!(state.session(Provider::Claude), None);
	assert_eq!(stored(&store)["sessions"], json!({}));
}

#[tokio::test]
async fn malformed_and_unknown_urls_are_ignored() {
	let store = test_store();
	let mut state = SessionState::default();
	let before = state.clone();

	for url in ["not a url", "https://", "https://accounts.google.com/o/oauth2", "about:blank"] {
		assert_eq!(on_notification(&store, &mut state, url).await.unwrap(), None, "{url}");
	}
	assert_eq!(state, before);
	assert_eq!(store.storage().snapshot(STATE_KEY), None);
}

#[tokio::test]
async fn notifications_never_cross_contaminate() {
	let store = test_store();
	let mut state = SessionState::default();

	on_notification(&store, &mut state, "https://grok.com/chat/2").await.unwrap();
	on_notification(&store, &mut state, "https://chatgpt.com/c/1").await.unwrap();
	on_notification(&store, &mut state, "https://chatgpt.com/").await.unwrap();

	assert_eq!(state.session(Provider::ChatGPT), None);
	assert_eq!(state.session(Provider::Grok), Some("https://grok.com/chat/2"));
}

#[tokio::test]
async fn replaying_a_notification_is_idempotent() {
	let store = test_store();
	let mut state = SessionState::default();

	on_notification(&store, &mut state, "https://gemini.google.com/app/77").await.unwrap();
	let once = state.clone();
	on_notification(&store, &mut state, "https://gemini.google.com/app/77").await.unwrap();
	assert_eq!(state, once);
}
