//! Classification of navigation reports from hosted pages.
//!
//! Reports that do not parse or that belong to no registered provider (for
//! example an identity provider's popup domain) are ignored without touching
//! state. Applying the same report twice leaves the same state.

use tracing::trace;
use url::Url;

use super::{NavigationRecord, SessionState, SessionStore};
use crate::error::Result;
use crate::provider::{Provider, resolve_provider};
use crate::storage::KeyValueStorage;

/// A navigation report attributed to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified<'a> {
	pub provider: Provider,
	pub url: &'a str,
}

/// Attributes `url` to a provider by hostname.
pub fn classify(url: &str) -> Option<Classified<'_>> {
	let parsed = Url::parse(url).ok()?;
	let provider = resolve_provider(parsed.host_str()?)?;
	Some(Classified { provider, url })
}

/// Handles one `SESSION_URL_UPDATE` report.
///
/// Returns [`None`] when the report was ignored.
pub async fn on_notification<S: KeyValueStorage>(
	store: &SessionStore<S>,
	state: &mut SessionState,
	url: &str,
) -> Result<Option<NavigationRecord>> {
	let Some(classified) = classify(url) else {
		trace!(url, "ignoring unclassified url");
		return Ok(None);
	};
	store
		.record_navigation(state, classified.provider, classified.url)
		.await
		.map(Some)
}
