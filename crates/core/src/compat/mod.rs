//! Compatibility patches applied inside hosted pages.
//!
//! Everything here is pure: selectors, stylesheets, and heuristics. The
//! content script performs the DOM work. Patches are idempotent: injected
//! elements carry fixed ids and handled controls carry [`HANDLED_ATTR`], so
//! re-running after further page mutations changes nothing already patched.

pub mod input;
pub mod layout;
pub mod probe;
pub mod voice;

pub use input::EditableKind;
pub use probe::{DocumentQuery, PageProbe};
pub use voice::ControlTraits;

use crate::provider::{Provider, resolve_provider};

/// Marker attribute set on controls that already received a listener.
pub const HANDLED_ATTR: &str = "data-omni-handled";

/// Patches to apply to one hosted page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatPlan {
	pub provider: Provider,
	pub pin_viewport: bool,
	pub inject_styles: bool,
	/// Intercept voice controls and rewrite voice-mode errors.
	pub suppress_voice: bool,
	/// Floating button toggling the sidebar or opening recent chats.
	pub recents_button: bool,
}

impl CompatPlan {
	pub fn for_provider(provider: Provider) -> Self {
		Self {
			provider,
			pin_viewport: true,
			inject_styles: true,
			suppress_voice: !provider.supports_voice(),
			recents_button: provider == Provider::Claude,
		}
	}

	/// Plan for the page at `hostname`. Pages of unknown sites get no patches.
	pub fn for_hostname(hostname: &str) -> Option<Self> {
		resolve_provider(hostname).map(Self::for_provider)
	}

	pub fn probe(&self) -> PageProbe {
		PageProbe::for_provider(self.provider)
	}
}
