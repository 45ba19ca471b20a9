//! Wire types shared by the OmniPanel background, side panel, and content
//! scripts.
//!
//! - [`Message`]: runtime messages tagged by `action`
//! - [`PersistedState`]: the session record kept in extension storage

pub mod message;
pub mod state;

pub use message::Message;
pub use state::{CONFIG_KEY, LEGACY_KEYS, LEGACY_ZOOM_KEY, PersistedState, STATE_KEY};
