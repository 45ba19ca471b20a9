//! OmniPanel core: provider registry, session synchronization, and the side
//! panel's frame lifecycle.
//!
//! Browser APIs sit behind traits ([`KeyValueStorage`], [`FrameHost`],
//! [`Notices`], [`MessageSender`], [`DocumentQuery`]) so everything here runs
//! and tests natively; the extension crates supply wasm implementations.
//!
//! [`FrameHost`]: panel::FrameHost
//! [`Notices`]: panel::Notices
//! [`MessageSender`]: notifier::MessageSender
//! [`DocumentQuery`]: compat::DocumentQuery

pub mod compat;
pub mod config;
pub mod error;
pub mod notifier;
pub mod panel;
pub mod provider;
pub mod session;
pub mod storage;
pub mod zoom;

pub use config::{LogLevel, PanelConfig, PoolKind};
pub use error::{Error, Result};
pub use omnipanel_protocol as protocol;
pub use panel::PanelController;
pub use provider::{DEFAULT_PROVIDER, Provider, resolve_provider};
pub use session::{SessionState, SessionStore};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use zoom::ZoomLevel;
