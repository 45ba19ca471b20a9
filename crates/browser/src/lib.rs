//! Browser-side adapters shared by the OmniPanel extension contexts.
//!
//! - [`ChromeStorage`]: `chrome.storage.local` as a [`KeyValueStorage`](omnipanel::KeyValueStorage)
//! - [`RuntimeSender`]: fire-and-forget `chrome.runtime` messaging
//! - [`logging::init_logging`]: `tracing` output to the browser console

pub mod chrome;
pub mod js;
pub mod logging;
pub mod runtime;
pub mod storage;

pub use runtime::RuntimeSender;
pub use storage::ChromeStorage;
