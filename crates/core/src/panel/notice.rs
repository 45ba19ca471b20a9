//! User-facing notices raised by the panel.

use crate::provider::Provider;
use crate::zoom::ZoomLevel;

/// Sink for transient toasts and the persistent status line.
pub trait Notices {
	/// Shows `text` for `duration_ms`, replacing any visible toast.
	fn transient(&self, text: &str, duration_ms: u32);

	/// Sets or clears the persistent status line.
	fn set_status(&self, text: Option<&str>);
}

impl<N: Notices + ?Sized> Notices for std::rc::Rc<N> {
	fn transient(&self, text: &str, duration_ms: u32) {
		(**self).transient(text, duration_ms)
	}

	fn set_status(&self, text: Option<&str>) {
		(**self).set_status(text)
	}
}

pub fn voice_unavailable(provider: Provider) -> String {
	format!("⚠️ Voice mode unavailable for {provider}")
}

pub fn zoom_changed(zoom: ZoomLevel) -> String {
	format!("Zoom {zoom}")
}

pub const ZOOM_RESET: &str = "Zoom Reset";

/// Microphone permission as reported by the Permissions API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicPermission {
	Granted,
	Denied,
	Prompt,
}

impl MicPermission {
	/// Status line to show while in this state.
	pub fn status_text(self) -> Option<&'static str> {
		match self {
			Self::Denied => Some("🎤 Microphone blocked. Allow microphone access for OmniPanel to use voice input."),
			Self::Granted | Self::Prompt => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_denied_has_status() {
		assert!(MicPermission::Denied.status_text().is_some());
		assert_eq!(MicPermission::Granted.status_text(), None);
		assert_eq!(MicPermission::Prompt.status_text(), None);
	}

	#[test]
	fn notice_texts() {
		assert_eq!(voice_unavailable(Provider::Claude), "⚠️ Voice mode unavailable for Claude");
		assert_eq!(zoom_changed(ZoomLevel::new(1.1)), "Zoom 110%");
	}
}
