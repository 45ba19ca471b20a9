//! Voice-mode suppression for pages whose voice mode cannot work embedded.

/// Text shown in place of the site's own voice-mode error.
pub const VOICE_NOTICE_TEXT: &str =
	"🎤 Voice mode is unavailable in OmniPanel. Open the site in a new tab to use voice.";

/// Tooltip put on intercepted voice buttons.
pub const VOICE_CONTROL_TITLE: &str = "Voice unavailable in OmniPanel";

/// Error text the hosted page shows when its voice session drops.
pub const VOICE_ERROR_TEXT: &str = "Voice mode disconnected";

pub const NOTICE_BANNER_ID: &str = "omni-voice-notice";
pub const NOTICE_BANNER_MS: u32 = 4000;

/// Selector for alert-like descendants of an added node that may carry the error.
pub const ALERT_SELECTOR: &str = "[class*=\"alert\"], [class*=\"toast\"], [class*=\"error\"], [role=\"alert\"]";

/// Path fragments of common microphone glyphs.
const MIC_PATH_MARKERS: &[&str] = &["M12 14", "M12,14", "M19 11", "M19,11", "m12", "microphone"];

/// Attributes of a button relevant to voice detection.
#[derive(Debug, Clone, Default)]
pub struct ControlTraits {
	pub aria_label: String,
	pub title: String,
	pub text: String,
	pub test_id: String,
	/// `d` attributes of `svg path` descendants.
	pub svg_paths: Vec<String>,
}

impl ControlTraits {
	/// Returns true if the button looks like a microphone or voice-mode control.
	pub fn is_voice_control(&self) -> bool {
		let label = self.aria_label.to_lowercase();
		let title = self.title.to_lowercase();
		let test_id = self.test_id.to_lowercase();

		let labelled = [label.as_str(), title.as_str()]
			.iter()
			.any(|s| s.contains("voice") || s.contains("microphone"));
		let tagged = test_id.contains("voice") || test_id.contains("mic");

		labelled || tagged || self.is_bare_mic_icon()
	}

	fn is_bare_mic_icon(&self) -> bool {
		self.text.trim().is_empty()
			&& self
				.svg_paths
				.iter()
				.any(|d| MIC_PATH_MARKERS.iter().any(|m| d.contains(m)))
	}
}

/// Returns true if `text` looks like the site's voice-mode failure message.
pub fn mentions_voice_error(text: &str) -> bool {
	text.contains(VOICE_ERROR_TEXT) || text.contains("voice mode")
}
