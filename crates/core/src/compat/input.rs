//! Text injection target classification.

/// How text is written into an editable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableKind {
	/// `<textarea>` or `<input>`: set `value` through the native setter so
	/// framework-controlled inputs notice, then fire `input` and `change`.
	TextField,
	/// `contenteditable="true"`: replace `innerText`, then fire `input`.
	ContentEditable,
}

impl EditableKind {
	/// Classifies an element by tag name and `contenteditable` attribute.
	pub fn classify(tag_name: &str, contenteditable: Option<&str>) -> Option<Self> {
		if tag_name.eq_ignore_ascii_case("textarea") || tag_name.eq_ignore_ascii_case("input") {
			Some(Self::TextField)
		} else if contenteditable == Some("true") {
			Some(Self::ContentEditable)
		} else {
			None
		}
	}

	/// Events dispatched after writing, in order.
	pub fn events(self) -> &'static [&'static str] {
		match self {
			Self::TextField => &["input", "change"],
			Self::ContentEditable => &["input"],
		}
	}
}

pub const INPUT_NOT_FOUND: &str = "Input not found. Text copied to clipboard.";

/// Id of the banner shown when no input was found.
pub const INJECT_BANNER_ID: &str = "omni-inject-notice";
