//! Per-site capability probes.
//!
//! Each hosted app lays out its composer and microphone button differently.
//! A [`PageProbe`] holds the selectors for one page family, tried in order,
//! followed by generic fallbacks. Probes are best-effort: a miss is normal.

use crate::provider::Provider;

/// Minimal DOM query surface needed by probes.
pub trait DocumentQuery {
	type Element;

	/// Returns the first element matching `selector`. Invalid selectors match nothing.
	fn query(&self, selector: &str) -> Option<Self::Element>;
}

/// Generic editable controls, in preference order.
pub const FALLBACK_INPUT_SELECTORS: &[&str] = &[
	"textarea:not([readonly])",
	"div[contenteditable=\"true\"]",
	"input[type=\"text\"]",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProbe {
	provider: Provider,
	input_selectors: &'static [&'static str],
	voice_selectors: &'static [&'static str],
}

impl PageProbe {
	pub fn for_provider(provider: Provider) -> Self {
		let (input_selectors, voice_selectors): (&[&str], &[&str]) = match provider {
			Provider::Gemini => (
				&[
					"rich-textarea div.ql-editor[contenteditable=\"true\"]",
					"div.ql-editor[contenteditable=\"true\"]",
				],
				&[
					"speech-dictation-mic-button button",
					"button[aria-label*=\"microphone\" i]",
				],
			),
			Provider::ChatGPT => (
				&["#prompt-textarea", "div.ProseMirror[contenteditable=\"true\"]"],
				&[
					"button[data-testid=\"composer-speech-button\"]",
					"button[aria-label*=\"voice\" i]",
					"button[aria-label*=\"dictat\" i]",
				],
			),
			Provider::Claude => (
				&[
					"div.ProseMirror[contenteditable=\"true\"]",
					"fieldset div[contenteditable=\"true\"]",
				],
				&["button[aria-label*=\"voice\" i]", "button[aria-label*=\"dictation\" i]"],
			),
			Provider::DeepSeek => (&["textarea#chat-input", "textarea[placeholder]"], &[]),
			Provider::Grok => (
				&["textarea[aria-label]", "div.tiptap[contenteditable=\"true\"]"],
				&["button[aria-label*=\"voice\" i]", "button[aria-label*=\"microphone\" i]"],
			),
		};
		Self {
			provider,
			input_selectors,
			voice_selectors,
		}
	}

	pub fn provider(&self) -> Provider {
		self.provider
	}

	/// Finds the composer: site selectors first, then [`FALLBACK_INPUT_SELECTORS`].
	///
	/// Matches that `accept` rejects are skipped and later selectors tried.
	pub fn find_primary_input<D, T>(&self, doc: &D, mut accept: impl FnMut(D::Element) -> Option<T>) -> Option<T>
	where
		D: DocumentQuery,
	{
		self.input_selectors
			.iter()
			.chain(FALLBACK_INPUT_SELECTORS)
			.find_map(|selector| doc.query(selector).and_then(&mut accept))
	}

	/// Finds the site's microphone / voice-mode button.
	pub fn find_voice_control<D: DocumentQuery>(&self, doc: &D) -> Option<D::Element> {
		self.voice_selectors.iter().find_map(|selector| doc.query(selector))
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	struct FakeDocument(HashMap<&'static str, &'static str>);

	impl DocumentQuery for FakeDocument {
		type Element = &'static str;

		fn query(&self, selector: &str) -> Option<&'static str> {
			self.0.get(selector).copied()
		}
	}

	#[test]
	fn site_selector_wins_over_fallback() {
		let doc = FakeDocument(HashMap::from([
			("#prompt-textarea", "composer"),
			("textarea:not([readonly])", "other"),
		]));
		let probe = PageProbe::for_provider(Provider::ChatGPT);
		assert_eq!(probe.find_primary_input(&doc, Some), Some("composer"));
	}

	#[test]
	fn rejected_match_falls_through_to_next_selector() {
		let doc = FakeDocument(HashMap::from([
			("div.ProseMirror[contenteditable=\"true\"]", "read-only preview"),
			("textarea:not([readonly])", "composer"),
		]));
		let probe = PageProbe::for_provider(Provider::Claude);
		let writable = |el: &'static str| (el != "read-only preview").then_some(el);

		assert_eq!(probe.find_primary_input(&doc, Some), Some("read-only preview"));
		assert_eq!(probe.find_primary_input(&doc, writable), Some("composer"));
		assert_eq!(probe.find_primary_input(&doc, |_| None::<&str>), None);
	}

	#[test]
	fn falls_back_to_generic_inputs() {
		let doc = FakeDocument(HashMap::from([("input[type=\"text\"]", "search")]));
		let probe = PageProbe::for_provider(Provider::DeepSeek);
		assert_eq!(probe.find_primary_input(&doc, Some), Some("search"));
	}

	#[test]
	fn missing_elements_yield_none() {
		let doc = FakeDocument(HashMap::new());
		for provider in Provider::ALL {
			let probe = PageProbe::for_provider(provider);
			assert_eq!(probe.find_primary_input(&doc, Some), None);
			assert_eq!(probe.find_voice_control(&doc), None);
		}
	}

	#[test]
	fn voice_control_has_no_generic_fallback() {
		let doc = FakeDocument(HashMap::from([("button[aria-label*=\"voice\" i]", "mic")]));
		assert_eq!(PageProbe::for_provider(Provider::Claude).find_voice_control(&doc), Some("mic"));
		assert_eq!(PageProbe::for_provider(Provider::DeepSeek).find_voice_control(&doc), None);
	}
}
