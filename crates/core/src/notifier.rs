//! Navigation reporting from inside a hosted page.
//!
//! The page's history API is never wrapped: several hosted apps break when
//! `history.pushState` is patched because the navigation object is shared
//! across execution contexts. Instead a timer poll and two passive event
//! listeners ([`Trigger`]) feed one [`UrlChangeNotifier`], which reports each
//! distinct URL once.

use std::time::Duration;

use omnipanel_protocol::Message;
use tracing::{debug, trace};

/// Interval between URL polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// What caused a URL check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
	Init,
	Poll,
	PopState,
	HashChange,
}

/// Fire-and-forget delivery of messages to the panel.
///
/// Implementations swallow delivery failures; a missing receiver (panel
/// closed, extension reloaded) is a normal state.
pub trait MessageSender {
	fn send(&self, message: &Message);
}

/// Reports URL changes of one page through a [`MessageSender`].
pub struct UrlChangeNotifier<T> {
	sender: T,
	last_seen: String,
}

impl<T: MessageSender> UrlChangeNotifier<T> {
	/// Captures `current` as the baseline and reports it immediately.
	pub fn start(sender: T, current: &str) -> Self {
		let notifier = Self {
			sender,
			last_seen: current.to_string(),
		};
		notifier.emit(Trigger::Init);
		notifier
	}

	pub fn last_seen(&self) -> &str {
		&self.last_seen
	}

	/// Compares `current` with the last reported URL and reports it if it
	/// changed. Returns whether a message was sent.
	pub fn check(&mut self, current: &str, trigger: Trigger) -> bool {
		if current == self.last_seen {
			trace!(?trigger, "url unchanged");
			return false;
		}
		self.last_seen = current.to_string();
		self.emit(trigger);
		true
	}

	fn emit(&self, trigger: Trigger) {
		debug!(?trigger, url = %self.last_seen, "reporting url");
		self.sender.send(&Message::session_url_update(self.last_seen.clone()));
	}
}
