use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	/// Extension storage rejected a read or write.
	#[error("storage operation failed: {0}")]
	Storage(String),

	/// A frame could not be created or updated.
	#[error("frame operation failed for {provider}: {message}")]
	Frame { provider: String, message: String },

	/// A message could not be handed to the runtime.
	#[error("message transport failed: {0}")]
	Transport(String),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl Error {
	pub fn frame(provider: impl ToString, message: impl Into<String>) -> Self {
		Self::Frame {
			provider: provider.to_string(),
			message: message.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::provider::Provider;

	#[test]
	fn messages_name_the_failure() {
		assert_eq!(
			Error::frame(Provider::Claude, "refused to display").to_string(),
			"frame operation failed for Claude: refused to display"
		);
		assert_eq!(
			Error::Transport("tabs.query rejected".into()).to_string(),
			"message transport failed: tabs.query rejected"
		);
	}
}
