//! Fixed table of hosted chat providers.
//!
//! Lookup order is the declaration order of [`Provider::ALL`]. When a hostname
//! matches patterns of more than one provider, the first registered provider
//! wins.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A hosted AI chat service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Provider {
	Gemini,
	ChatGPT,
	Claude,
	DeepSeek,
	Grok,
}

/// Provider restored when storage holds no valid last provider.
pub const DEFAULT_PROVIDER: Provider = Provider::Gemini;

struct Entry {
	name: &'static str,
	default_url: &'static str,
	host_patterns: &'static [&'static str],
	voice_supported: bool,
}

impl Provider {
	/// All providers in registration order.
	pub const ALL: [Provider; 5] = [
		Provider::Gemini,
		Provider::ChatGPT,
		Provider::Claude,
		Provider::DeepSeek,
		Provider::Grok,
	];

	fn entry(self) -> &'static Entry {
		match self {
			Provider::Gemini => &Entry {
				name: "Gemini",
				default_url: "https://gemini.google.com/app",
				host_patterns: &["gemini.google.com"],
				voice_supported: true,
			},
			Provider::ChatGPT => &Entry {
				name: "ChatGPT",
				default_url: "https://chatgpt.com/",
				host_patterns: &["chatgpt.com"],
				voice_supported: true,
			},
			Provider::Claude => &Entry {
				name: "Claude",
				default_url: "https://claude.ai/new",
				host_patterns: &["claude.ai", "anthropic.com"],
				voice_supported: false,
			},
			Provider::DeepSeek => &Entry {
				name: "DeepSeek",
				default_url: "https://chat.deepseek.com/",
				host_patterns: &["chat.deepseek.com"],
				voice_supported: true,
			},
			Provider::Grok => &Entry {
				name: "Grok",
				default_url: "https://grok.com/",
				host_patterns: &["grok.com", "x.com"],
				voice_supported: true,
			},
		}
	}

	/// Display and storage name.
	pub fn name(self) -> &'static str {
		self.entry().name
	}

	/// Entry URL loaded when no session is stored.
	pub fn default_url(self) -> &'static str {
		self.entry().default_url
	}

	/// Hostname substrings identifying this provider's pages.
	pub fn host_patterns(self) -> &'static [&'static str] {
		self.entry().host_patterns
	}

	/// Whether voice mode works while the page is embedded in the panel.
	pub fn supports_voice(self) -> bool {
		self.entry().voice_supported
	}

	/// Looks up a provider by its storage name.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|p| p.name() == name)
	}

	fn matches_host(self, hostname: &str) -> bool {
		self.host_patterns().iter().any(|pattern| hostname.contains(pattern))
	}
}

impl fmt::Display for Provider {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Error returned when parsing an unknown provider name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
	type Err = UnknownProvider;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_name(s).ok_or_else(|| UnknownProvider(s.to_string()))
	}
}

/// Returns the first provider whose host patterns occur in `hostname`.
pub fn resolve_provider(hostname: &str) -> Option<Provider> {
	Provider::ALL.into_iter().find(|p| p.matches_host(hostname))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_every_registered_pattern() {
		for provider in Provider::ALL {
			for pattern in provider.host_patterns() {
				assert_eq!(resolve_provider(pattern), Some(provider), "{pattern}");
			}
		}
	}

	#[test]
	fn resolves_subdomains_by_substring() {
		assert_eq!(resolve_provider("www.anthropic.com"), Some(Provider::Claude));
		assert_eq!(resolve_provider("chat.deepseek.com"), Some(Provider::DeepSeek));
		assert_eq!(resolve_provider("api.x.com"), Some(Provider::Grok));
	}

	#[test]
	fn unrelated_hosts_resolve_to_none() {
		assert_eq!(resolve_provider("accounts.google.com"), None);
		assert_eq!(resolve_provider("deepseek.com"), None);
		assert_eq!(resolve_provider(""), None);
	}

	#[test]
	fn first_registered_wins() {
		// Contains both a Gemini and a Grok pattern.
		assert_eq!(resolve_provider("gemini.google.com.x.com"), Some(Provider::Gemini));
	}

	#[test]
	fn resolution_is_deterministic() {
		for _ in 0..3 {
			assert_eq!(resolve_provider("claude.ai"), Some(Provider::Claude));
		}
	}

	#[test]
	fn names_round_trip() {
		for provider in Provider::ALL {
			assert_eq!(provider.name().parse::<Provider>(), Ok(provider));
			assert_eq!(serde_json::to_value(provider).unwrap(), provider.name());
		}
		assert_eq!(Provider::from_name("Bard"), None);
		assert!("chatgpt".parse::<Provider>().is_err());
	}

	#[test]
	fn default_urls_belong_to_their_provider() {
		for provider in Provider::ALL {
			let url = url::Url::parse(provider.default_url()).unwrap();
			assert_eq!(resolve_provider(url.host_str().unwrap()), Some(provider));
		}
	}

	#[test]
	fn only_claude_lacks_voice() {
		let unsupported: Vec<_> = Provider::ALL.into_iter().filter(|p| !p.supports_voice()).collect();
		assert_eq!(unsupported, vec![Provider::Claude]);
	}
}
