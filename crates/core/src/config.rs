//! Panel configuration read from the optional `omniConfig` storage key.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::zoom::ZOOM_STEP;

/// Frame lifecycle policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PoolKind {
	/// Keep every opened provider page alive and hide inactive ones.
	#[default]
	Persistent,
	/// Keep one frame and rebuild it on every switch.
	SingleSlot,
}

/// Log verbosity for the extension contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Error,
	Warn,
	#[default]
	Info,
	Debug,
	Trace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelConfig {
	pub pool: PoolKind,
	pub zoom_step: f64,
	/// Duration of ordinary toasts, in milliseconds.
	pub toast_ms: u32,
	/// Duration of the voice-unavailable notice, in milliseconds.
	pub voice_notice_ms: u32,
	pub log_level: LogLevel,
}

impl Default for PanelConfig {
	fn default() -> Self {
		Self {
			pool: PoolKind::default(),
			zoom_step: ZOOM_STEP,
			toast_ms: 2000,
			voice_notice_ms: 3000,
			log_level: LogLevel::default(),
		}
	}
}

impl PanelConfig {
	/// Parses a stored config record. Absent records give defaults; malformed
	/// records are logged and replaced by defaults.
	pub fn from_stored(value: Option<&Value>) -> Self {
		let Some(value) = value else {
			return Self::default();
		};
		let mut config = match Self::deserialize(value) {
			Ok(config) => config,
			Err(err) => {
				warn!(error = %err, "ignoring malformed panel config");
				return Self::default();
			}
		};
		if !(config.zoom_step.is_finite() && config.zoom_step > 0.0) {
			config.zoom_step = ZOOM_STEP;
		}
		config
	}
}
