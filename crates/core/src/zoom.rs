//! Panel zoom factor.

use std::fmt;

pub const ZOOM_MIN: f64 = 0.3;
pub const ZOOM_MAX: f64 = 1.5;
pub const ZOOM_DEFAULT: f64 = 1.0;
pub const ZOOM_STEP: f64 = 0.1;

/// Zoom factor clamped to [`ZOOM_MIN`]..=[`ZOOM_MAX`] and rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomLevel(f64);

impl ZoomLevel {
	/// Clamps and rounds `level`. Non-finite input yields the default zoom.
	pub fn new(level: f64) -> Self {
		if !level.is_finite() {
			return Self::default();
		}
		let clamped = level.clamp(ZOOM_MIN, ZOOM_MAX);
		Self((clamped * 100.0).round() / 100.0)
	}

	pub fn get(self) -> f64 {
		self.0
	}

	pub fn step(self, delta: f64) -> Self {
		Self::new(self.0 + delta)
	}

	/// Zoom as a whole percentage, e.g. `110` for `1.1`.
	pub fn percent(self) -> u32 {
		(self.0 * 100.0).round() as u32
	}

	/// Frame size in percent of the container that fills it after scaling.
	pub fn inverse_extent(self) -> f64 {
		100.0 / self.0
	}
}

impl Default for ZoomLevel {
	fn default() -> Self {
		Self(ZOOM_DEFAULT)
	}
}

impl fmt::Display for ZoomLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}%", self.percent())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamps_to_bounds() {
		assert_eq!(ZoomLevel::new(5.0).get(), ZOOM_MAX);
		assert_eq!(ZoomLevel::new(0.0).get(), ZOOM_MIN);
		assert_eq!(ZoomLevel::new(-3.0).get(), ZOOM_MIN);
	}

	#[test]
	fn rounds_to_two_decimals() {
		assert_eq!(ZoomLevel::new(1.054).get(), 1.05);
		assert_eq!(ZoomLevel::new(1.0 + 0.1).get(), 1.1);
		assert_eq!(ZoomLevel::new(0.7 - 0.1).get(), 0.6);
	}

	#[test]
	fn is_idempotent() {
		let once = ZoomLevel::new(1.05);
		assert_eq!(ZoomLevel::new(once.get()), once);
	}

	#[test]
	fn non_finite_falls_back_to_default() {
		assert_eq!(ZoomLevel::new(f64::NAN), ZoomLevel::default());
		assert_eq!(ZoomLevel::new(f64::INFINITY), ZoomLevel::default());
	}

	#[test]
	fn stepping_saturates() {
		let mut zoom = ZoomLevel::default();
		for _ in 0..20 {
			zoom = zoom.step(ZOOM_STEP);
		}
		assert_eq!(zoom.get(), ZOOM_MAX);
		assert_eq!(zoom.percent(), 150);
	}

	#[test]
	fn display_is_percentage() {
		assert_eq!(ZoomLevel::new(0.9).to_string(), "90%");
	}
}
