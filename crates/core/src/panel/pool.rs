//! Frame lifecycle policies.
//!
//! [`IframePool`] decides which provider frames exist and which one is
//! visible; [`FrameHost`] performs the underlying DOM work. Two policies are
//! provided:
//!
//! * [`PersistentPool`]: frames are created on first use and then only hidden,
//!   so in-page drafts survive a switch
//! * [`SingleSlotPool`]: one frame at a time, replaced on every switch

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;
use crate::provider::Provider;
use crate::zoom::ZoomLevel;

/// Creates and manipulates embedded frames.
pub trait FrameHost {
	type Frame;

	/// Creates a hidden frame for `provider` navigated to `url`.
	fn create(&mut self, provider: Provider, url: &str) -> Result<Self::Frame>;

	fn set_visible(&mut self, frame: &Self::Frame, visible: bool);

	/// Scales the frame's rendering by `zoom`.
	fn apply_zoom(&mut self, frame: &Self::Frame, zoom: ZoomLevel);

	/// Detaches the frame from the document.
	fn destroy(&mut self, frame: Self::Frame);
}

/// Mapping from providers to visible content.
pub trait IframePool {
	/// Makes `provider` the only visible slot, creating it at `url` when the
	/// policy has no live slot for it, and scales it to `zoom`.
	fn show(&mut self, provider: Provider, url: &str, zoom: ZoomLevel) -> Result<()>;

	/// Applies `zoom` to every live slot.
	fn apply_zoom(&mut self, zoom: ZoomLevel);

	/// Provider whose slot is visible.
	fn visible(&self) -> Option<Provider>;

	/// Number of live slots.
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<P: IframePool + ?Sized> IframePool for Box<P> {
	fn show(&mut self, provider: Provider, url: &str, zoom: ZoomLevel) -> Result<()> {
		(**self).show(provider, url, zoom)
	}

	fn apply_zoom(&mut self, zoom: ZoomLevel) {
		(**self).apply_zoom(zoom)
	}

	fn visible(&self) -> Option<Provider> {
		(**self).visible()
	}

	fn len(&self) -> usize {
		(**self).len()
	}
}

/// Keeps one frame per opened provider for the panel's lifetime.
pub struct PersistentPool<H: FrameHost> {
	host: H,
	slots: BTreeMap<Provider, H::Frame>,
	visible: Option<Provider>,
}

impl<H: FrameHost> PersistentPool<H> {
	pub fn new(host: H) -> Self {
		Self {
			host,
			slots: BTreeMap::new(),
			visible: None,
		}
	}
}

impl<H: FrameHost> IframePool for PersistentPool<H> {
	fn show(&mut self, provider: Provider, url: &str, zoom: ZoomLevel) -> Result<()> {
		if !self.slots.contains_key(&provider) {
			let frame = self.host.create(provider, url)?;
			debug!(%provider, url, "created persistent slot");
			self.slots.insert(provider, frame);
		}

		if let Some(previous) = self.visible.filter(|p| *p != provider) {
			if let Some(frame) = self.slots.get(&previous) {
				self.host.set_visible(frame, false);
			}
		}

		if let Some(frame) = self.slots.get(&provider) {
			self.host.apply_zoom(frame, zoom);
			self.host.set_visible(frame, true);
		}
		self.visible = Some(provider);
		Ok(())
	}

	fn apply_zoom(&mut self, zoom: ZoomLevel) {
		for frame in self.slots.values() {
			self.host.apply_zoom(frame, zoom);
		}
	}

	fn visible(&self) -> Option<Provider> {
		self.visible
	}

	fn len(&self) -> usize {
		self.slots.len()
	}
}

/// Keeps a single frame, destroyed and recreated whenever the provider changes.
pub struct SingleSlotPool<H: FrameHost> {
	host: H,
	slot: Option<(Provider, H::Frame)>,
}

impl<H: FrameHost> SingleSlotPool<H> {
	pub fn new(host: H) -> Self {
		Self { host, slot: None }
	}
}

impl<H: FrameHost> IframePool for SingleSlotPool<H> {
	fn show(&mut self, provider: Provider, url: &str, zoom: ZoomLevel) -> Result<()> {
		if let Some((current, frame)) = &self.slot {
			if *current == provider {
				self.host.apply_zoom(frame, zoom);
				self.host.set_visible(frame, true);
				return Ok(());
			}
		}

		// A failed creation leaves the previous slot in place.
		let frame = self.host.create(provider, url)?;
		self.host.apply_zoom(&frame, zoom);
		if let Some((previous, old)) = self.slot.take() {
			debug!(%previous, %provider, "replacing single slot");
			self.host.destroy(old);
		}
		self.host.set_visible(&frame, true);
		self.slot = Some((provider, frame));
		Ok(())
	}

	fn apply_zoom(&mut self, zoom: ZoomLevel) {
		if let Some((_, frame)) = &self.slot {
			self.host.apply_zoom(frame, zoom);
		}
	}

	fn visible(&self) -> Option<Provider> {
		self.slot.as_ref().map(|(p, _)| *p)
	}

	fn len(&self) -> usize {
		usize::from(self.slot.is_some())
	}
}
