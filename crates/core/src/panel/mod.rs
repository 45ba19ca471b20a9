//! Side panel orchestration: which provider is shown, at what zoom, from which URL.
//!
//! [`PanelController`] owns the [`SessionState`] for the panel's lifetime and
//! is the only place that switches providers. Storage failures are logged and
//! never block the UI; the in-memory state stays authoritative.

use omnipanel_protocol::Message;
use tracing::{debug, info, warn};

use crate::config::PanelConfig;
use crate::error::Result;
use crate::provider::Provider;
use crate::session::{NavigationRecord, SessionState, SessionStore, classify, sync};
use crate::storage::KeyValueStorage;
use crate::zoom::{ZOOM_DEFAULT, ZoomLevel};

pub mod notice;
pub mod pool;


pub use notice::{MicPermission, Notices};
pub use pool::{FrameHost, IframePool, PersistentPool, SingleSlotPool};

pub struct PanelController<S, P, N> {
	store: SessionStore<S>,
	state: SessionState,
	pool: P,
	notices: N,
	config: PanelConfig,
}

impl<S, P, N> PanelController<S, P, N>
where
	S: KeyValueStorage,
	P: IframePool,
	N: Notices,
{
	/// Loads persisted state, applies its zoom, then shows the last provider.
	///
	/// Unreadable storage starts the panel from defaults.
	pub async fn start(store: SessionStore<S>, pool: P, notices: N, config: PanelConfig) -> Result<Self> {
		let state = match store.load().await {
			Ok(state) => state,
			Err(err) => {
				warn!(error = %err, "session load failed, using defaults");
				SessionState::default()
			}
		};

		let mut controller = Self {
			store,
			state,
			pool,
			notices,
			config,
		};
		controller.pool.apply_zoom(controller.state.zoom);
		let initial = controller.state.last_provider;
		info!(provider = %initial, zoom = %controller.state.zoom, "panel started");
		controller.show(initial)?;
		Ok(controller)
	}

	pub fn state(&self) -> &SessionState {
		&self.state
	}

	pub fn active(&self) -> Provider {
		self.state.last_provider
	}

	pub fn zoom(&self) -> ZoomLevel {
		self.state.zoom
	}

	pub fn pool(&self) -> &P {
		&self.pool
	}

	pub fn config(&self) -> &PanelConfig {
		&self.config
	}

	/// Switches the panel to `provider`. Returns `false` if it was already active.
	///
	/// The provider becomes active only once its frame is shown; a failed show
	/// leaves the previous provider active and visible.
	pub async fn switch_to(&mut self, provider: Provider) -> Result<bool> {
		if provider == self.state.last_provider {
			return Ok(false);
		}
		self.show(provider)?;
		if let Err(err) = self.store.set_active_provider(&mut self.state, provider).await {
			warn!(error = %err, %provider, "failed to persist active provider");
		}
		Ok(true)
	}

	fn show(&mut self, provider: Provider) -> Result<()> {
		let url = self.state.target_url(provider).to_string();
		debug!(%provider, url = %url, "showing provider");
		self.pool.show(provider, &url, self.state.zoom)?;

		let hosted = classify(&url).map_or(provider, |c| c.provider);
		if !hosted.supports_voice() {
			self.notices
				.transient(&notice::voice_unavailable(hosted), self.config.voice_notice_ms);
		}
		Ok(())
	}

	/// Clamps and persists `level`, then scales every slot to it.
	pub async fn set_zoom(&mut self, level: f64) -> ZoomLevel {
		if let Err(err) = self.store.set_zoom(&mut self.state, level).await {
			warn!(error = %err, "failed to persist zoom");
		}
		self.pool.apply_zoom(self.state.zoom);
		self.state.zoom
	}

	pub async fn zoom_in(&mut self) -> ZoomLevel {
		let zoom = self.set_zoom(self.state.zoom.get() + self.config.zoom_step).await;
		self.notices.transient(&notice::zoom_changed(zoom), self.config.toast_ms);
		zoom
	}

	pub async fn zoom_out(&mut self) -> ZoomLevel {
		let zoom = self.set_zoom(self.state.zoom.get() - self.config.zoom_step).await;
		self.notices.transient(&notice::zoom_changed(zoom), self.config.toast_ms);
		zoom
	}

	pub async fn reset_zoom(&mut self) -> ZoomLevel {
		let zoom = self.set_zoom(ZOOM_DEFAULT).await;
		self.notices.transient(notice::ZOOM_RESET, self.config.toast_ms);
		zoom
	}

	/// Handles a runtime message addressed to the panel.
	///
	/// Only navigation reports concern the panel; anything else is ignored.
	pub async fn handle_message(&mut self, message: &Message) -> Option<NavigationRecord> {
		let Message::SessionUrlUpdate { url } = message else {
			return None;
		};
		match sync::on_notification(&self.store, &mut self.state, url).await {
			Ok(record) => record,
			Err(err) => {
				warn!(error = %err, url = %url, "failed to persist session");
				None
			}
		}
	}

	/// Reflects a microphone permission change in the status line.
	pub fn on_permission_change(&self, permission: MicPermission) {
		debug!(?permission, "microphone permission changed");
		self.notices.set_status(permission.status_text());
	}
}
