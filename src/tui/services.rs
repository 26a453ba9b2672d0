//! Centralized handle to all backend collaborators.

use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::config::AppConfig;

use super::audio::TonePlayer;
use super::events::AppEvent;

/// Created once at startup, then passed by reference to views that
/// need backend access. The views clone `api` / `event_tx` into
/// spawned tasks.
pub struct Services {
    pub api: ApiClient,
    pub audio: TonePlayer,
    /// Role of the signed-in user; gates stock-out row deletion.
    pub role: String,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    pub fn init(config: &AppConfig, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        log::info!("Using inventory server at {}", config.server.base_url);
        Self {
            api: ApiClient::new(config.server.base_url.clone()),
            audio: TonePlayer::new(config.tui.tone_volume),
            role: config.session.role.clone(),
            event_tx,
        }
    }
}
