use std::sync::Arc;

use url::Url;

use crate::api::{ArtworkSource, BrowseNode, MediaBrowser, RemoteControl};
use crate::error::PlayerError;
use crate::property::Property;
use crate::session::{SessionCapabilities, SessionId, SessionSnapshot, SessionUpdate};

use super::artwork::resolve_artwork_url;
use super::control::Control;
use super::projector::{available, project};
use super::state::{PlayerFeatures, PlayerState, Volume};

/// Root sentinel for media browsing; requests for this id (or no id at all)
/// return the library root.
pub const MEDIA_SOURCE_ROOT: &str = "media-source://jellyfin";

/// A remote playback session exposed as a controllable player.
///
/// Identity is fixed at discovery time from the first snapshot; the reactive
/// properties are wholesale-replaced on every coordinator push, so readers
/// always observe one coherent projection. Commands go straight to the
/// backend and never touch local state.
pub struct Player {
    /// Session this player controls
    pub session_id: SessionId,

    /// Stable device identifier
    pub device_id: String,

    /// Human-readable device name
    pub device_name: String,

    /// Client application name
    pub client_name: String,

    /// Client application version
    pub app_version: String,

    /// Remote-control capabilities reported at discovery
    pub capabilities: SessionCapabilities,

    /// Normalized playback state, recomputed wholesale per push
    pub state: Property<PlayerState>,

    /// Whether the last refresh succeeded and still reports this session
    pub available: Property<bool>,

    /// Raw playing item, kept for artwork resolution
    now_playing: Property<Option<crate::session::NowPlayingItem>>,

    control: Arc<dyn RemoteControl>,
    artwork: Arc<dyn ArtworkSource>,
    browser: Arc<dyn MediaBrowser>,
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.session_id == other.session_id
    }
}

impl Player {
    /// Create a player for a freshly discovered session.
    ///
    /// Properties start at their unknown defaults; the caller applies the
    /// discovering update immediately afterwards.
    pub(crate) fn new(
        session_id: SessionId,
        snapshot: &SessionSnapshot,
        control: Arc<dyn RemoteControl>,
        artwork: Arc<dyn ArtworkSource>,
        browser: Arc<dyn MediaBrowser>,
    ) -> Self {
        Self {
            session_id,
            device_id: snapshot.device_id.clone(),
            device_name: snapshot.device_name.clone(),
            client_name: snapshot.client.clone(),
            app_version: snapshot.application_version.clone(),
            capabilities: snapshot.capabilities.clone(),
            state: Property::new(PlayerState::default()),
            available: Property::new(false),
            now_playing: Property::new(None),
            control,
            artwork,
            browser,
        }
    }

    /// Re-project this player's state from a coordinator push.
    ///
    /// The session's snapshot may be absent, which projects to Off.
    pub(crate) fn apply_update(&self, update: &SessionUpdate) {
        let snapshot = update.snapshot(&self.session_id);

        self.available
            .set(available(update.last_update_success, snapshot));
        self.state.set(project(snapshot));
        self.now_playing
            .set(snapshot.and_then(|s| s.now_playing_item.clone()));
    }

    /// Remote-control operations available right now
    pub fn features(&self) -> PlayerFeatures {
        self.state.get().features
    }

    /// Display image for the current item, if any
    pub fn artwork_url(&self) -> Option<Url> {
        resolve_artwork_url(self.now_playing.get().as_ref(), self.artwork.as_ref())
    }

    /// Seek to an absolute position in seconds.
    ///
    /// # Errors
    ///
    /// Propagates the backend error when the command fails.
    pub async fn seek(&self, position_secs: f64) -> Result<(), PlayerError> {
        Control::seek(self.control.as_ref(), &self.session_id, position_secs).await
    }

    /// Pause playback.
    ///
    /// # Errors
    ///
    /// Propagates the backend error when the command fails.
    pub async fn pause(&self) -> Result<(), PlayerError> {
        Control::pause(self.control.as_ref(), &self.session_id).await
    }

    /// Resume playback.
    ///
    /// # Errors
    ///
    /// Propagates the backend error when the command fails.
    pub async fn play(&self) -> Result<(), PlayerError> {
        Control::play(self.control.as_ref(), &self.session_id).await
    }

    /// Toggle between playing and paused.
    ///
    /// # Errors
    ///
    /// Propagates the backend error when the command fails.
    pub async fn play_pause(&self) -> Result<(), PlayerError> {
        Control::play_pause(self.control.as_ref(), &self.session_id).await
    }

    /// Stop playback.
    ///
    /// # Errors
    ///
    /// Propagates the backend error when the command fails.
    pub async fn stop(&self) -> Result<(), PlayerError> {
        Control::stop(self.control.as_ref(), &self.session_id).await
    }

    /// Start playing one item on this session.
    ///
    /// # Errors
    ///
    /// Propagates the backend error when the command fails.
    pub async fn play_media(&self, media_id: &str) -> Result<(), PlayerError> {
        Control::play_media(self.control.as_ref(), &self.session_id, media_id).await
    }

    /// Set the client volume.
    ///
    /// # Errors
    ///
    /// Propagates the backend error when the command fails.
    pub async fn set_volume(&self, volume: Volume) -> Result<(), PlayerError> {
        Control::set_volume(self.control.as_ref(), &self.session_id, volume).await
    }

    /// Mute or unmute the client.
    ///
    /// # Errors
    ///
    /// Propagates the backend error when the command fails.
    pub async fn set_muted(&self, muted: bool) -> Result<(), PlayerError> {
        Control::set_muted(self.control.as_ref(), &self.session_id, muted).await
    }

    /// Forward a browse request to the tree builders.
    ///
    /// No id, or the root sentinel, browses the library root; anything else
    /// browses the named item.
    ///
    /// # Errors
    ///
    /// Propagates the builder's error.
    pub async fn browse_media(
        &self,
        content_type: Option<&str>,
        content_id: Option<&str>,
    ) -> Result<BrowseNode, PlayerError> {
        match content_id {
            None => self.browser.build_root_response().await,
            Some(MEDIA_SOURCE_ROOT) => self.browser.build_root_response().await,
            Some(id) => self.browser.build_item_response(content_type, id).await,
        }
    }
}
