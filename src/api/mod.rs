//! Collaborator interfaces consumed by the players.
//!
//! The remote-control and artwork surfaces are trait-shaped so tests and
//! alternative transports can stand in for the HTTP client.

/// HTTP implementation of the control and artwork surfaces
pub mod http;

pub use http::JellyfinClient;

use async_trait::async_trait;
use url::Url;

use crate::error::PlayerError;
use crate::session::SessionId;

/// Image kinds the artwork endpoints accept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    /// Wide background image
    Backdrop,

    /// Poster-style primary image
    Primary,
}

impl ImageType {
    /// Image type name as used by the server
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backdrop => "Backdrop",
            Self::Primary => "Primary",
        }
    }
}

/// Remote playback control surface of the media server.
///
/// Every call maps to exactly one backend request keyed by session id.
/// Failures propagate to the caller; there are no retries and no optimistic
/// state updates, so a command's effect only becomes visible through the
/// next coordinator push.
#[async_trait]
pub trait RemoteControl: Send + Sync {
    /// Seek to an absolute position, in 100 ns ticks
    async fn remote_seek(
        &self,
        session_id: &SessionId,
        position_ticks: i64,
    ) -> Result<(), PlayerError>;

    /// Pause playback
    async fn remote_pause(&self, session_id: &SessionId) -> Result<(), PlayerError>;

    /// Resume playback
    async fn remote_unpause(&self, session_id: &SessionId) -> Result<(), PlayerError>;

    /// Toggle between playing and paused
    async fn remote_play_pause(&self, session_id: &SessionId) -> Result<(), PlayerError>;

    /// Stop playback
    async fn remote_stop(&self, session_id: &SessionId) -> Result<(), PlayerError>;

    /// Start playing the given items
    async fn remote_play_media(
        &self,
        session_id: &SessionId,
        item_ids: &[String],
    ) -> Result<(), PlayerError>;

    /// Set the client volume in the server's 0..100 range
    async fn remote_set_volume(&self, session_id: &SessionId, level: u8)
    -> Result<(), PlayerError>;

    /// Mute audio
    async fn remote_mute(&self, session_id: &SessionId) -> Result<(), PlayerError>;

    /// Unmute audio
    async fn remote_unmute(&self, session_id: &SessionId) -> Result<(), PlayerError>;
}

/// Artwork URL construction.
///
/// Pure string building; the returned URL is not validated against the
/// server, so an id without an actual image yields a dead URL.
pub trait ArtworkSource: Send + Sync {
    /// Build the artwork URL for an item and image type
    fn artwork(&self, item_id: &str, image_type: ImageType, quality: u32) -> Url;
}

/// A node in the media browse tree
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseNode {
    /// Display title
    pub title: String,

    /// Content identifier of this node
    pub content_id: String,

    /// Content type of this node (e.g. "collection", "episode")
    pub content_type: String,

    /// Whether this node can be played directly
    pub can_play: bool,

    /// Whether this node has children to browse into
    pub can_expand: bool,

    /// Thumbnail image, if any
    pub thumbnail: Option<Url>,

    /// Child nodes, populated by the builders
    pub children: Vec<BrowseNode>,
}

/// Browse-tree builders, owned by an external collaborator.
///
/// The players only forward to these two entry points; tree construction
/// itself lives elsewhere.
#[async_trait]
pub trait MediaBrowser: Send + Sync {
    /// Build the library root listing
    async fn build_root_response(&self) -> Result<BrowseNode, PlayerError>;

    /// Build the listing for one item
    async fn build_item_response(
        &self,
        content_type: Option<&str>,
        content_id: &str,
    ) -> Result<BrowseNode, PlayerError>;
}
