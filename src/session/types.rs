use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server time unit: one tick is 100 nanoseconds.
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Unique identifier for a playback session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a SessionId from the server-assigned identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw session identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Raw per-session state as reported by the server on every refresh.
///
/// The identity fields are required; a session report without them cannot be
/// turned into a player and fails at deserialization. Everything else is
/// optional and absence is never an error: no `now_playing_item` means
/// nothing is playing, no `play_state` means no active transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionSnapshot {
    /// Stable identifier of the device running the client
    pub device_id: String,

    /// Human-readable device name
    pub device_name: String,

    /// Client application name
    pub client: String,

    /// Client application version
    pub application_version: String,

    /// Remote-control capabilities reported by the client
    pub capabilities: SessionCapabilities,

    /// Item currently playing, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now_playing_item: Option<NowPlayingItem>,

    /// Transport state, if a transport is active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_state: Option<PlayState>,

    /// Last playback progress report; present only while something plays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_playback_check_in: Option<DateTime<Utc>>,
}

/// Remote-control capabilities of a session's client
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionCapabilities {
    /// Whether the client accepts remote playback control at all
    #[serde(default)]
    pub supports_media_control: bool,

    /// Whether the device identifier is stable across connections
    #[serde(default)]
    pub supports_persistent_identifier: bool,

    /// General commands the client accepts (e.g. "Mute", "VolumeSet")
    #[serde(default)]
    pub supported_commands: Vec<String>,
}

impl SessionCapabilities {
    /// Whether the client accepts the given general command
    pub fn supports_command(&self, command: &str) -> bool {
        self.supported_commands.iter().any(|c| c == command)
    }
}

/// The item a session is currently playing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NowPlayingItem {
    /// Library item identifier
    pub id: String,

    /// Display name of the item
    pub name: String,

    /// Server item type (e.g. "Movie", "Episode", "Audio")
    #[serde(rename = "Type")]
    pub item_type: String,

    /// Series name, for episodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_name: Option<String>,

    /// Season number, for episodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_index_number: Option<u32>,

    /// Episode number within the season
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_number: Option<u32>,

    /// Total runtime in 100 ns ticks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_time_ticks: Option<i64>,

    /// Image tags keyed by image type (e.g. "Primary", "Backdrop")
    #[serde(default)]
    pub image_tags: HashMap<String, String>,

    /// Tags of the item's backdrop images, one per image
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub backdrop_image_tags: Vec<String>,

    /// Item whose backdrop can stand in for this item's own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_backdrop_item_id: Option<String>,
}

impl NowPlayingItem {
    /// Whether the item carries an image tag of the given type
    pub fn has_image_tag(&self, image_type: &str) -> bool {
        self.image_tags.contains_key(image_type)
    }
}

/// Transport state of a session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayState {
    /// Playback position in 100 ns ticks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_ticks: Option<i64>,

    /// Whether the transport supports seeking
    #[serde(default)]
    pub can_seek: bool,

    /// Whether playback is paused
    #[serde(default)]
    pub is_paused: bool,

    /// Whether audio is muted
    #[serde(default)]
    pub is_muted: bool,

    /// Client volume in the server's 0..100 range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_level: Option<u32>,
}
