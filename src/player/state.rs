use std::ops::Deref;

use bitflags::bitflags;
use chrono::{DateTime, Utc};

/// Normalized playback lifecycle of a remote session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Session is no longer reported by the server
    #[default]
    Off,

    /// Session exists but nothing is playing
    Idle,

    /// Playback is paused
    Paused,

    /// Playback is running
    Playing,
}

/// Normalized media content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// Audio track
    Music,

    /// Feature film
    Movie,

    /// Single episode of a series
    Episode,

    /// Season of a series
    Season,

    /// Whole series
    TvShow,
}

impl MediaType {
    /// Map a server item type onto the normalized model.
    ///
    /// Anything outside the fixed table has no normalized equivalent.
    pub fn from_item_type(item_type: &str) -> Option<Self> {
        match item_type {
            "Audio" => Some(Self::Music),
            "Episode" => Some(Self::Episode),
            "Movie" => Some(Self::Movie),
            "Season" => Some(Self::Season),
            "Series" => Some(Self::TvShow),
            _ => None,
        }
    }

    /// Outward-facing content type.
    ///
    /// Episodes are re-tagged as TV shows for display; frontends do not
    /// render the full episode view.
    pub fn display(self) -> Self {
        match self {
            Self::Episode => Self::TvShow,
            other => other,
        }
    }

    /// Lowercase name used at the platform boundary
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Music => "music",
            Self::Movie => "movie",
            Self::Episode => "episode",
            Self::Season => "season",
            Self::TvShow => "tvshow",
        }
    }
}

bitflags! {
    /// Remote-control operations a session currently supports
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PlayerFeatures: u32 {
        /// Media library browsing
        const BROWSE_MEDIA = 1 << 0;
        /// Starting playback of an arbitrary item
        const PLAY_MEDIA = 1 << 1;
        /// Pausing playback
        const PAUSE = 1 << 2;
        /// Resuming playback
        const PLAY = 1 << 3;
        /// Stopping playback
        const STOP = 1 << 4;
        /// Muting and unmuting
        const VOLUME_MUTE = 1 << 5;
        /// Setting an absolute volume
        const VOLUME_SET = 1 << 6;
        /// Seeking within the current item
        const SEEK = 1 << 7;
    }
}

/// Volume of the player, normalized to 0.0..1.0
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Volume(f64);

impl Volume {
    /// Create a new instance of a volume with safeguarded values
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Convert from the server's 0..100 range
    pub fn from_server_level(level: u32) -> Self {
        Self::new(f64::from(level) / 100.0)
    }

    /// Convert to the server's 0..100 range, rounded
    pub fn to_server_level(self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl Deref for Volume {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<f64> for Volume {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Normalized player state derived from one session snapshot.
///
/// Recomputed wholesale on every coordinator push; never partially mutated.
/// Optional fields are unknown rather than erroneous when the snapshot omits
/// their source data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerState {
    /// Playback lifecycle
    pub playback_state: PlaybackState,

    /// Outward-facing content type (episode override already applied)
    pub media_type: Option<MediaType>,

    /// Identifier of the playing item
    pub content_id: Option<String>,

    /// Title of the playing item
    pub title: Option<String>,

    /// Series the playing episode belongs to
    pub series_title: Option<String>,

    /// Season number of the playing episode
    pub season: Option<u32>,

    /// Episode number within the season
    pub episode: Option<u32>,

    /// Item runtime in whole seconds
    pub duration_secs: Option<u64>,

    /// Playback position in whole seconds
    pub position_secs: Option<u64>,

    /// When the position was last reported by the client
    pub position_updated_at: Option<DateTime<Utc>>,

    /// Normalized client volume
    pub volume: Option<Volume>,

    /// Whether audio is muted
    pub muted: bool,

    /// Remote-control operations available right now
    pub features: PlayerFeatures,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_lookup() {
        assert_eq!(MediaType::from_item_type("Audio"), Some(MediaType::Music));
        assert_eq!(MediaType::from_item_type("Movie"), Some(MediaType::Movie));
        assert_eq!(MediaType::from_item_type("Series"), Some(MediaType::TvShow));
        assert_eq!(MediaType::from_item_type("Trailer"), None);
        assert_eq!(MediaType::from_item_type(""), None);
    }

    #[test]
    fn episode_displays_as_tvshow() {
        assert_eq!(MediaType::Episode.display(), MediaType::TvShow);
        assert_eq!(MediaType::Movie.display(), MediaType::Movie);
        assert_eq!(MediaType::Music.display(), MediaType::Music);
    }

    #[test]
    fn volume_is_clamped() {
        assert_eq!(*Volume::new(1.5), 1.0);
        assert_eq!(*Volume::new(-0.5), 0.0);
        assert_eq!(*Volume::new(0.42), 0.42);
    }

    #[test]
    fn volume_server_level_round_trip() {
        assert_eq!(*Volume::from_server_level(50), 0.5);
        assert_eq!(Volume::new(0.5).to_server_level(), 50);
        assert_eq!(Volume::from_server_level(200).to_server_level(), 100);
    }

    #[test]
    fn default_state_is_off_with_no_features() {
        let state = PlayerState::default();

        assert_eq!(state.playback_state, PlaybackState::Off);
        assert!(state.features.is_empty());
        assert!(!state.muted);
        assert!(state.volume.is_none());
    }
}
