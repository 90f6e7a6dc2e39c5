//! Session-to-player state projection.
//!
//! The single source of truth for how a raw session snapshot becomes a
//! [`PlayerState`]. Pure and total: no I/O, and a missing optional field
//! always maps to an unknown value rather than an error.

use crate::session::{SessionSnapshot, TICKS_PER_SECOND};

use super::state::{MediaType, PlaybackState, PlayerFeatures, PlayerState, Volume};

/// Project one session snapshot (or its absence) into a normalized state.
///
/// The whole state is recomputed on every call; each evaluation is
/// independent of any prior state. Lifecycle priority, first match wins:
/// no snapshot is Off, no playing item is Idle, a paused transport is
/// Paused, anything else is Playing.
pub fn project(snapshot: Option<&SessionSnapshot>) -> PlayerState {
    let Some(session) = snapshot else {
        return PlayerState::default();
    };

    let item = session.now_playing_item.as_ref();
    let play_state = session.play_state.as_ref();

    let playback_state = match item {
        None => PlaybackState::Idle,
        Some(_) if play_state.is_some_and(|ps| ps.is_paused) => PlaybackState::Paused,
        Some(_) => PlaybackState::Playing,
    };

    let mut state = PlayerState {
        playback_state,
        features: features(session),
        ..PlayerState::default()
    };

    if let Some(play_state) = play_state {
        state.position_secs = play_state.position_ticks.map(ticks_to_secs);
        state.muted = play_state.is_muted;
        state.volume = play_state.volume_level.map(Volume::from_server_level);
    }

    if let Some(item) = item {
        state.media_type = MediaType::from_item_type(&item.item_type).map(MediaType::display);
        state.content_id = Some(item.id.clone());
        state.title = Some(item.name.clone());
        state.series_title = item.series_name.clone();
        state.season = item.parent_index_number;
        state.episode = item.index_number;
        state.duration_secs = item.run_time_ticks.map(ticks_to_secs);
        state.position_updated_at = session.last_playback_check_in;
    }

    state
}

/// Whether the entity backed by this session should be considered reachable.
///
/// An Idle session is still available; only a failed refresh or a vanished
/// session makes the player unavailable.
pub fn available(last_update_success: bool, snapshot: Option<&SessionSnapshot>) -> bool {
    last_update_success && snapshot.is_some()
}

/// Convert ticks (100 ns) to whole seconds, flooring.
pub(crate) fn ticks_to_secs(ticks: i64) -> u64 {
    (ticks / TICKS_PER_SECOND).max(0) as u64
}

/// Convert fractional seconds to ticks (100 ns), rounding.
pub(crate) fn secs_to_ticks(secs: f64) -> i64 {
    (secs * TICKS_PER_SECOND as f64).round() as i64
}

fn features(session: &SessionSnapshot) -> PlayerFeatures {
    let mut features = PlayerFeatures::empty();
    let capabilities = &session.capabilities;

    if capabilities.supports_media_control {
        features |= PlayerFeatures::BROWSE_MEDIA
            | PlayerFeatures::PLAY_MEDIA
            | PlayerFeatures::PAUSE
            | PlayerFeatures::PLAY
            | PlayerFeatures::STOP;

        if capabilities.supports_command("Mute") {
            features |= PlayerFeatures::VOLUME_MUTE;
        }

        if capabilities.supports_command("VolumeSet") {
            features |= PlayerFeatures::VOLUME_SET;
        }
    }

    // Seek depends on the live transport, not on the client's declared
    // capabilities, so it is granted independently of the control gate.
    if session
        .play_state
        .as_ref()
        .is_some_and(|play_state| play_state.can_seek)
    {
        features |= PlayerFeatures::SEEK;
    }

    features
}
