/// Artwork URL resolution with the fixed fallback chain
pub mod artwork;
/// Playback command dispatch
mod control;
/// The controllable player entity
pub mod model;
/// Per-player projection loop
pub(crate) mod monitoring;
/// Session-to-state projection (the core)
pub mod projector;
/// Normalized state types and feature flags
pub mod state;

pub use model::{MEDIA_SOURCE_ROOT, Player};
pub use projector::{available, project};
pub use state::{MediaType, PlaybackState, PlayerFeatures, PlayerState, Volume};
