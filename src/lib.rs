//! Jellyremote - remote Jellyfin playback sessions as controllable players.
//!
//! The server reports loosely structured session snapshots on a polling
//! interval; this crate projects each snapshot into a strict, always
//! consistent [`player::PlayerState`] and exposes playback commands (play,
//! pause, seek, volume, browse) that forward to the server's remote-control
//! API. The main pieces:
//!
//! - Typed session model and coordinator hand-off channel
//! - Pure snapshot-to-state projection with a feature mask and artwork
//!   fallback chain
//! - Reactive player entities discovered from the feed
//! - HTTP client for the session control endpoints
//!
//! # Quick Start
//!
//! ```rust
//! use jellyremote::player::{PlaybackState, project};
//!
//! // No snapshot means the session ended on the server.
//! let state = project(None);
//! assert_eq!(state.playback_state, PlaybackState::Off);
//! ```

/// Collaborator interfaces and the HTTP client.
pub mod api;

/// Error types.
pub mod error;

/// Player entities, state projection, and command dispatch.
pub mod player;

/// Reactive property primitive backing the player models.
pub mod property;

/// Session discovery service driven by the coordinator feed.
pub mod service;

/// Raw session model and the coordinator feed.
pub mod session;

/// Tracing setup for host applications.
pub mod tracing_config;

pub use error::PlayerError;
pub use service::{Config, SessionPlayerService};
