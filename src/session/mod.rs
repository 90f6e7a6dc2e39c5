/// Coordinator hand-off channel for refreshed session maps
pub mod feed;
/// Typed model of the server's raw session reports
pub mod types;

pub use feed::*;
pub use types::*;
