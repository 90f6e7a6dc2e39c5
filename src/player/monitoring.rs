use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::session::SessionFeedReceiver;

use super::Player;

/// Drives one player's projection from the session feed.
///
/// A single task per player replaces the player's properties on every push;
/// there is no other writer, so readers always see one coherent projection.
pub(crate) struct PlayerMonitor {
    handle: JoinHandle<()>,
}

impl PlayerMonitor {
    /// Start projecting feed updates into the player.
    ///
    /// Returns a handle that aborts the task when dropped. The task applies
    /// the current update immediately, then waits for pushes; it ends once
    /// the feed's sender is gone.
    pub(crate) fn start(player: Arc<Player>, mut feed: SessionFeedReceiver) -> Self {
        debug!(session = %player.session_id, "starting session monitoring");

        let handle = tokio::spawn(async move {
            loop {
                player.apply_update(&feed.current());

                if feed.changed().await.is_err() {
                    break;
                }
            }

            debug!(session = %player.session_id, "session feed closed");
        });

        Self { handle }
    }
}

impl Drop for PlayerMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
