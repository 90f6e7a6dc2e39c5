use std::collections::HashMap;
use std::sync::Arc;

use futures::Stream;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::api::{ArtworkSource, MediaBrowser, RemoteControl};
use crate::error::PlayerError;
use crate::player::Player;
use crate::player::monitoring::PlayerMonitor;
use crate::property::Property;
use crate::session::{SessionFeedReceiver, SessionId, SessionUpdate};

/// Configuration for the session player service
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Device ids whose sessions are never exposed, typically this
    /// integration's own client device
    pub ignored_device_ids: Vec<String>,

    /// Client application names whose sessions are never exposed
    pub ignored_clients: Vec<String>,
}

struct PlayerHandle {
    player: Arc<Player>,
    _monitor: PlayerMonitor,
}

/// Discovers playback sessions from the coordinator feed and exposes them
/// as controllable players.
///
/// New sessions become players on the push that first reports them; players
/// whose sessions vanish are kept and project to Off until the session
/// reappears. The service never polls, it only consumes pushes.
#[derive(Clone)]
pub struct SessionPlayerService {
    players: Arc<RwLock<HashMap<SessionId, PlayerHandle>>>,
    player_list: Property<Vec<Arc<Player>>>,
}

impl SessionPlayerService {
    /// Start the service on a session feed.
    ///
    /// `api` provides both the remote-control and artwork surfaces (the
    /// HTTP client implements both); `browser` supplies the browse-tree
    /// builders. Discovery stops once the feed's sender is dropped.
    #[instrument(skip_all)]
    pub fn start<C>(
        config: Config,
        api: Arc<C>,
        browser: Arc<dyn MediaBrowser>,
        feed: SessionFeedReceiver,
    ) -> Self
    where
        C: RemoteControl + ArtworkSource + 'static,
    {
        info!("starting session player service");

        let service = Self {
            players: Arc::new(RwLock::new(HashMap::new())),
            player_list: Property::new(Vec::new()),
        };

        let control: Arc<dyn RemoteControl> = api.clone();
        let artwork: Arc<dyn ArtworkSource> = api;
        tokio::spawn(discovery_loop(
            Arc::clone(&service.players),
            service.player_list.clone(),
            config,
            control,
            artwork,
            browser,
            feed,
        ));

        service
    }

    /// Current players, in discovery order of the underlying map
    pub fn players(&self) -> Vec<Arc<Player>> {
        self.player_list.get()
    }

    /// Stream of player-list changes.
    ///
    /// Yields the current list immediately, then again whenever a session
    /// is discovered.
    pub fn players_monitored(&self) -> impl Stream<Item = Vec<Arc<Player>>> + Send {
        self.player_list.watch()
    }

    /// Look up a player by session id.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::SessionNotFound`] when no player is tracked
    /// for the session.
    pub async fn player(&self, session_id: &SessionId) -> Result<Arc<Player>, PlayerError> {
        let players = self.players.read().await;
        players
            .get(session_id)
            .map(|handle| Arc::clone(&handle.player))
            .ok_or_else(|| PlayerError::SessionNotFound(session_id.clone()))
    }
}

#[allow(clippy::too_many_arguments)]
async fn discovery_loop(
    players: Arc<RwLock<HashMap<SessionId, PlayerHandle>>>,
    player_list: Property<Vec<Arc<Player>>>,
    config: Config,
    control: Arc<dyn RemoteControl>,
    artwork: Arc<dyn ArtworkSource>,
    browser: Arc<dyn MediaBrowser>,
    mut feed: SessionFeedReceiver,
) {
    loop {
        let update = feed.current();
        discover_sessions(
            &players,
            &player_list,
            &config,
            &control,
            &artwork,
            &browser,
            &feed,
            &update,
        )
        .await;

        if feed.changed().await.is_err() {
            break;
        }
    }

    debug!("session feed closed; discovery stopped");
}

#[allow(clippy::too_many_arguments)]
async fn discover_sessions(
    players: &Arc<RwLock<HashMap<SessionId, PlayerHandle>>>,
    player_list: &Property<Vec<Arc<Player>>>,
    config: &Config,
    control: &Arc<dyn RemoteControl>,
    artwork: &Arc<dyn ArtworkSource>,
    browser: &Arc<dyn MediaBrowser>,
    feed: &SessionFeedReceiver,
    update: &SessionUpdate,
) {
    let Some(sessions) = update.sessions.as_ref() else {
        return;
    };

    let mut guard = players.write().await;
    let mut changed = false;

    for (session_id, snapshot) in sessions {
        if guard.contains_key(session_id) {
            continue;
        }

        if config.ignored_device_ids.contains(&snapshot.device_id)
            || config.ignored_clients.contains(&snapshot.client)
        {
            debug!(session = %session_id, client = %snapshot.client, "ignoring session");
            continue;
        }

        info!(
            session = %session_id,
            device = %snapshot.device_name,
            client = %snapshot.client,
            "discovered playback session"
        );

        let player = Arc::new(Player::new(
            session_id.clone(),
            snapshot,
            Arc::clone(control),
            Arc::clone(artwork),
            Arc::clone(browser),
        ));
        player.apply_update(update);

        let monitor = PlayerMonitor::start(Arc::clone(&player), feed.clone());
        guard.insert(
            session_id.clone(),
            PlayerHandle {
                player,
                _monitor: monitor,
            },
        );
        changed = true;
    }

    if changed {
        player_list.set(
            guard
                .values()
                .map(|handle| Arc::clone(&handle.player))
                .collect(),
        );
    }
}
