use crate::api::RemoteControl;
use crate::error::PlayerError;
use crate::session::SessionId;

use super::projector::secs_to_ticks;
use super::state::Volume;

/// Playback command dispatch for a remote session.
///
/// Stateless pass-throughs: every call converts units where needed and
/// issues exactly one backend request. Nothing here touches player state;
/// a command's effect only shows up in the next coordinator push, and
/// failures propagate untouched to the caller.
pub(crate) struct Control;

impl Control {
    /// Seek to an absolute position in seconds.
    pub(crate) async fn seek(
        api: &dyn RemoteControl,
        session_id: &SessionId,
        position_secs: f64,
    ) -> Result<(), PlayerError> {
        api.remote_seek(session_id, secs_to_ticks(position_secs))
            .await
    }

    /// Pause playback.
    pub(crate) async fn pause(
        api: &dyn RemoteControl,
        session_id: &SessionId,
    ) -> Result<(), PlayerError> {
        api.remote_pause(session_id).await
    }

    /// Resume playback; the server calls this "unpause".
    pub(crate) async fn play(
        api: &dyn RemoteControl,
        session_id: &SessionId,
    ) -> Result<(), PlayerError> {
        api.remote_unpause(session_id).await
    }

    /// Toggle between playing and paused.
    pub(crate) async fn play_pause(
        api: &dyn RemoteControl,
        session_id: &SessionId,
    ) -> Result<(), PlayerError> {
        api.remote_play_pause(session_id).await
    }

    /// Stop playback.
    pub(crate) async fn stop(
        api: &dyn RemoteControl,
        session_id: &SessionId,
    ) -> Result<(), PlayerError> {
        api.remote_stop(session_id).await
    }

    /// Play a single item; no queueing of multiple items.
    pub(crate) async fn play_media(
        api: &dyn RemoteControl,
        session_id: &SessionId,
        media_id: &str,
    ) -> Result<(), PlayerError> {
        api.remote_play_media(session_id, &[media_id.to_owned()])
            .await
    }

    /// Set the volume, converting to the server's 0..100 range.
    pub(crate) async fn set_volume(
        api: &dyn RemoteControl,
        session_id: &SessionId,
        volume: Volume,
    ) -> Result<(), PlayerError> {
        api.remote_set_volume(session_id, volume.to_server_level())
            .await
    }

    /// Mute or unmute, dispatching to the matching backend call.
    pub(crate) async fn set_muted(
        api: &dyn RemoteControl,
        session_id: &SessionId,
        muted: bool,
    ) -> Result<(), PlayerError> {
        if muted {
            api.remote_mute(session_id).await
        } else {
            api.remote_unmute(session_id).await
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Records every backend call instead of issuing HTTP requests.
    #[derive(Default)]
    struct RecordingApi {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingApi {
        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn record(&self, call: String) -> Result<(), PlayerError> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                return Err(PlayerError::CommandRejected {
                    status: 500,
                    message: "boom".into(),
                });
            }
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RemoteControl for RecordingApi {
        async fn remote_seek(
            &self,
            session_id: &SessionId,
            position_ticks: i64,
        ) -> Result<(), PlayerError> {
            self.record(format!("seek {session_id} {position_ticks}"))
        }

        async fn remote_pause(&self, session_id: &SessionId) -> Result<(), PlayerError> {
            self.record(format!("pause {session_id}"))
        }

        async fn remote_unpause(&self, session_id: &SessionId) -> Result<(), PlayerError> {
            self.record(format!("unpause {session_id}"))
        }

        async fn remote_play_pause(&self, session_id: &SessionId) -> Result<(), PlayerError> {
            self.record(format!("play_pause {session_id}"))
        }

        async fn remote_stop(&self, session_id: &SessionId) -> Result<(), PlayerError> {
            self.record(format!("stop {session_id}"))
        }

        async fn remote_play_media(
            &self,
            session_id: &SessionId,
            item_ids: &[String],
        ) -> Result<(), PlayerError> {
            self.record(format!("play_media {session_id} {}", item_ids.join(",")))
        }

        async fn remote_set_volume(
            &self,
            session_id: &SessionId,
            level: u8,
        ) -> Result<(), PlayerError> {
            self.record(format!("set_volume {session_id} {level}"))
        }

        async fn remote_mute(&self, session_id: &SessionId) -> Result<(), PlayerError> {
            self.record(format!("mute {session_id}"))
        }

        async fn remote_unmute(&self, session_id: &SessionId) -> Result<(), PlayerError> {
            self.record(format!("unmute {session_id}"))
        }
    }

    fn session_id() -> SessionId {
        SessionId::new("SESSION-UUID")
    }

    #[tokio::test]
    async fn seek_converts_seconds_to_ticks() {
        let api = RecordingApi::default();

        Control::seek(&api, &session_id(), 1.5).await.unwrap();

        assert_eq!(api.calls(), vec!["seek SESSION-UUID 15000000"]);
    }

    #[tokio::test]
    async fn play_maps_to_unpause() {
        let api = RecordingApi::default();

        Control::play(&api, &session_id()).await.unwrap();
        Control::pause(&api, &session_id()).await.unwrap();
        Control::play_pause(&api, &session_id()).await.unwrap();
        Control::stop(&api, &session_id()).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![
                "unpause SESSION-UUID",
                "pause SESSION-UUID",
                "play_pause SESSION-UUID",
                "stop SESSION-UUID",
            ]
        );
    }

    #[tokio::test]
    async fn play_media_sends_a_single_item() {
        let api = RecordingApi::default();

        Control::play_media(&api, &session_id(), "ITEM-UUID")
            .await
            .unwrap();

        assert_eq!(api.calls(), vec!["play_media SESSION-UUID ITEM-UUID"]);
    }

    #[tokio::test]
    async fn set_volume_converts_to_server_range() {
        let api = RecordingApi::default();

        Control::set_volume(&api, &session_id(), Volume::new(0.5))
            .await
            .unwrap();

        assert_eq!(api.calls(), vec!["set_volume SESSION-UUID 50"]);
    }

    #[tokio::test]
    async fn set_muted_dispatches_per_flag() {
        let api = RecordingApi::default();

        Control::set_muted(&api, &session_id(), true).await.unwrap();
        Control::set_muted(&api, &session_id(), false)
            .await
            .unwrap();

        assert_eq!(api.calls(), vec!["mute SESSION-UUID", "unmute SESSION-UUID"]);
    }

    #[tokio::test]
    async fn backend_failures_propagate() {
        let api = RecordingApi::failing();

        let result = Control::pause(&api, &session_id()).await;

        assert!(matches!(
            result,
            Err(PlayerError::CommandRejected { status: 500, .. })
        ));
    }
}
