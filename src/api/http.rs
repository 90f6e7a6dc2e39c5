use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::PlayerError;
use crate::session::SessionId;

use super::{ArtworkSource, ImageType, RemoteControl};

/// HTTP client for a Jellyfin server's session control API.
///
/// Authenticates with an already-provisioned access token; obtaining that
/// token is the caller's concern. Commands are single requests with no
/// retries, matching the fire-and-forget contract of [`RemoteControl`].
#[derive(Debug, Clone)]
pub struct JellyfinClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl JellyfinClient {
    /// Create a client for the given server base URL and access token.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::InvalidUrl`] when the URL does not parse and
    /// [`PlayerError::UnusableBaseUrl`] when it cannot carry path segments.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, PlayerError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(PlayerError::UnusableBaseUrl(base_url));
        }

        Ok(Self {
            http: Client::new(),
            base_url,
            token: token.into(),
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Constructor rejects cannot-be-a-base URLs, so this never fails.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn post(&self, url: Url, body: Option<serde_json::Value>) -> Result<(), PlayerError> {
        debug!(%url, "sending session command");

        let mut request = self.http.post(url).header(
            "Authorization",
            format!("MediaBrowser Token=\"{}\"", self.token),
        );
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlayerError::CommandRejected {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        Ok(())
    }

    /// Issue a play-state command (`Pause`, `Unpause`, `PlayPause`, `Stop`).
    async fn playstate(&self, session_id: &SessionId, command: &str) -> Result<(), PlayerError> {
        let url = self.url(&["Sessions", session_id.as_str(), "Playing", command]);
        self.post(url, None).await
    }

    /// Issue a general command with string arguments.
    async fn command(
        &self,
        session_id: &SessionId,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<(), PlayerError> {
        let url = self.url(&["Sessions", session_id.as_str(), "Command"]);
        self.post(url, Some(json!({ "Name": name, "Arguments": arguments })))
            .await
    }
}

#[async_trait]
impl RemoteControl for JellyfinClient {
    async fn remote_seek(
        &self,
        session_id: &SessionId,
        position_ticks: i64,
    ) -> Result<(), PlayerError> {
        let mut url = self.url(&["Sessions", session_id.as_str(), "Playing", "Seek"]);
        url.query_pairs_mut()
            .append_pair("seekPositionTicks", &position_ticks.to_string());
        self.post(url, None).await
    }

    async fn remote_pause(&self, session_id: &SessionId) -> Result<(), PlayerError> {
        self.playstate(session_id, "Pause").await
    }

    async fn remote_unpause(&self, session_id: &SessionId) -> Result<(), PlayerError> {
        self.playstate(session_id, "Unpause").await
    }

    async fn remote_play_pause(&self, session_id: &SessionId) -> Result<(), PlayerError> {
        self.playstate(session_id, "PlayPause").await
    }

    async fn remote_stop(&self, session_id: &SessionId) -> Result<(), PlayerError> {
        self.playstate(session_id, "Stop").await
    }

    async fn remote_play_media(
        &self,
        session_id: &SessionId,
        item_ids: &[String],
    ) -> Result<(), PlayerError> {
        let mut url = self.url(&["Sessions", session_id.as_str(), "Playing"]);
        url.query_pairs_mut()
            .append_pair("playCommand", "PlayNow")
            .append_pair("itemIds", &item_ids.join(","));
        self.post(url, None).await
    }

    async fn remote_set_volume(
        &self,
        session_id: &SessionId,
        level: u8,
    ) -> Result<(), PlayerError> {
        self.command(
            session_id,
            "SetVolume",
            json!({ "Volume": level.to_string() }),
        )
        .await
    }

    async fn remote_mute(&self, session_id: &SessionId) -> Result<(), PlayerError> {
        self.command(session_id, "Mute", json!({})).await
    }

    async fn remote_unmute(&self, session_id: &SessionId) -> Result<(), PlayerError> {
        self.command(session_id, "Unmute", json!({})).await
    }
}

impl ArtworkSource for JellyfinClient {
    fn artwork(&self, item_id: &str, image_type: ImageType, quality: u32) -> Url {
        let mut url = self.url(&["Items", item_id, "Images", image_type.as_str()]);
        url.query_pairs_mut()
            .append_pair("Quality", &quality.to_string());
        url
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(JellyfinClient::new("not a url", "token").is_err());
        assert!(JellyfinClient::new("mailto:admin@example.com", "token").is_err());
        assert!(JellyfinClient::new("http://localhost:8096", "token").is_ok());
    }

    #[test]
    fn artwork_url_shape() {
        let client = JellyfinClient::new("http://localhost:8096", "token").unwrap();

        let url = client.artwork("ITEM-UUID", ImageType::Backdrop, 100);

        assert_eq!(
            url.as_str(),
            "http://localhost:8096/Items/ITEM-UUID/Images/Backdrop?Quality=100"
        );
    }

    #[test]
    fn artwork_url_respects_base_path() {
        let client = JellyfinClient::new("http://example.com/jellyfin/", "token").unwrap();

        let url = client.artwork("ITEM-UUID", ImageType::Primary, 90);

        assert_eq!(
            url.as_str(),
            "http://example.com/jellyfin/Items/ITEM-UUID/Images/Primary?Quality=90"
        );
    }
}
