//! YouTube Data API v3 client for video metadata

use crate::extractor::models::{VideoItem, VideoListResponse};
use crate::extractor::traits::MetadataSource;
use crate::utils::config::AutotubeSettings;
use crate::utils::error::AutotubeError;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, error, info};

/// Fetches metadata from the `videos` endpoint in one batched request
#[derive(Debug, Clone)]
pub struct YouTubeDataApi {
    client: Client,
    api_url: String,
    api_key: String,
    part: String,
}

impl YouTubeDataApi {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>, part: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            part: part.into(),
        }
    }

    pub fn from_settings(settings: &AutotubeSettings) -> Result<Self, AutotubeError> {
        let key = settings.require_api_key()?;
        Ok(Self::new(&settings.api_url, key, &settings.part))
    }

    /// Request URL with `id`, `part` and `key` parameters
    pub fn request_url(&self, video_ids: &[String]) -> Result<Url, AutotubeError> {
        let ids = video_ids.join(",");
        Url::parse_with_params(
            &self.api_url,
            [
                ("id", ids.as_str()),
                ("part", self.part.as_str()),
                ("key", self.api_key.as_str()),
            ],
        )
        .map_err(|e| AutotubeError::InvalidUrl(format!("{}: {}", self.api_url, e)))
    }
}

#[async_trait]
impl MetadataSource for YouTubeDataApi {
    fn id(&self) -> &'static str {
        "youtube-data-api"
    }

    async fn fetch_videos(&self, video_ids: &[String]) -> Result<Vec<VideoItem>> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.request_url(video_ids)?;
        info!("Requesting metadata for {} video(s)", video_ids.len());

        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Metadata request failed: {}", e);
            AutotubeError::fetch(self.api_url.as_str(), e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Metadata request returned {}: {}", status, body);
            return Err(AutotubeError::fetch(self.api_url.as_str(), status).into());
        }

        let list: VideoListResponse = response.json().await?;
        debug!("Received {} item(s)", list.items.len());
        Ok(list.items)
    }
}
