//! Data structures for YouTube Data API video metadata

use crate::utils::duration::IsoDuration;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Response of the `videos` list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

/// Metadata for one video. Fields the pipeline doesn't use are kept in
/// `extra` so templates can still reach them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    #[serde(default)]
    pub snippet: Option<Snippet>,
    #[serde(default)]
    pub content_details: Option<ContentDetails>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub thumbnails: HashMap<String, Thumbnail>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetails {
    /// ISO 8601 duration, e.g. `PT4M56S`
    #[serde(default)]
    pub duration: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VideoItem {
    pub fn title(&self) -> &str {
        self.snippet.as_ref().map(|s| s.title.as_str()).unwrap_or_default()
    }

    pub fn duration(&self) -> IsoDuration {
        self.content_details
            .as_ref()
            .map(|d| IsoDuration::parse(&d.duration))
            .unwrap_or_default()
    }

    /// Best available thumbnail, largest named size first
    pub fn thumbnail_url(&self) -> Option<&str> {
        let thumbnails = &self.snippet.as_ref()?.thumbnails;
        ["maxres", "standard", "high", "medium", "default"]
            .iter()
            .find_map(|size| thumbnails.get(*size))
            .map(|t| t.url.as_str())
    }
}

/// A video item plus the fields derived for rendering
#[derive(Debug, Clone)]
pub struct VideoData {
    pub item: VideoItem,
    pub playing_time: String,
    pub poster_id: String,
}

impl VideoData {
    pub fn new(item: VideoItem) -> Self {
        let playing_time = item.duration().to_display();
        let poster_id = poster_id(&item.id);
        Self {
            item,
            playing_time,
            poster_id,
        }
    }

    /// JSON object handed to templates: the API item with `_playingTime`
    /// and `_posterId` added
    pub fn template_data(&self) -> Value {
        let mut data = serde_json::to_value(&self.item).unwrap_or_else(|_| Value::Object(Map::new()));
        if let Value::Object(map) = &mut data {
            map.insert("_playingTime".into(), Value::String(self.playing_time.clone()));
            map.insert("_posterId".into(), Value::String(self.poster_id.clone()));
        }
        data
    }
}

/// Element id of the poster rendered for a video
pub fn poster_id(video_id: &str) -> String {
    format!("autotube-poster-{}", video_id)
}
