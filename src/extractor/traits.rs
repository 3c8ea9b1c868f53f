use crate::extractor::models::VideoItem;
use anyhow::Result;
use async_trait::async_trait;

/// Source of video metadata
///
/// Isolates the poster pipeline from the metadata endpoint so it can be
/// replaced in tests or pointed at a proxy.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Identifier of this source for logging
    fn id(&self) -> &'static str;

    /// Metadata for the given video identifiers. Items may come back in any
    /// order and unknown identifiers are simply absent.
    async fn fetch_videos(&self, video_ids: &[String]) -> Result<Vec<VideoItem>>;
}
