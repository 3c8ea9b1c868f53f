//! The page side of the poster pipeline

use crate::extractor::Link;
use crate::loader::ApiHandle;
use crate::poster::{Placer, Poster};
use anyhow::Result;
use serde::Serialize;

/// Arguments for a new player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    pub video_id: String,
    /// Selector of the element the player replaces
    pub target: String,
    pub width: u32,
    pub height: u32,
}

/// Page operations the pipeline delegates: inserting markup and creating
/// players once the API is ready
pub trait PageHost: Send + Sync {
    fn place(&self, link: &Link, poster: &Poster, placer: Placer) -> Result<()>;

    fn create_player(&self, api: &ApiHandle, request: &PlayerRequest) -> Result<()>;
}
