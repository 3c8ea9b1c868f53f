pub mod document;
pub mod link;
pub mod models;
pub mod traits;
pub mod youtube_api;

pub use document::HtmlDocument;
pub use link::{extract_video_id, is_video_link, Link, LinkShape};
pub use models::{VideoData, VideoItem, VideoListResponse};
pub use traits::MetadataSource;
pub use youtube_api::YouTubeDataApi;
