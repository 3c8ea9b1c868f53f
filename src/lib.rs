//! Autotube library
//!
//! Finds YouTube links, renders posters for them from data-driven templates
//! and loads the IFrame player API once, on demand.

pub mod extractor;
pub mod loader;
pub mod poster;
pub mod template;
pub mod utils;

// Re-export main types for easier use
pub use extractor::{extract_video_id, is_video_link, HtmlDocument, Link, VideoData, VideoItem};
pub use loader::{ApiHandle, ApiLoader, LoadState, ReadinessPort};
pub use poster::{Autotube, ClickHandler, PageHost, Placer, Poster, PosterOptions};
pub use template::{compile, CompiledTemplate, TemplateCache};
pub use utils::{format_duration, parse_duration, AutotubeError, AutotubeSettings, IsoDuration};
