//! Recognizes YouTube links and extracts their video identifiers

use regex::Regex;
use std::sync::{LazyLock, OnceLock};
use tracing::debug;

/// URL shapes that carry a video identifier, in matching order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkShape {
    /// `https://www.youtube.com/watch?v=ID`
    Standard,
    /// `https://www.youtube.com/v/ID`
    Alternate,
    /// `https://youtu.be/ID`
    Short,
    /// `https://www.youtube.com/embed/ID`
    Embed,
}

impl LinkShape {
    pub const ALL: [LinkShape; 4] = [
        LinkShape::Standard,
        LinkShape::Alternate,
        LinkShape::Short,
        LinkShape::Embed,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            LinkShape::Standard => &STANDARD,
            LinkShape::Alternate => &ALTERNATE,
            LinkShape::Short => &SHORT,
            LinkShape::Embed => &EMBED,
        }
    }

    /// Video identifier if `url` has this shape
    pub fn capture(self, url: &str) -> Option<&str> {
        self.pattern()
            .captures(url)
            .and_then(|caps| caps.name("id"))
            .map(|m| m.as_str())
    }
}

static STANDARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://(?:www\.)?youtube\.com/watch\?v=(?P<id>[^?&#]+)")
        .expect("standard link pattern is valid")
});

static ALTERNATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://(?:www\.)?youtube\.com/v/(?P<id>[^/?&#]+)")
        .expect("alternate link pattern is valid")
});

static SHORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://youtu\.be/(?P<id>[^/?&#]+)").expect("short link pattern is valid")
});

static EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://(?:www\.)?youtube\.com/embed/(?P<id>[^/?&#]+)")
        .expect("embed link pattern is valid")
});

/// First matching shape and the identifier it captures
pub fn match_url(url: &str) -> Option<(LinkShape, &str)> {
    LinkShape::ALL
        .into_iter()
        .find_map(|shape| shape.capture(url).map(|id| (shape, id)))
}

/// Whether `url` is a recognized video link
pub fn is_video_link(url: &str) -> bool {
    match_url(url).is_some()
}

/// A link found in the host page. Links are immutable once scanned, so the
/// derived video identifier is computed at most once.
#[derive(Debug, Clone, Default)]
pub struct Link {
    href: String,
    text: Option<String>,
    video_id: OnceLock<String>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Video identifier, cached on the link after the first match
    pub fn video_id(&self) -> Option<&str> {
        if let Some(id) = self.video_id.get() {
            return Some(id.as_str());
        }

        let (shape, id) = match_url(&self.href)?;
        debug!("Matched {:?} link {}", shape, self.href);
        Some(self.video_id.get_or_init(|| id.to_string()).as_str())
    }

    pub fn is_video_link(&self) -> bool {
        self.video_id().is_some()
    }
}

/// Video identifier of `link`, or `None` if it isn't a recognized video link
pub fn extract_video_id(link: &Link) -> Option<String> {
    link.video_id().map(str::to_string)
}
