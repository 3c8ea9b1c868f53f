//! Application configuration

use crate::utils::error::AutotubeError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings shared by the poster pipeline and the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutotubeSettings {
    /// YouTube Data API key
    pub api_key: Option<String>,

    /// Videos endpoint of the YouTube Data API
    pub api_url: String,

    /// Metadata parts requested for each video
    pub part: String,

    /// Script that bootstraps the IFrame player API
    pub iframe_api_url: String,

    /// Template specifier: embedded id, absolute path or literal text
    pub template: String,

    /// Origin used to fetch absolute-path templates
    pub template_base_url: String,

    /// Name of the poster placer
    pub placer: String,

    /// Name of the click handler
    pub onclick: String,

    /// Selector of the element inside a poster that the player replaces
    pub poster_selector: String,

    pub player_width: u32,
    pub player_height: u32,
}

impl Default for AutotubeSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://www.googleapis.com/youtube/v3/videos".to_string(),
            part: "snippet,contentDetails".to_string(),
            iframe_api_url: "https://www.youtube.com/iframe_api".to_string(),
            template: DEFAULT_POSTER_TEMPLATE.to_string(),
            template_base_url: "http://localhost".to_string(),
            placer: "appendToParent".to_string(),
            onclick: "replacePoster".to_string(),
            poster_selector: ".autotube-player".to_string(),
            player_width: 640,
            player_height: 360,
        }
    }
}

/// Poster markup used when no template is configured
pub const DEFAULT_POSTER_TEMPLATE: &str = r#"<div class="autotube-poster" id="{{=_posterId}}">
  <div class="autotube-player"><img src="{{=snippet.thumbnails.medium.url}}" alt="{{=snippet.title}}"></div>
  <p class="autotube-title">{{=snippet.title}} <span class="autotube-time">{{=_playingTime}}</span></p>
</div>"#;

impl AutotubeSettings {
    /// Load settings from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self, AutotubeError> {
        debug!("Loading settings from {:?}", path);
        let json = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        Ok(settings)
    }

    /// Load from the default location if a settings file exists there
    pub fn load_or_default() -> Result<Self, AutotubeError> {
        match default_settings_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn require_api_key(&self) -> Result<&str, AutotubeError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(AutotubeError::MissingApiKey)
    }
}

/// `<config dir>/autotube/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("autotube").join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AutotubeSettings::default();
        assert_eq!(config.part, "snippet,contentDetails");
        assert_eq!(config.player_width, 640);
        assert_eq!(config.player_height, 360);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_key": "abc", "placer": "replaceLink"}}"#).unwrap();

        let config = AutotubeSettings::load(file.path()).unwrap();
        assert_eq!(config.require_api_key().unwrap(), "abc");
        assert_eq!(config.placer, "replaceLink");
        assert_eq!(config.onclick, "replacePoster");
    }

    #[test]
    fn test_empty_key_is_missing() {
        let config = AutotubeSettings {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            config.require_api_key(),
            Err(AutotubeError::MissingApiKey)
        ));
    }
}
