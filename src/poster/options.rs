//! Poster placement, click handling and the options tying them together

use crate::template::CompiledTemplate;
use crate::utils::config::AutotubeSettings;
use crate::utils::error::AutotubeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Where a rendered poster goes relative to its link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Placer {
    AppendToParent,
    AppendToLink,
    ReplaceLink,
}

impl Placer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placer::AppendToParent => "appendToParent",
            Placer::AppendToLink => "appendToLink",
            Placer::ReplaceLink => "replaceLink",
        }
    }
}

impl FromStr for Placer {
    type Err = AutotubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appendToParent" => Ok(Placer::AppendToParent),
            "appendToLink" => Ok(Placer::AppendToLink),
            "replaceLink" => Ok(Placer::ReplaceLink),
            _ => Err(AutotubeError::InvalidOption(format!(
                "Poster placer \"{}\" is not valid.",
                s
            ))),
        }
    }
}

impl fmt::Display for Placer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens when a poster is clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClickHandler {
    /// Load the player API and put a player over the poster
    ReplacePoster,
}

impl FromStr for ClickHandler {
    type Err = AutotubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "replacePoster" => Ok(ClickHandler::ReplacePoster),
            _ => Err(AutotubeError::InvalidOption(format!(
                "Click handler \"{}\" is not valid.",
                s
            ))),
        }
    }
}

/// Either a specifier for the template cache or a ready renderer
#[derive(Debug, Clone)]
pub enum TemplateChoice {
    Specifier(String),
    Renderer(Arc<CompiledTemplate>),
}

impl From<&str> for TemplateChoice {
    fn from(spec: &str) -> Self {
        TemplateChoice::Specifier(spec.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct PosterOptions {
    pub template: TemplateChoice,
    pub placer: Option<Placer>,
    pub onclick: Option<ClickHandler>,
    pub poster_selector: String,
    pub player_width: u32,
    pub player_height: u32,
}

impl PosterOptions {
    pub fn new(template: impl Into<TemplateChoice>) -> Self {
        let defaults = AutotubeSettings::default();
        Self {
            template: template.into(),
            placer: None,
            onclick: None,
            poster_selector: defaults.poster_selector,
            player_width: defaults.player_width,
            player_height: defaults.player_height,
        }
    }

    /// Options from settings; empty placer / click handler names disable them
    pub fn from_settings(settings: &AutotubeSettings) -> Result<Self, AutotubeError> {
        let placer = match settings.placer.as_str() {
            "" => None,
            name => Some(name.parse()?),
        };
        let onclick = match settings.onclick.as_str() {
            "" => None,
            name => Some(name.parse()?),
        };

        Ok(Self {
            template: TemplateChoice::Specifier(settings.template.clone()),
            placer,
            onclick,
            poster_selector: settings.poster_selector.clone(),
            player_width: settings.player_width,
            player_height: settings.player_height,
        })
    }

    pub fn with_placer(mut self, placer: Placer) -> Self {
        self.placer = Some(placer);
        self
    }

    pub fn with_onclick(mut self, handler: ClickHandler) -> Self {
        self.onclick = Some(handler);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("replaceLink".parse::<Placer>().unwrap(), Placer::ReplaceLink);
        assert_eq!(
            "replacePoster".parse::<ClickHandler>().unwrap(),
            ClickHandler::ReplacePoster
        );
    }

    #[test]
    fn test_unknown_names_rejected() {
        let err = "float".parse::<Placer>().unwrap_err();
        assert_eq!(err.to_string(), "Poster placer \"float\" is not valid.");
        let err = "explode".parse::<ClickHandler>().unwrap_err();
        assert_eq!(err.to_string(), "Click handler \"explode\" is not valid.");
    }

    #[test]
    fn test_from_settings() {
        let settings = AutotubeSettings {
            placer: String::new(),
            ..Default::default()
        };
        let options = PosterOptions::from_settings(&settings).unwrap();
        assert_eq!(options.placer, None);
        assert_eq!(options.onclick, Some(ClickHandler::ReplacePoster));
        assert_eq!((options.player_width, options.player_height), (640, 360));

        let bad = AutotubeSettings {
            onclick: "nope".into(),
            ..Default::default()
        };
        assert!(PosterOptions::from_settings(&bad).is_err());
    }

    #[test]
    fn test_serde_names_match_parse() {
        let json = serde_json::to_string(&Placer::AppendToLink).unwrap();
        assert_eq!(json, "\"appendToLink\"");
        assert_eq!(Placer::AppendToLink.to_string(), "appendToLink");
    }
}
