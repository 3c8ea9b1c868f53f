//! Error handling for Autotube

use thiserror::Error;

/// Main error type for Autotube
#[derive(Debug, Error)]
pub enum AutotubeError {
    #[error("Template \"{template}\" failed to compile at offset {offset}: {reason}")]
    Compile {
        template: String,
        offset: usize,
        reason: String,
    },

    #[error("Template not found: \"{0}\". Use the id of an embedded template block or a path to an external HTML file containing the template.")]
    TemplateNotFound(String),

    #[error("Error fetching \"{resource}\": {reason}")]
    FetchFailure { resource: String, reason: String },

    #[error("Unable to load YouTube IFrame API: {0}")]
    ApiLoadFailure(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    InvalidOption(String),

    #[error("A YouTube Data API key is required to fetch video metadata")]
    MissingApiKey,
}

impl AutotubeError {
    pub(crate) fn compile(offset: usize, reason: impl Into<String>) -> Self {
        AutotubeError::Compile {
            template: String::new(),
            offset,
            reason: reason.into(),
        }
    }

    /// Name the template a compile error came from; other errors pass through
    pub(crate) fn in_template(self, name: impl Into<String>) -> Self {
        match self {
            AutotubeError::Compile { offset, reason, .. } => AutotubeError::Compile {
                template: name.into(),
                offset,
                reason,
            },
            other => other,
        }
    }

    pub(crate) fn fetch(resource: impl Into<String>, reason: impl ToString) -> Self {
        AutotubeError::FetchFailure {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AutotubeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_identifier() {
        let err = AutotubeError::TemplateNotFound("poster-template".to_string());
        assert!(err.to_string().contains("\"poster-template\""));
    }

    #[test]
    fn compile_error_names_template() {
        let err = AutotubeError::compile(3, "unclosed `{{=`").in_template("poster-card");
        assert_eq!(
            err.to_string(),
            "Template \"poster-card\" failed to compile at offset 3: unclosed `{{=`"
        );
    }

    #[test]
    fn fetch_failure_names_resource() {
        let err = AutotubeError::fetch("/templates/poster.html", "404 Not Found");
        assert_eq!(
            err.to_string(),
            "Error fetching \"/templates/poster.html\": 404 Not Found"
        );
    }
}
