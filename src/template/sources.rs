//! Where template text comes from
//!
//! Embedded templates are looked up synchronously by identifier; remote
//! templates are fetched asynchronously by absolute path.

use crate::utils::error::AutotubeError;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Lookup of template markup stored in the host document under an identifier
pub trait EmbeddedTemplates: Send + Sync {
    /// Returns the raw markup, or `None` if nothing is stored under `id`
    fn lookup(&self, id: &str) -> Option<String>;
}

/// Fetches template text by absolute path
#[async_trait]
pub trait TemplateFetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> anyhow::Result<String>;
}

impl EmbeddedTemplates for HashMap<String, String> {
    fn lookup(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

/// No embedded templates at all
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEmbeddedTemplates;

impl EmbeddedTemplates for NoEmbeddedTemplates {
    fn lookup(&self, _id: &str) -> Option<String> {
        None
    }
}

/// Templates stored as `<dir>/<id>.html`
#[derive(Debug, Clone)]
pub struct TemplateDirectory {
    root: PathBuf,
}

impl TemplateDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl EmbeddedTemplates for TemplateDirectory {
    fn lookup(&self, id: &str) -> Option<String> {
        // Identifiers may contain ':' which isn't portable in file names
        let file = self.root.join(format!("{}.html", id.replace(':', "_")));
        debug!("Looking up template {} at {:?}", id, file);
        std::fs::read_to_string(file).ok()
    }
}

/// Fetches templates over HTTP relative to a base origin
#[derive(Debug, Clone)]
pub struct HttpTemplateFetcher {
    client: Client,
    base_url: Url,
}

impl HttpTemplateFetcher {
    pub fn new(base_url: &str) -> Result<Self, AutotubeError> {
        let base_url =
            Url::parse(base_url).map_err(|e| AutotubeError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn resolve_url(&self, path: &str) -> Result<Url, AutotubeError> {
        self.base_url
            .join(path)
            .map_err(|e| AutotubeError::InvalidUrl(format!("{path}: {e}")))
    }
}

#[async_trait]
impl TemplateFetcher for HttpTemplateFetcher {
    async fn fetch(&self, path: &str) -> anyhow::Result<String> {
        let url = self.resolve_url(path)?;
        debug!("Fetching template from {}", url);

        let text = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(text)
    }
}
