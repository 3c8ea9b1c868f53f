//! Script injection collaborator

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Injects and executes a script. Success means the script ran without a
/// load error, not that the API it bootstraps is ready.
#[async_trait]
pub trait ScriptInjector: Send + Sync {
    async fn inject(&self, url: &str) -> Result<()>;
}

/// Headless injector: retrieves the script and treats a non-empty 2xx body
/// as a successful load
#[derive(Debug, Clone, Default)]
pub struct HttpScriptInjector {
    client: Client,
}

impl HttpScriptInjector {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScriptInjector for HttpScriptInjector {
    async fn inject(&self, url: &str) -> Result<()> {
        debug!("Retrieving script {}", url);
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if body.trim().is_empty() {
            return Err(anyhow!("script {} is empty", url));
        }
        Ok(())
    }
}
