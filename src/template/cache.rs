//! Resolves template specifiers to compiled templates, memoizing by specifier

use crate::template::compiler::{compile, CompiledTemplate};
use crate::template::sources::{EmbeddedTemplates, TemplateFetcher};
use crate::utils::error::{AutotubeError, Result};
use futures::future::{self, BoxFuture, FutureExt};
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};
use tracing::{debug, error, info};

// HTML4 id names. HTML5 is laxer than any reasonable pattern.
static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9.:_-]*$").expect("identifier pattern is valid"));

/// Future yielding a compiled template
pub type TemplateFuture = BoxFuture<'static, Result<Arc<CompiledTemplate>>>;

/// What a specifier refers to, checked in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specifier<'a> {
    Identifier(&'a str),
    Path(&'a str),
    Literal(&'a str),
}

impl<'a> Specifier<'a> {
    pub fn classify(spec: &'a str) -> Self {
        if IDENTIFIER_PATTERN.is_match(spec) {
            Specifier::Identifier(spec)
        } else if spec.starts_with('/') {
            Specifier::Path(spec)
        } else {
            Specifier::Literal(spec)
        }
    }
}

type Entries = Arc<Mutex<HashMap<String, Arc<CompiledTemplate>>>>;

/// Process-wide template cache. Entries live as long as the cache.
pub struct TemplateCache {
    entries: Entries,
    embedded: Arc<dyn EmbeddedTemplates>,
    fetcher: Arc<dyn TemplateFetcher>,
}

impl TemplateCache {
    pub fn new(embedded: Arc<dyn EmbeddedTemplates>, fetcher: Arc<dyn TemplateFetcher>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            embedded,
            fetcher,
        }
    }

    /// Resolve a specifier to a compiled template.
    ///
    /// Cache hits, embedded identifiers and literal text are settled before
    /// this returns; an unknown identifier or a compile error in embedded or
    /// literal text fails here rather than through the future. Absolute paths
    /// are fetched when the future is polled and fail with `FetchFailure`.
    /// Literal text is never cached.
    pub fn resolve(&self, spec: &str) -> Result<TemplateFuture> {
        if let Some(template) = lock(&self.entries).get(spec) {
            debug!("Template cache hit: {}", spec);
            return Ok(ready(template.clone()));
        }

        match Specifier::classify(spec) {
            Specifier::Identifier(id) => {
                let text = self
                    .embedded
                    .lookup(id)
                    .ok_or_else(|| AutotubeError::TemplateNotFound(id.to_string()))?;
                let template = Arc::new(compile(&text).map_err(|e| e.in_template(id))?);
                lock(&self.entries).insert(id.to_string(), template.clone());
                debug!("Compiled embedded template {}", id);
                Ok(ready(template))
            }
            Specifier::Path(path) => Ok(self.fetch_and_compile(path.to_string())),
            Specifier::Literal(text) => Ok(ready(Arc::new(compile(text)?))),
        }
    }

    fn fetch_and_compile(&self, path: String) -> TemplateFuture {
        let fetcher = self.fetcher.clone();
        let entries = self.entries.clone();

        async move {
            info!("Fetching template {}", path);
            let text = fetcher.fetch(&path).await.map_err(|e| {
                error!("Error fetching template \"{}\": {}", path, e);
                AutotubeError::fetch(path.as_str(), e)
            })?;

            let template = Arc::new(compile(&text).map_err(|e| e.in_template(path.as_str()))?);
            lock(&entries).insert(path, template.clone());
            Ok(template)
        }
        .boxed()
    }

    pub fn contains(&self, spec: &str) -> bool {
        lock(&self.entries).contains_key(spec)
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn ready(template: Arc<CompiledTemplate>) -> TemplateFuture {
    future::ready(Ok(template)).boxed()
}

fn lock(entries: &Entries) -> MutexGuard<'_, HashMap<String, Arc<CompiledTemplate>>> {
    entries.lock().unwrap_or_else(|e| e.into_inner())
}
