//! Poster pipeline: find video links, fetch their metadata, render posters
//! and start playback on click.

pub mod host;
pub mod options;

pub use host::{PageHost, PlayerRequest};
pub use options::{ClickHandler, Placer, PosterOptions, TemplateChoice};

use crate::extractor::{Link, MetadataSource, VideoData, VideoItem, YouTubeDataApi};
use crate::loader::{ApiLoader, HttpScriptInjector};
use crate::template::{
    EmbeddedTemplates, HttpTemplateFetcher, TemplateCache, TemplateFuture,
};
use crate::utils::config::AutotubeSettings;
use crate::utils::error::AutotubeError;
use anyhow::Result;
use futures::future::{self, FutureExt, TryFutureExt};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A link paired with the metadata of its video
#[derive(Debug, Clone)]
pub struct LinkedVideo {
    pub link: Link,
    pub data: VideoData,
}

/// A rendered poster for one link
#[derive(Debug, Clone)]
pub struct Poster {
    pub video_id: String,
    pub poster_id: String,
    pub markup: String,
    pub data: VideoData,
    pub placer: Option<Placer>,
    pub onclick: Option<ClickHandler>,
}

/// Composes link extraction, metadata, templates and the player API loader.
///
/// Every collaborator is passed in once; the API loader in particular should
/// be the single instance shared by everything that plays video.
pub struct Autotube {
    templates: Arc<TemplateCache>,
    api_loader: Arc<ApiLoader>,
    metadata: Arc<dyn MetadataSource>,
    host: Arc<dyn PageHost>,
}

impl Autotube {
    pub fn new(
        templates: Arc<TemplateCache>,
        api_loader: Arc<ApiLoader>,
        metadata: Arc<dyn MetadataSource>,
        host: Arc<dyn PageHost>,
    ) -> Self {
        Self {
            templates,
            api_loader,
            metadata,
            host,
        }
    }

    /// Wire up the HTTP-backed collaborators described by `settings`
    pub fn from_settings(
        settings: &AutotubeSettings,
        embedded: Arc<dyn EmbeddedTemplates>,
        host: Arc<dyn PageHost>,
    ) -> Result<Self, AutotubeError> {
        let fetcher = Arc::new(HttpTemplateFetcher::new(&settings.template_base_url)?);
        let templates = Arc::new(TemplateCache::new(embedded, fetcher));
        let api_loader = Arc::new(ApiLoader::new(
            settings.iframe_api_url.clone(),
            Arc::new(HttpScriptInjector::new()),
        ));
        let metadata = Arc::new(YouTubeDataApi::from_settings(settings)?);
        Ok(Self::new(templates, api_loader, metadata, host))
    }

    pub fn templates(&self) -> &Arc<TemplateCache> {
        &self.templates
    }

    pub fn api_loader(&self) -> &Arc<ApiLoader> {
        &self.api_loader
    }

    /// Fetch metadata for every video link in one request.
    ///
    /// Links that aren't video links, or whose video the endpoint doesn't
    /// return, are left out.
    pub async fn video_metadata(&self, links: &[Link]) -> Result<Vec<LinkedVideo>> {
        let mut ids: Vec<String> = Vec::new();
        for link in links {
            match link.video_id() {
                Some(id) if !ids.iter().any(|known| known == id) => ids.push(id.to_string()),
                Some(_) => {}
                None => debug!("Skipping non-video link {}", link.href()),
            }
        }

        debug!("Fetching metadata via {}", self.metadata.id());
        let items: HashMap<String, VideoItem> = self
            .metadata
            .fetch_videos(&ids)
            .await?
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();

        let videos = links
            .iter()
            .filter_map(|link| {
                let id = link.video_id()?;
                match items.get(id) {
                    Some(item) => Some(LinkedVideo {
                        link: link.clone(),
                        data: VideoData::new(item.clone()),
                    }),
                    None => {
                        warn!("No metadata returned for video {}", id);
                        None
                    }
                }
            })
            .collect();

        Ok(videos)
    }

    pub async fn video_posters(&self, links: &[Link], options: &PosterOptions) -> Result<Vec<Poster>> {
        self.video_posters_with(links, options, |_, _| {}).await
    }

    /// Render a poster per video link, place it through the host, then hand
    /// it to `on_poster`.
    ///
    /// Template resolution and the metadata request run concurrently. An
    /// unknown template identifier or malformed template text fails before
    /// any request is made.
    pub async fn video_posters_with<F>(
        &self,
        links: &[Link],
        options: &PosterOptions,
        mut on_poster: F,
    ) -> Result<Vec<Poster>>
    where
        F: FnMut(&Link, &Poster),
    {
        let template_ready = self.template(&options.template)?;
        let (template, videos) = futures::try_join!(
            template_ready.map_err(anyhow::Error::from),
            self.video_metadata(links)
        )?;

        let mut posters = Vec::with_capacity(videos.len());
        for LinkedVideo { link, data } in videos {
            let markup = template.render(&data.template_data());
            let poster = Poster {
                video_id: data.item.id.clone(),
                poster_id: data.poster_id.clone(),
                markup,
                data,
                placer: options.placer,
                onclick: options.onclick,
            };

            if let Some(placer) = poster.placer {
                self.host.place(&link, &poster, placer)?;
            }
            on_poster(&link, &poster);
            posters.push(poster);
        }

        info!("Rendered {} poster(s)", posters.len());
        Ok(posters)
    }

    /// Run the poster's click handler. Returns the player request when a
    /// player was created.
    pub async fn click(&self, poster: &Poster, options: &PosterOptions) -> Result<Option<PlayerRequest>> {
        match poster.onclick {
            Some(ClickHandler::ReplacePoster) => self.replace_poster(poster, options).await.map(Some),
            None => Ok(None),
        }
    }

    /// Load the player API, then put a player over the poster
    pub async fn replace_poster(&self, poster: &Poster, options: &PosterOptions) -> Result<PlayerRequest> {
        let api = self.api_loader.load().await?;

        let request = PlayerRequest {
            video_id: poster.video_id.clone(),
            target: format!("#{} {}", poster.poster_id, options.poster_selector),
            width: options.player_width,
            height: options.player_height,
        };
        info!("Creating player for {}", request.video_id);
        self.host.create_player(&api, &request)?;
        Ok(request)
    }

    fn template(&self, choice: &TemplateChoice) -> Result<TemplateFuture, AutotubeError> {
        match choice {
            TemplateChoice::Specifier(spec) => self.templates.resolve(spec),
            TemplateChoice::Renderer(template) => Ok(future::ready(Ok(template.clone())).boxed()),
        }
    }
}
