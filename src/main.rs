//! Autotube - YouTube link posters from the command line
//!
//! Lists the video identifiers of YouTube links given as arguments or found
//! in an HTML document and, with a Data API key, renders a poster for each.

use anyhow::Result;
use autotube::extractor::{HtmlDocument, Link};
use autotube::loader::ApiHandle;
use autotube::poster::{
    Autotube, PageHost, Placer, PlayerRequest, Poster, PosterOptions, TemplateChoice,
};
use autotube::template::{EmbeddedTemplates, TemplateDirectory};
use autotube::utils::AutotubeSettings;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "autotube", version, about = "Find YouTube links and render posters for them")]
struct Args {
    /// Video URLs to inspect
    urls: Vec<String>,

    /// HTML document to scan for links and embedded templates
    #[arg(long)]
    document: Option<PathBuf>,

    /// Settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// YouTube Data API key; enables poster rendering
    #[arg(long)]
    api_key: Option<String>,

    /// Template specifier: embedded id, absolute path or literal text
    #[arg(long)]
    template: Option<String>,

    /// Directory holding templates named `<id>.html`
    #[arg(long)]
    templates_dir: Option<PathBuf>,
}

/// Writes placed posters to stdout
struct StdoutHost;

impl PageHost for StdoutHost {
    fn place(&self, link: &Link, poster: &Poster, placer: Placer) -> Result<()> {
        println!(
            "<!-- {} {} \"{}\" -->",
            placer,
            link.href(),
            poster.data.item.title()
        );
        if let Some(thumbnail) = poster.data.item.thumbnail_url() {
            debug!("Poster {} uses thumbnail {}", poster.poster_id, thumbnail);
        }
        println!("{}", poster.markup);
        Ok(())
    }

    fn create_player(&self, _api: &ApiHandle, request: &PlayerRequest) -> Result<()> {
        println!("{}", serde_json::to_string(request)?);
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut settings = match &args.config {
        Some(path) => AutotubeSettings::load(path)?,
        None => AutotubeSettings::load_or_default()?,
    };
    if let Some(key) = args.api_key {
        settings.api_key = Some(key);
    }
    if let Some(template) = args.template {
        settings.template = template;
    }

    let document = match &args.document {
        Some(path) => HtmlDocument::parse(&std::fs::read_to_string(path)?),
        None => HtmlDocument::default(),
    };

    debug!(
        "Embedded templates: {:?}",
        document.template_ids().collect::<Vec<_>>()
    );

    let mut links = document.video_links();
    links.extend(args.urls.iter().map(Link::new));

    for link in &links {
        match link.video_id() {
            Some(id) => println!("{}\t{}", id, link.href()),
            None => eprintln!("Not a YouTube video link: {}", link.href()),
        }
    }

    if settings.api_key.is_none() {
        info!("No API key configured, skipping posters");
        return Ok(());
    }

    let embedded: Arc<dyn EmbeddedTemplates> = match args.templates_dir {
        Some(dir) => Arc::new(TemplateDirectory::new(dir)),
        None => Arc::new(document),
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(render_posters(settings, embedded, links))
}

async fn render_posters(
    settings: AutotubeSettings,
    embedded: Arc<dyn EmbeddedTemplates>,
    links: Vec<Link>,
) -> Result<()> {
    let autotube = Autotube::from_settings(&settings, embedded, Arc::new(StdoutHost))?;

    let mut options = PosterOptions::from_settings(&settings)?;
    if options.placer.is_none() {
        // Still show the markup when placement is disabled
        options.placer = Some(Placer::AppendToParent);
    }
    if let TemplateChoice::Specifier(spec) = &options.template {
        info!("Using template {:?}", spec);
    }

    let posters = autotube.video_posters(&links, &options).await?;
    info!("{} poster(s) for {} link(s)", posters.len(), links.len());
    Ok(())
}
