//! View of a host page: its links and embedded template blocks

use crate::extractor::link::Link;
use crate::template::sources::EmbeddedTemplates;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct HtmlDocument {
    links: Vec<Link>,
    templates: HashMap<String, String>,
}

impl HtmlDocument {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let anchor_selector = selector("a[href]");
        let script_selector = selector("script[id]");

        let links: Vec<Link> = document
            .select(&anchor_selector)
            .filter_map(|anchor| {
                let link = Link::new(anchor.value().attr("href")?);
                let text = collapse_text(anchor);
                Some(if text.is_empty() {
                    link
                } else {
                    link.with_text(text)
                })
            })
            .collect();

        let templates: HashMap<String, String> = document
            .select(&script_selector)
            .filter(|script| is_template_type(script.value().attr("type")))
            .filter_map(|script| {
                let id = script.value().attr("id")?;
                Some((id.to_string(), script.text().collect::<String>()))
            })
            .collect();

        debug!(
            "Parsed document: {} link(s), {} template(s)",
            links.len(),
            templates.len()
        );
        Self { links, templates }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Links with a recognized video URL shape
    pub fn video_links(&self) -> Vec<Link> {
        self.links
            .iter()
            .filter(|link| link.is_video_link())
            .cloned()
            .collect()
    }

    pub fn template_ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

impl EmbeddedTemplates for HtmlDocument {
    fn lookup(&self, id: &str) -> Option<String> {
        self.templates.get(id).cloned()
    }
}

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

fn collapse_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_template_type(kind: Option<&str>) -> bool {
    kind.map(|t| {
        let t = t.to_ascii_lowercase();
        t.contains("template") || t == "text/html"
    })
    .unwrap_or(false)
}
