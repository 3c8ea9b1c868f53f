pub mod cache;
pub mod compiler;
pub mod sources;

pub use cache::{Specifier, TemplateCache, TemplateFuture};
pub use compiler::{compile, CompiledTemplate};
pub use sources::{
    EmbeddedTemplates, HttpTemplateFetcher, NoEmbeddedTemplates, TemplateDirectory,
    TemplateFetcher,
};
