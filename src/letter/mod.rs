pub mod domain;
pub mod loader;
pub mod merge;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod render;

pub use domain::{
    Language, LetterIdentity, PositionContext, PositionToken, SenderContext, TextContext,
};
pub use loader::ContextLoader;
pub use merge::{merge, pre_render_context, RenderContext};
pub use naming::{derive_name, sanitize, OutputName};
pub use output::{write_document, CompileReport, Compiler};
pub use pipeline::{CoverLetterPipeline, GeneratedLetter, PipelineSettings};
pub use render::DocumentRenderer;

#[derive(Debug, thiserror::Error)]
pub enum LetterError {
    #[error("failed to load context source '{name}': {reason}")]
    ConfigLoad { name: String, reason: String },
    #[error("unsupported language '{0}', expected one of: en, de")]
    UnsupportedLanguage(String),
    #[error("failed to render template '{template}': {detail}")]
    TemplateRender { template: String, detail: String },
    #[error("unable to write '{}': {source}", path.display())]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("unable to start compiler '{program}': {source}")]
    CompilerSpawn {
        program: String,
        source: std::io::Error,
    },
    #[error("compiler '{program}' failed ({status})\n{excerpt}")]
    Compilation {
        program: String,
        status: String,
        excerpt: String,
    },
}

impl LetterError {
    pub(crate) fn config_load(
        name: impl std::fmt::Display,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::ConfigLoad {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Flattens a tera error and its sources into one line. Tera reports the
/// interesting part (e.g. the missing variable) in the source chain.
pub(crate) fn describe_error(err: &dyn std::error::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(cause) = current {
        parts.push(cause.to_string());
        current = cause.source();
    }
    parts.join(": ")
}
