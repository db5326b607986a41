use super::domain::Language;
use super::loader::ContextLoader;
use super::merge::{merge, pre_render_context, RenderContext};
use super::naming::{derive_name, OutputName};
use super::output::{write_document, Compiler};
use super::render::DocumentRenderer;
use super::LetterError;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{info, warn};

/// Where sources come from, where output goes, and how it is compiled.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub context_dir: PathBuf,
    pub template_dir: PathBuf,
    pub template: String,
    pub render_dir: PathBuf,
    /// `None` stops after writing the `.tex` file.
    pub compiler: Option<Compiler>,
}

#[derive(Debug, Clone)]
pub struct GeneratedLetter {
    pub name: OutputName,
    pub tex_path: PathBuf,
    pub pdf_path: Option<PathBuf>,
}

pub struct CoverLetterPipeline {
    settings: PipelineSettings,
}

impl CoverLetterPipeline {
    pub fn new(settings: PipelineSettings) -> Self {
        Self { settings }
    }

    /// Loads every source for `language` and merges them.
    pub fn prepare(
        &self,
        language: Language,
        today: NaiveDate,
    ) -> Result<RenderContext, LetterError> {
        let loader = ContextLoader::new(&self.settings.context_dir);
        let sender = loader.load_sender()?;
        let position = loader.load_position()?;

        let variables = pre_render_context(&sender, &position, today)?;
        let text = loader.load_text(language, &variables)?;
        if text.language != language {
            warn!(
                requested = %language,
                declared = %text.language,
                "text source declares a different language; using the declared one"
            );
        }

        merge(&sender, &position, &text, today)
    }

    /// Output name for the letter without rendering or writing anything.
    pub fn plan(&self, language: Language, today: NaiveDate) -> Result<OutputName, LetterError> {
        let context = self.prepare(language, today)?;
        Ok(derive_name(&context))
    }

    pub fn generate(
        &self,
        language: Language,
        today: NaiveDate,
    ) -> Result<GeneratedLetter, LetterError> {
        let context = self.prepare(language, today)?;
        let name = derive_name(&context);

        let renderer =
            DocumentRenderer::from_dir(&self.settings.template_dir, &self.settings.template)?;
        let rendered = renderer.render(&context)?;
        let tex_path = write_document(&self.settings.render_dir, &name, &rendered)?;

        let pdf_path = match &self.settings.compiler {
            Some(compiler) => Some(compiler.compile(&tex_path)?.pdf_path),
            None => {
                info!("compilation disabled; leaving the .tex file for manual typesetting");
                None
            }
        };

        Ok(GeneratedLetter {
            name,
            tex_path,
            pdf_path,
        })
    }
}
