use super::merge::RenderContext;
use super::{describe_error, LetterError};
use std::path::Path;
use tera::{Context, Tera};

/// Renders the LaTeX document template. Autoescaping is off; the output is
/// TeX, not HTML.
#[derive(Debug)]
pub struct DocumentRenderer {
    tera: Tera,
    template: String,
}

impl DocumentRenderer {
    pub fn from_dir(template_dir: &Path, template: &str) -> Result<Self, LetterError> {
        let path = template_dir.join(template);
        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        tera.add_template_file(&path, Some(template))
            .map_err(|err| LetterError::TemplateRender {
                template: path.display().to_string(),
                detail: describe_error(&err),
            })?;

        Ok(Self {
            tera,
            template: template.to_string(),
        })
    }

    pub fn from_source(template: &str, source: &str) -> Result<Self, LetterError> {
        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        tera.add_raw_template(template, source)
            .map_err(|err| LetterError::TemplateRender {
                template: template.to_string(),
                detail: describe_error(&err),
            })?;

        Ok(Self {
            tera,
            template: template.to_string(),
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Fails when the template dereferences a key the context lacks.
    pub fn render(&self, context: &RenderContext) -> Result<String, LetterError> {
        let render_error = |err: tera::Error| LetterError::TemplateRender {
            template: self.template.clone(),
            detail: describe_error(&err),
        };

        let context = Context::from_serialize(context.values()).map_err(render_error)?;
        self.tera.render(&self.template, &context).map_err(render_error)
    }
}
