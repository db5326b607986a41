use super::domain::{Language, PositionContext, SenderContext, TextContext};
use super::{describe_error, LetterError};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tracing::info;

const SENDER_FILE: &str = "sender_context.yml";
const POSITION_FILE: &str = "position_context.yml";

/// Reads the YAML context sources from one directory.
#[derive(Debug, Clone)]
pub struct ContextLoader {
    context_dir: PathBuf,
}

impl ContextLoader {
    pub fn new(context_dir: impl Into<PathBuf>) -> Self {
        Self {
            context_dir: context_dir.into(),
        }
    }

    pub fn sender_path(&self) -> PathBuf {
        self.context_dir.join(SENDER_FILE)
    }

    pub fn position_path(&self) -> PathBuf {
        self.context_dir.join(POSITION_FILE)
    }

    pub fn text_path(&self, language: Language) -> PathBuf {
        self.context_dir
            .join(format!("text_context_{}.yml", language.code()))
    }

    pub fn load_sender(&self) -> Result<SenderContext, LetterError> {
        let path = self.sender_path();
        let sender = parse_source(&read_source(&path)?, &path)?;
        info!(path = %path.display(), "loaded sender context");
        Ok(sender)
    }

    pub fn load_position(&self) -> Result<PositionContext, LetterError> {
        let path = self.position_path();
        let position = parse_source(&read_source(&path)?, &path)?;
        info!(path = %path.display(), "loaded position context");
        Ok(position)
    }

    /// Loads the text source for `language`. The raw file is a template:
    /// it is rendered with `variables` first and only then parsed as YAML.
    pub fn load_text(
        &self,
        language: Language,
        variables: &Map<String, Value>,
    ) -> Result<TextContext, LetterError> {
        let path = self.text_path(language);
        let raw = read_source(&path)?;

        let context = Context::from_serialize(variables)
            .map_err(|err| LetterError::config_load(path.display(), describe_error(&err)))?;
        let rendered = Tera::one_off(&raw, &context, false)
            .map_err(|err| LetterError::config_load(path.display(), describe_error(&err)))?;

        let text = parse_source(&rendered, &path)?;
        info!(path = %path.display(), %language, "loaded text context");
        Ok(text)
    }
}

fn read_source(path: &Path) -> Result<String, LetterError> {
    fs::read_to_string(path).map_err(|err| LetterError::config_load(path.display(), err))
}

fn parse_source<T: DeserializeOwned>(raw: &str, path: &Path) -> Result<T, LetterError> {
    serde_yaml::from_str(raw).map_err(|err| LetterError::config_load(path.display(), err))
}
