use std::env;
use std::fmt;
use std::path::PathBuf;

const CONTEXT_DIR: &str = "COVER_LETTER_CONTEXT_DIR";
const TEMPLATE_DIR: &str = "COVER_LETTER_TEMPLATE_DIR";
const TEMPLATE: &str = "COVER_LETTER_TEMPLATE";
const RENDER_DIR: &str = "COVER_LETTER_RENDER_DIR";
const COMPILER: &str = "COVER_LETTER_COMPILER";
const COMPILE: &str = "COVER_LETTER_COMPILE";
const LOG_LEVEL: &str = "COVER_LETTER_LOG_LEVEL";

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub letter: LetterConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let letter = LetterConfig {
            context_dir: PathBuf::from(non_empty(CONTEXT_DIR, "context")?),
            template_dir: PathBuf::from(non_empty(TEMPLATE_DIR, "templates")?),
            template: non_empty(TEMPLATE, "cover_letter_template.tex.tera")?,
            render_dir: PathBuf::from(non_empty(RENDER_DIR, "renders")?),
            compiler: non_empty(COMPILER, "lualatex")?,
            compile: parse_flag(COMPILE, true)?,
        };

        let log_level = env::var(LOG_LEVEL).unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            letter,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Locations of the letter sources and outputs.
#[derive(Debug, Clone)]
pub struct LetterConfig {
    pub context_dir: PathBuf,
    pub template_dir: PathBuf,
    pub template: String,
    pub render_dir: PathBuf,
    pub compiler: String,
    pub compile: bool,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

fn non_empty(key: &'static str, default: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::Empty { key }),
        Ok(value) => Ok(value.trim().to_string()),
        Err(_) => Ok(default.to_string()),
    }
}

fn parse_flag(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Ok(value) = env::var(key) else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { key, value }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Empty { key: &'static str },
    InvalidFlag { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Empty { key } => write!(f, "{key} must not be empty"),
            ConfigError::InvalidFlag { key, value } => {
                write!(f, "{key} must be true or false (found '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            CONTEXT_DIR,
            TEMPLATE_DIR,
            TEMPLATE,
            RENDER_DIR,
            COMPILER,
            COMPILE,
            LOG_LEVEL,
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.letter.context_dir, PathBuf::from("context"));
        assert_eq!(config.letter.template_dir, PathBuf::from("templates"));
        assert_eq!(config.letter.template, "cover_letter_template.tex.tera");
        assert_eq!(config.letter.render_dir, PathBuf::from("renders"));
        assert_eq!(config.letter.compiler, "lualatex");
        assert!(config.letter.compile);
        assert_eq!(config.telemetry.log_level, "warn");
    }

    #[test]
    fn env_overrides_defaults() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(RENDER_DIR, "out");
        env::set_var(COMPILER, "xelatex");
        env::set_var(COMPILE, "off");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.letter.render_dir, PathBuf::from("out"));
        assert_eq!(config.letter.compiler, "xelatex");
        assert!(!config.letter.compile);
        reset_env();
    }

    #[test]
    fn rejects_invalid_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(COMPILE, "sometimes");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidFlag { key: COMPILE, .. })
        ));

        reset_env();
        env::set_var(CONTEXT_DIR, "  ");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::Empty { key: CONTEXT_DIR })
        ));
        reset_env();
    }
}
