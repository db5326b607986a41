use crate::config::ConfigError;
use crate::letter::LetterError;
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Letter(LetterError),
    Prompt(dialoguer::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Letter(err) => write!(f, "{}", err),
            AppError::Prompt(err) => write!(f, "prompt error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Letter(err) => Some(err),
            AppError::Prompt(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<LetterError> for AppError {
    fn from(value: LetterError) -> Self {
        Self::Letter(value)
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(value: dialoguer::Error) -> Self {
        Self::Prompt(value)
    }
}
