use super::LetterError;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Languages a cover letter can be written in. Each one has its own text
/// source (`text_context_<code>.yml`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    #[default]
    De,
}

impl Language {
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LetterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            _ => Err(LetterError::UnsupportedLanguage(value.trim().to_string())),
        }
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderDetails {
    pub first_name: String,
    pub last_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Contents of `sender_context.yml`: the applicant's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderContext {
    pub sender: SenderDetails,
    /// Earliest start date, `YYYY-MM-DD`.
    pub start_date_iso: NaiveDate,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientDetails {
    pub company: String,
    pub company_short: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Contents of `position_context.yml`: who the letter goes to and for what.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionContext {
    pub recipient: RecipientDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Unsolicited application, not tied to an advertised opening.
    #[serde(default)]
    pub initiative: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Localized letter body, parsed after its templating pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContext {
    pub language: Language,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionToken {
    Initiative,
    Named(String),
}

/// The fields of a merged context that identify one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterIdentity {
    pub first_name: String,
    pub last_name: String,
    pub company_short: String,
    pub position: PositionToken,
    pub language: Language,
}

#[derive(Deserialize)]
struct SenderName {
    first_name: String,
    last_name: String,
}

#[derive(Deserialize)]
struct RecipientName {
    company_short: String,
}

#[derive(Deserialize)]
struct IdentityFields {
    sender: SenderName,
    recipient: RecipientName,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    initiative: bool,
    language: Language,
}

impl LetterIdentity {
    pub(crate) fn from_values(values: &Map<String, Value>) -> Result<Self, LetterError> {
        let fields: IdentityFields = serde_json::from_value(Value::Object(values.clone()))
            .map_err(|err| LetterError::config_load("render context", err))?;

        let position = if fields.initiative {
            PositionToken::Initiative
        } else {
            match fields.position {
                Some(name) => PositionToken::Named(name),
                None => {
                    return Err(LetterError::config_load(
                        "render context",
                        "missing field `position` (required unless `initiative` is true)",
                    ))
                }
            }
        };

        Ok(Self {
            first_name: fields.sender.first_name,
            last_name: fields.sender.last_name,
            company_short: fields.recipient.company_short,
            position,
            language: fields.language,
        })
    }
}
