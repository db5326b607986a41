use super::domain::{LetterIdentity, PositionContext, SenderContext, TextContext};
use super::LetterError;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

const TODAY_FORMAT: &str = "%Y-%m-%d";
const START_DATE_FORMAT: &str = "%d.%m.%Y";

/// The single mapping handed to the document template.
///
/// Built by layering the sender, position, derived dates and text contexts,
/// in that order, at the top level. A key defined by a later layer replaces
/// the earlier value wholesale.
#[derive(Debug, Clone)]
pub struct RenderContext {
    values: Map<String, Value>,
    identity: LetterIdentity,
}

impl RenderContext {
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn identity(&self) -> &LetterIdentity {
        &self.identity
    }
}

/// Context used to render the templated text sources: everything except the
/// text itself.
pub fn pre_render_context(
    sender: &SenderContext,
    position: &PositionContext,
    today: NaiveDate,
) -> Result<Map<String, Value>, LetterError> {
    let mut values = Map::new();
    layer(&mut values, "sender context", sender)?;
    layer(&mut values, "position context", position)?;

    values.insert(
        "today".to_string(),
        Value::String(today.format(TODAY_FORMAT).to_string()),
    );
    values.insert(
        "start_date".to_string(),
        Value::String(sender.start_date_iso.format(START_DATE_FORMAT).to_string()),
    );

    Ok(values)
}

pub fn merge(
    sender: &SenderContext,
    position: &PositionContext,
    text: &TextContext,
    today: NaiveDate,
) -> Result<RenderContext, LetterError> {
    let mut values = pre_render_context(sender, position, today)?;
    layer(&mut values, "text context", text)?;

    debug!(keys = ?values.keys().collect::<Vec<_>>(), "merged render context");

    let identity = LetterIdentity::from_values(&values)?;
    Ok(RenderContext { values, identity })
}

fn layer<T: Serialize>(
    target: &mut Map<String, Value>,
    name: &str,
    source: &T,
) -> Result<(), LetterError> {
    match serde_json::to_value(source).map_err(|err| LetterError::config_load(name, err))? {
        Value::Object(entries) => {
            target.extend(entries);
            Ok(())
        }
        _ => Err(LetterError::config_load(name, "expected a mapping at the top level")),
    }
}
