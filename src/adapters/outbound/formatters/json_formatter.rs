use crate::application::read_models::DetailView;
use crate::ports::outbound::DetailFormatter;
use crate::shared::Result;

/// JsonFormatter adapter emitting the read model as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailFormatter for JsonFormatter {
    fn format(&self, view: &DetailView) -> Result<String> {
        Ok(serde_json::to_string_pretty(view)?)
    }
}
