use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::DetailFormatter;

/// Factory for creating detail view formatters
///
/// Picks the formatter adapter for an output format so the CLI only deals
/// with the application-level [`OutputFormat`].
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Arguments
    /// * `format` - The output format to create a formatter for
    /// * `colored` - Whether the text formatter may emit ANSI colors
    pub fn create(format: OutputFormat, colored: bool) -> Box<dyn DetailFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextFormatter::new(colored)),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }
}
