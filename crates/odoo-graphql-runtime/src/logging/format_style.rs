use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, JsonSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Log output format style. Maps to a format from tracing-subscriber.
pub enum FormatStyle {
    #[default]
    /// Human-readable, single-line logs
    Full,
    /// Like `full`, optimized for short line lengths
    Compact,
    /// Newline-delimited json logs
    Json,
    /// Multi-line logs with source locations
    Pretty,
}
