pub mod delimited;
pub mod json;
pub mod types;

pub use delimited::DelimitedText;
pub use json::JsonArray;
pub use types::{LogFormat, Parseable, ParseResult, RawRecord, SensorChannel, SensorFrame};

/// Trim surrounding whitespace, counting a byte-order mark as whitespace.
pub(crate) fn trim_padding(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Decide how to read a log: `None` for blank input, JSON when the first
/// non-whitespace character is `[` or `{`, delimited text otherwise.
pub fn detect_format(text: &str) -> Option<LogFormat> {
    if JsonArray::detect(text) {
        Some(LogFormat::Json)
    } else if DelimitedText::detect(text) {
        Some(LogFormat::Delimited)
    } else {
        None
    }
}

/// Parse raw log text into frames. Never fails; unusable input gives an
/// empty result.
pub fn parse(text: &str) -> ParseResult {
    let trimmed = trim_padding(text);
    let Some(format) = detect_format(trimmed) else {
        return ParseResult::empty();
    };

    tracing::debug!("Detected {} log ({} bytes)", format.name(), trimmed.len());

    match format {
        LogFormat::Json => JsonArray.parse(trimmed),
        LogFormat::Delimited => DelimitedText.parse(trimmed),
    }
}
