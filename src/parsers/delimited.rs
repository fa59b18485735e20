//! Delimited-text log reader.
//!
//! Format: comma-separated, first non-blank line is the header. No quoting or
//! escaping: a comma inside a value shifts every following cell on that line.

use serde_json::Value;

use super::json::JsonArray;
use super::trim_padding;
use super::types::{Parseable, ParseResult, RawRecord, SensorFrame};
use crate::normalize::normalize_row;

const DELIMITER: char = ',';

/// Comma-delimited log reader
pub struct DelimitedText;

impl DelimitedText {
    /// Anything that does not open like JSON is read as delimited text
    pub fn detect(contents: &str) -> bool {
        !trim_padding(contents).is_empty() && !JsonArray::detect(contents)
    }

    /// Pair header tokens with cells. Short rows pad with empty strings,
    /// extra cells are dropped, duplicate headers keep the last column.
    fn build_record(headers: &[&str], line: &str) -> RawRecord {
        let mut cells = line.split(DELIMITER);
        let mut raw = RawRecord::new();
        for header in headers {
            let cell = cells.next().unwrap_or("");
            raw.insert(*header, Value::String(cell.to_string()));
        }
        raw
    }
}

impl Parseable for DelimitedText {
    fn parse(&self, text: &str) -> ParseResult {
        // Splitting on both \r and \n covers \r\n; the empty piece between
        // them is dropped with the other blank lines.
        let mut lines = text
            .split(['\r', '\n'])
            .filter(|line| !trim_padding(line).is_empty());

        let Some(header) = lines.next() else {
            return ParseResult::empty();
        };
        let headers: Vec<&str> = header.split(DELIMITER).map(trim_padding).collect();

        let frames: Vec<SensorFrame> = lines
            .enumerate()
            .map(|(index, line)| normalize_row(Self::build_record(&headers, line), index))
            .collect();

        tracing::info!(
            "Parsed delimited log: {} columns, {} frames",
            headers.len(),
            frames.len()
        );

        ParseResult::from_frames(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_delimited() {
        assert!(DelimitedText::detect("rpm,map\n1000,50"));
        assert!(DelimitedText::detect("  timestamp_ms,rpm"));
        assert!(!DelimitedText::detect("[{\"rpm\": 1}]"));
        assert!(!DelimitedText::detect("   \n  "));
        assert!(!DelimitedText::detect("\u{FEFF}\n"));
    }

    #[test]
    fn test_parse_delimited_log() {
        let log = DelimitedText.parse("rpm,map\n1000,50\n2000,60");

        assert_eq!(log.frames.len(), 2);
        assert_eq!(log.frames[0].rpm, 1000.0);
        assert_eq!(log.frames[1].rpm, 2000.0);
        assert_eq!(log.frames[0].manifold_pressure, 50.0);
        assert_eq!(log.frames[1].manifold_pressure, 60.0);
        assert_eq!(log.frames[0].timestamp_ms, 0);
        assert_eq!(log.frames[1].timestamp_ms, 0);
        assert_eq!(log.duration_ms, 0);
    }

    #[test]
    fn test_line_endings_and_blank_lines() {
        let sample = "timestamp_ms,rpm\r\n100,900\r\n\r\n   \n200,950\r300,1000\n";
        let log = DelimitedText.parse(sample);

        assert_eq!(log.frames.len(), 3);
        let indexes: Vec<usize> = log.frames.iter().map(|f| f.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert_eq!(log.frames[2].rpm, 1000.0);
        assert_eq!(log.duration_ms, 300);
    }

    #[test]
    fn test_header_only() {
        let log = DelimitedText.parse("rpm,map,tps");
        assert!(log.is_empty());
        assert_eq!(log.duration_ms, 0);
    }

    #[test]
    fn test_ragged_rows() {
        let log = DelimitedText.parse("rpm,map,tps\n1000\n2000,60,10,99,99");

        let short = &log.frames[0];
        assert_eq!(short.rpm, 1000.0);
        assert_eq!(short.manifold_pressure, 0.0);
        assert_eq!(short.raw.get("map"), Some(&json!("")));
        assert_eq!(short.raw.get("tps"), Some(&json!("")));

        let long = &log.frames[1];
        assert_eq!(long.throttle_position, 10.0);
        assert_eq!(long.raw.len(), 3);
    }

    #[test]
    fn test_headers_trimmed_cells_kept_raw() {
        let log = DelimitedText.parse(" RPM , Coolant \n 3000 , 85 ");
        let frame = &log.frames[0];

        assert_eq!(frame.rpm, 3000.0);
        assert_eq!(frame.coolant_temp, 85.0);
        assert_eq!(frame.raw.get("RPM"), Some(&json!(" 3000 ")));
    }

    #[test]
    fn test_byte_order_mark_trimmed_from_header() {
        let log = DelimitedText.parse("\u{FEFF}time_ms,rpm\n40,900");

        assert_eq!(log.frames[0].timestamp_ms, 40);
        assert_eq!(log.frames[0].raw.get("time_ms"), Some(&json!("40")));
    }

    #[test]
    fn test_duplicate_header_last_column_wins() {
        let log = DelimitedText.parse("rpm,map,rpm\n1000,50,3000");
        let frame = &log.frames[0];

        assert_eq!(frame.rpm, 3000.0);
        assert_eq!(frame.raw.len(), 2);
    }

    #[test]
    fn test_out_of_order_timestamps_preserved() {
        let log = DelimitedText.parse("time_ms,rpm\n500,1\n200,2\n200,3");
        let times: Vec<u64> = log.frames.iter().map(|f| f.timestamp_ms).collect();

        assert_eq!(times, vec![500, 200, 200]);
        assert_eq!(log.duration_ms, 200);
    }

    #[test]
    fn test_seconds_column() {
        let log = DelimitedText.parse("t,rpm\n0.5,1000\n1.75,1100");
        assert_eq!(log.frames[0].timestamp_ms, 500);
        assert_eq!(log.duration_ms, 1750);
    }
}
