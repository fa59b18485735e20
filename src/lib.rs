//! KeyDash Log - ECU telemetry log normalization
//!
//! Turns raw ECU log text (comma-delimited with a header row, or a JSON array
//! of flat objects) with loosely named fields into a time-ordered sequence of
//! numeric sensor frames for charting and playback.
//!
//! ## Module Structure
//!
//! - [`parsers`] - Format detection and the delimited/JSON log readers
//! - [`normalize`] - Case-insensitive field resolution and numeric coercion
//! - [`duration`] - Clock-style duration formatting
//! - [`catalog`] - Static device/connection error-code catalog
//!
//! ```
//! let log = keydash_log::parse("timestamp_ms,rpm,map\n0,900,35\n65000,950,36");
//! assert_eq!(log.frames.len(), 2);
//! assert_eq!(keydash_log::format_duration(log.duration_ms), "01:05");
//! ```

pub mod catalog;
pub mod duration;
pub mod normalize;
pub mod parsers;

pub use duration::format_duration;
pub use normalize::normalize_row;
pub use parsers::{parse, ParseResult, RawRecord, SensorChannel, SensorFrame};
