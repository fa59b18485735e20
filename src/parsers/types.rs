use serde::Serialize;
use serde_json::{Map, Value};

/// One loosely-typed source row: field name to raw scalar.
///
/// Keys keep their source spelling and enumeration order. Inserting a key
/// that already exists keeps its position and replaces the value, so the
/// later column or JSON key wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Entries in source enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Canonical sensor channels carried by every frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SensorChannel {
    Rpm,
    ManifoldPressure,
    ThrottlePosition,
    CoolantTemp,
    IntakeTemp,
    AirFuelRatio,
    BatteryVoltage,
}

impl SensorChannel {
    pub const ALL: [SensorChannel; 7] = [
        SensorChannel::Rpm,
        SensorChannel::ManifoldPressure,
        SensorChannel::ThrottlePosition,
        SensorChannel::CoolantTemp,
        SensorChannel::IntakeTemp,
        SensorChannel::AirFuelRatio,
        SensorChannel::BatteryVoltage,
    ];

    /// Lower-case source field names tried in order when resolving this channel
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            SensorChannel::Rpm => &["rpm"],
            SensorChannel::ManifoldPressure => &["map"],
            SensorChannel::ThrottlePosition => &["tps", "throttle"],
            SensorChannel::CoolantTemp => &["clt", "coolant"],
            SensorChannel::IntakeTemp => &["iat", "intake"],
            SensorChannel::AirFuelRatio => &["afr", "lambda"],
            SensorChannel::BatteryVoltage => &["volt", "batt"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SensorChannel::Rpm => "RPM",
            SensorChannel::ManifoldPressure => "Manifold Pressure",
            SensorChannel::ThrottlePosition => "Throttle Position",
            SensorChannel::CoolantTemp => "Coolant Temp",
            SensorChannel::IntakeTemp => "Intake Temp",
            SensorChannel::AirFuelRatio => "AFR",
            SensorChannel::BatteryVoltage => "Battery Voltage",
        }
    }

    /// Display unit. Values are passed through unconverted, so this is the
    /// unit the logging device is expected to write.
    pub fn unit(&self) -> &'static str {
        match self {
            SensorChannel::Rpm => "RPM",
            SensorChannel::ManifoldPressure => "kPa",
            SensorChannel::ThrottlePosition => "%",
            SensorChannel::CoolantTemp | SensorChannel::IntakeTemp => "°C",
            SensorChannel::AirFuelRatio => "AFR",
            SensorChannel::BatteryVoltage => "V",
        }
    }
}

/// One normalized telemetry sample
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorFrame {
    /// Zero-based position in the log
    pub index: usize,
    /// Source timestamp. Duplicates and out-of-order values are kept as-is.
    pub timestamp_ms: u64,
    pub rpm: f64,
    pub manifold_pressure: f64,
    pub throttle_position: f64,
    pub coolant_temp: f64,
    pub intake_temp: f64,
    pub air_fuel_ratio: f64,
    pub battery_voltage: f64,
    /// The record this frame was built from, with original key spelling
    pub raw: RawRecord,
}

impl SensorFrame {
    pub fn value(&self, channel: SensorChannel) -> f64 {
        match channel {
            SensorChannel::Rpm => self.rpm,
            SensorChannel::ManifoldPressure => self.manifold_pressure,
            SensorChannel::ThrottlePosition => self.throttle_position,
            SensorChannel::CoolantTemp => self.coolant_temp,
            SensorChannel::IntakeTemp => self.intake_temp,
            SensorChannel::AirFuelRatio => self.air_fuel_ratio,
            SensorChannel::BatteryVoltage => self.battery_voltage,
        }
    }
}

/// Parsed log: ordered frames plus the derived duration
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub frames: Vec<SensorFrame>,
    /// Timestamp of the last frame, or 0 for an empty log
    pub duration_ms: u64,
}

impl ParseResult {
    /// Build a result, deriving the duration from the last frame
    pub fn from_frames(frames: Vec<SensorFrame>) -> Self {
        let duration_ms = frames.last().map_or(0, |f| f.timestamp_ms);
        Self {
            frames,
            duration_ms,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Get data for a single channel, in frame order
    pub fn channel_data(&self, channel: SensorChannel) -> Vec<f64> {
        self.frames.iter().map(|f| f.value(channel)).collect()
    }

    /// Get frame timestamps as f64 seconds
    pub fn times_as_seconds(&self) -> Vec<f64> {
        self.frames
            .iter()
            .map(|f| f.timestamp_ms as f64 / 1000.0)
            .collect()
    }

    /// Frame shown at playback position `ms`: the last frame, in source
    /// order, whose timestamp is not after `ms`.
    pub fn find_frame_at(&self, ms: u64) -> Option<&SensorFrame> {
        self.frames.iter().rev().find(|f| f.timestamp_ms <= ms)
    }
}

/// Trait for log text readers
pub trait Parseable {
    /// Never fails: unusable input degrades to an empty result.
    fn parse(&self, text: &str) -> ParseResult;
}

/// Supported input formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Delimited,
}

impl LogFormat {
    pub fn name(&self) -> &'static str {
        match self {
            LogFormat::Json => "JSON array",
            LogFormat::Delimited => "Delimited text",
        }
    }
}
