//! Row normalization: one loosely-typed record in, one [`SensorFrame`] out.
//!
//! Field names are matched case-insensitively and each canonical field is
//! resolved through a fixed alias list. A candidate is only accepted when it
//! coerces to a finite, nonzero number; zero counts as absent, so a genuine
//! `timestamp_ms` of 0 falls through to `time_ms` or `t` when those are set.
//! Anything left unresolved becomes 0.

use std::collections::HashMap;

use serde_json::Value;

use crate::parsers::trim_padding;
use crate::parsers::types::{RawRecord, SensorChannel, SensorFrame};

/// Timestamp sources in precedence order, with their scale to milliseconds
const TIMESTAMP_SOURCES: &[(&str, f64)] = &[("timestamp_ms", 1.0), ("time_ms", 1.0), ("t", 1000.0)];

/// Case-insensitive lookup over a [`RawRecord`].
///
/// Built by lower-casing every key in enumeration order; when two keys
/// collapse to the same lower-case form the later one wins.
#[derive(Debug)]
pub struct LowercaseView<'a> {
    fields: HashMap<String, &'a Value>,
}

impl<'a> LowercaseView<'a> {
    pub fn new(raw: &'a RawRecord) -> Self {
        let mut fields = HashMap::with_capacity(raw.len());
        for (key, value) in raw.iter() {
            fields.insert(key.to_lowercase(), value);
        }
        Self { fields }
    }

    /// Look up a field by its lower-case name
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).copied()
    }

    /// First alias whose value coerces to a nonzero number, scaled
    fn first_usable(&self, candidates: &[(&str, f64)]) -> Option<f64> {
        candidates.iter().find_map(|(key, scale)| {
            coerce_number(self.get(key))
                .map(|n| n * scale)
                .filter(|n| *n != 0.0 && n.is_finite())
        })
    }

    /// Resolve a sensor channel through its alias list, defaulting to 0
    pub fn resolve(&self, channel: SensorChannel) -> f64 {
        channel
            .aliases()
            .iter()
            .find_map(|key| coerce_number(self.get(key)).filter(|n| *n != 0.0))
            .unwrap_or(0.0)
    }

    /// Resolve the frame timestamp in whole milliseconds, never negative
    pub fn timestamp_ms(&self) -> u64 {
        let ms = self.first_usable(TIMESTAMP_SOURCES).unwrap_or(0.0);
        // Float-to-int casts saturate, so huge values pin at u64::MAX
        ms.floor().max(0.0) as u64
    }
}

/// Coerce a raw value to a finite number.
///
/// Missing, null, empty and unparseable values give `None`, as do
/// booleans, arrays and objects. Strings are trimmed before parsing and may
/// be decimal or an unsigned `0x`/`0o`/`0b` integer literal.
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = trim_padding(s);
            s.parse::<f64>().ok().or_else(|| parse_radix_literal(s))?
        }
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => return None,
    };
    // f64 parsing accepts "inf" and "NaN"
    n.is_finite().then_some(n)
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let radix = match s.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    // from_str_radix would also take a sign
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(|n| n as f64)
}

/// Normalize one record at position `index` into a frame that owns it
pub fn normalize_row(raw: RawRecord, index: usize) -> SensorFrame {
    let (timestamp_ms, values) = {
        let view = LowercaseView::new(&raw);
        (view.timestamp_ms(), SensorChannel::ALL.map(|c| view.resolve(c)))
    };
    let [rpm, manifold_pressure, throttle_position, coolant_temp, intake_temp, air_fuel_ratio, battery_voltage] =
        values;

    SensorFrame {
        index,
        timestamp_ms,
        rpm,
        manifold_pressure,
        throttle_position,
        coolant_temp,
        intake_temp,
        air_fuel_ratio,
        battery_voltage,
        raw,
    }
}
