//! Static catalog of device and connection error codes.
//!
//! Codes are grouped by range:
//!
//! - `0x1000..=0x10FF` - Bluetooth discovery and scanning
//! - `0x1100..=0x11FF` - Connection and session
//! - `0x1200..=0x12FF` - Address format and input
//! - `0x1300..=0x13FF` - OS permissions
//! - `0x1F00..=0x1FFF` - Unknown/internal
//!
//! Message templates use `{name}` placeholders, filled by [`text`].

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;
use strum::{EnumIter, FromRepr, IntoStaticStr};
use thiserror::Error;

/// Key reported for codes missing from the catalog
pub const UNRECOGNIZED_KEY: &str = "UNRECOGNIZED";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder regex is valid"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, FromRepr, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum ErrorCode {
    BtNotPaired = 0x1001,
    ScanTimeout = 0x1002,
    NoDevicesFound = 0x1003,

    ConnectFailed = 0x1101,
    Disconnected = 0x1102,
    ReconnectAttemptsExceeded = 0x1103,

    AddrInvalid = 0x1201,
    AddrEmpty = 0x1202,

    OsPermission = 0x1301,

    Unknown = 0x1F01,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unrecognized error code {0:#06X}")]
pub struct UnknownErrorCode(pub u32);

impl TryFrom<u32> for ErrorCode {
    type Error = UnknownErrorCode;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        ErrorCode::from_repr(code).ok_or(UnknownErrorCode(code))
    }
}

/// Error families, by code range
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    Discovery,
    Connection,
    Address,
    Permission,
    Unknown,
}

impl ErrorCode {
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Stable identifier, e.g. `SCAN_TIMEOUT`
    pub fn key(&self) -> &'static str {
        self.into()
    }

    pub fn message_template(&self) -> &'static str {
        match self {
            ErrorCode::BtNotPaired => {
                "Bluetooth not paired. Pair ECUMaster in system settings first."
            }
            ErrorCode::ScanTimeout => "Scan timed out after {timeout} ms.",
            ErrorCode::NoDevicesFound => {
                "No devices found. Ensure the ECU is powered and discoverable."
            }
            ErrorCode::ConnectFailed => "Failed to connect to {target}. Try again.",
            ErrorCode::Disconnected => "Disconnected from ECU.",
            ErrorCode::ReconnectAttemptsExceeded => "Auto-reconnect failed after {tries} tries.",
            ErrorCode::AddrInvalid => "Invalid Bluetooth address format: {addr}.",
            ErrorCode::AddrEmpty => "Bluetooth address is required.",
            ErrorCode::OsPermission => "Bluetooth permission denied by the OS.",
            ErrorCode::Unknown => "Unknown error.",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            0x1000..=0x10FF => ErrorCategory::Discovery,
            0x1100..=0x11FF => ErrorCategory::Connection,
            0x1200..=0x12FF => ErrorCategory::Address,
            0x1300..=0x13FF => ErrorCategory::Permission,
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Full catalog entry, as reported by [`describe`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescription {
    pub code: u32,
    /// `0x` followed by upper-case hex digits
    pub hex: String,
    pub key: &'static str,
    /// Empty for unrecognized codes
    pub message_template: &'static str,
}

fn hex(code: u32) -> String {
    format!("0x{:X}", code)
}

pub fn exists(code: u32) -> bool {
    ErrorCode::from_repr(code).is_some()
}

/// Render the message for `code`, substituting `{name}` placeholders from
/// `params`. Placeholders with no matching param are left as written.
pub fn text(code: u32, params: &[(&str, &str)]) -> String {
    let Ok(error) = ErrorCode::try_from(code) else {
        return format!("Unrecognized error {}", hex(code));
    };

    PLACEHOLDER
        .replace_all(error.message_template(), |caps: &Captures| {
            params
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}

pub fn key(code: u32) -> &'static str {
    ErrorCode::from_repr(code).map_or(UNRECOGNIZED_KEY, |e| e.key())
}

pub fn describe(code: u32) -> ErrorDescription {
    let entry = ErrorCode::from_repr(code);
    ErrorDescription {
        code,
        hex: hex(code),
        key: entry.map_or(UNRECOGNIZED_KEY, |e| e.key()),
        message_template: entry.map_or("", |e| e.message_template()),
    }
}
