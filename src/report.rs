//! # Location Report
//!
//! The output record of a successful decode: identity, validity, UTC
//! timestamp, position and motion, plus an open-ended attribute map for the
//! telemetry the wire carries alongside the fix.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Serialize;
use time::OffsetDateTime;

use crate::identity::DeviceId;

/// Attribute keys produced by the decoder.
pub mod keys {
    /// Number of satellites in the fix.
    pub const SATELLITES: &str = "sat";
    /// Horizontal dilution of precision.
    pub const HDOP: &str = "hdop";
    /// Cellular signal strength indicator.
    pub const GSM: &str = "gsm";
    /// Whether the terminal reports external power (power mode 2).
    pub const CHARGE: &str = "charge";
    /// Battery level as transmitted.
    pub const BATTERY: &str = "battery";
    /// First analog input reading.
    pub const ADC1: &str = "adc1";
    /// Second analog input reading.
    pub const ADC2: &str = "adc2";
    /// Odometer as transmitted.
    pub const ODOMETER: &str = "odometer";
    /// Digital input bitmask as transmitted.
    pub const INPUT: &str = "input";
}

/// A typed attribute value.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_owned())
    }
}

/// One decoded location report.
///
/// Exclusively owned by the caller once returned; the decoder keeps no
/// reference and never reuses an instance.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The resolved device handle.
    pub device: DeviceId,
    /// Whether the terminal reported a valid fix.
    pub valid: bool,
    /// Fix time as transmitted, interpreted as UTC.
    pub timestamp: OffsetDateTime,
    /// Latitude in signed decimal degrees, negative in the south.
    pub latitude: f64,
    /// Longitude in signed decimal degrees, negative in the west.
    pub longitude: f64,
    /// Speed in the unit the terminal transmits.
    pub speed: f64,
    /// Course over ground in degrees.
    pub course: f64,
    /// Telemetry keyed by the constants in [`keys`].
    pub attributes: BTreeMap<&'static str, AttributeValue>,
}

impl Report {
    /// Stores one attribute.
    pub fn set(&mut self, key: &'static str, value: impl Into<AttributeValue>) {
        self.attributes.insert(key, value.into());
    }

    /// Looks up one attribute.
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}
