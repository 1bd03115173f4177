//! # Disha Report Decoder
//!
//! Disha terminals transmit one `#`-delimited ASCII report per message:
//!
//! ```text
//!  $A#A#<imei>#<validity>#<hhmmss>#<ddmmyy>#<ddmm.mmmm>#<N|S>#<dddmm.mmmm>#<E|W>#
//!  <speed>#<course>#<satellites>#<hdop>#<gsm>#<power>#<battery>#<adc1>#<adc2>#
//!  <distance>#<odometer>#<inputs>*
//! ```
//!
//! Validity is one of `A` (valid), `V`, `M`, `X`; the date group is
//! day-month-year; coordinates are degrees and decimal minutes with a
//! hemisphere letter; power is `0`, `1` or `2` (external power); the daily
//! distance group is transmitted but carried by no report field; the digital
//! input bitmask runs up to the `*` terminator.

use std::collections::BTreeMap;

use crate::{
    error::DecodeError,
    grammar::{FieldSpec, Grammar},
    identity::IdentityResolver,
    report::{Report, keys},
};

use crate::grammar::FieldSpec::{Decimal, Digits, Literal, Number, OneOf, Run, Skip};

const MESSAGE: &[FieldSpec] = &[
    Literal("$A#A#"),
    Number, // terminal identifier
    Literal("#"),
    OneOf("AVMX"), // validity
    Literal("#"),
    Digits(2), // time
    Digits(2),
    Digits(2),
    Literal("#"),
    Digits(2), // date (ddmmyy)
    Digits(2),
    Digits(2),
    Literal("#"),
    Digits(2), // latitude
    Decimal,
    Literal("#"),
    OneOf("NS"),
    Literal("#"),
    Digits(3), // longitude
    Decimal,
    Literal("#"),
    OneOf("EW"),
    Literal("#"),
    Decimal, // speed
    Literal("#"),
    Decimal, // course
    Literal("#"),
    Number, // satellites
    Literal("#"),
    Decimal, // hdop
    Literal("#"),
    Number, // gsm
    Literal("#"),
    OneOf("012"), // power mode
    Literal("#"),
    Number, // battery
    Literal("#"),
    Number, // adc 1
    Literal("#"),
    Number, // adc 2
    Literal("#"),
    Skip(&Decimal), // day distance
    Literal("#"),
    Decimal, // odometer
    Literal("#"),
    Run("01"), // digital inputs
    Literal("*"),
];

/// Decoder for Disha location reports.
///
/// Compiles the message grammar once and holds the identity resolver; one
/// instance serves any number of messages and callers. Decoding is stateless
/// per invocation, so the decoder is safe to share across threads whenever
/// the resolver is.
#[derive(Debug, Clone)]
pub struct DishaDecoder<R> {
    grammar: Grammar,
    identity: R,
}

impl<R: IdentityResolver> DishaDecoder<R> {
    pub fn new(identity: R) -> Self {
        DishaDecoder {
            grammar: Grammar::compile(MESSAGE),
            identity,
        }
    }

    /// Decodes one framed message into a location report.
    ///
    /// Returns `Ok(None)` for the two expected rejections: text that does
    /// not match the grammar, and a well-formed message from a terminal the
    /// resolver does not know. `Err` is reserved for grammar/builder
    /// contract violations and never reflects bad input.
    pub fn decode(&self, message: &str) -> Result<Option<Report>, DecodeError> {
        let Some(mut captures) = self.grammar.captures(message) else {
            return Ok(None);
        };

        let Some(device) = self.identity.resolve(captures.next_str()?) else {
            return Ok(None);
        };

        let valid = captures.next_str()? == "A";

        let time = captures.next_time()?;
        let date = captures.next_date_reverse()?;
        let timestamp = date.with_time(time).assume_utc();

        let latitude = captures.next_coordinate()?;
        let longitude = captures.next_coordinate()?;
        let speed = captures.next_f64()?;
        let course = captures.next_f64()?;

        let mut report = Report {
            device,
            valid,
            timestamp,
            latitude,
            longitude,
            speed,
            course,
            attributes: BTreeMap::new(),
        };

        report.set(keys::SATELLITES, captures.next_str()?);
        report.set(keys::HDOP, captures.next_str()?);
        report.set(keys::GSM, captures.next_str()?);
        report.set(keys::CHARGE, captures.next_u8()? == 2);
        report.set(keys::BATTERY, captures.next_str()?);
        report.set(keys::ADC1, captures.next_i64()?);
        report.set(keys::ADC2, captures.next_i64()?);
        report.set(keys::ODOMETER, captures.next_str()?);
        report.set(keys::INPUT, captures.next_str()?);

        captures.finish()?;

        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        identity::{DeviceId, MemoryRegistry},
        report::AttributeValue,
    };

    const IMEI: &str = "123456789012345";

    fn decoder() -> DishaDecoder<MemoryRegistry> {
        let mut registry = MemoryRegistry::new();
        registry.insert(IMEI, DeviceId(1));
        DishaDecoder::new(registry)
    }

    fn message() -> String {
        format!(
            "$A#A#{IMEI}#A#143000#051120#2233.8840#N#11406.5680#E#12.5#270.0#08#1.2#23#2#83#512#256#45.6#12345.0#0101*"
        )
    }

    #[test]
    fn test_decode_full_report() {
        let report = decoder().decode(&message()).unwrap().unwrap();

        assert_eq!(report.device, DeviceId(1));
        assert!(report.valid);
        assert_eq!(report.latitude, 22.0 + 33.8840 / 60.0);
        assert_eq!(report.longitude, 114.0 + 6.5680 / 60.0);
        assert_eq!(report.speed, 12.5);
        assert_eq!(report.course, 270.0);

        assert_eq!(
            report.attribute(keys::SATELLITES),
            Some(&AttributeValue::Text("08".into()))
        );
        assert_eq!(
            report.attribute(keys::HDOP),
            Some(&AttributeValue::Text("1.2".into()))
        );
        assert_eq!(
            report.attribute(keys::GSM),
            Some(&AttributeValue::Text("23".into()))
        );
        assert_eq!(
            report.attribute(keys::BATTERY),
            Some(&AttributeValue::Text("83".into()))
        );
        assert_eq!(
            report.attribute(keys::ODOMETER),
            Some(&AttributeValue::Text("12345.0".into()))
        );
        assert_eq!(
            report.attribute(keys::INPUT),
            Some(&AttributeValue::Text("0101".into()))
        );
    }

    #[test]
    fn test_analog_inputs_keep_distinct_keys() {
        let report = decoder().decode(&message()).unwrap().unwrap();

        assert_eq!(
            report.attribute(keys::ADC1),
            Some(&AttributeValue::Integer(512))
        );
        assert_eq!(
            report.attribute(keys::ADC2),
            Some(&AttributeValue::Integer(256))
        );
    }

    #[test]
    fn test_timestamp_applies_reverse_date_convention() {
        // wire date 051120 is day 05, month 11, year 20
        let report = decoder().decode(&message()).unwrap().unwrap();

        let expected = time::Date::from_calendar_date(2020, time::Month::November, 5)
            .unwrap()
            .with_time(time::Time::from_hms(14, 30, 0).unwrap())
            .assume_utc();
        assert_eq!(report.timestamp, expected);
    }

    #[test]
    fn test_charge_follows_power_mode() {
        let charging = message();
        let report = decoder().decode(&charging).unwrap().unwrap();
        assert_eq!(
            report.attribute(keys::CHARGE),
            Some(&AttributeValue::Bool(true))
        );

        for mode in ["0", "1"] {
            let discharged = charging.replace("#2#83#", &format!("#{mode}#83#"));
            let report = decoder().decode(&discharged).unwrap().unwrap();
            assert_eq!(
                report.attribute(keys::CHARGE),
                Some(&AttributeValue::Bool(false))
            );
        }
    }

    #[test]
    fn test_validity_flag_mapping() {
        for (flag, valid) in [("A", true), ("V", false), ("M", false), ("X", false)] {
            let text = message().replacen("#A#143000#", &format!("#{flag}#143000#"), 1);
            let report = decoder().decode(&text).unwrap().unwrap();
            assert_eq!(report.valid, valid, "validity flag {flag}");
        }
    }

    #[test]
    fn test_southern_and_western_hemispheres_negate() {
        let text = message().replace("#N#", "#S#").replace("#E#", "#W#");
        let report = decoder().decode(&text).unwrap().unwrap();

        assert_eq!(report.latitude, -(22.0 + 33.8840 / 60.0));
        assert_eq!(report.longitude, -(114.0 + 6.5680 / 60.0));
    }

    #[test]
    fn test_unknown_terminal_yields_no_report() {
        let registry = MemoryRegistry::new();
        let decoder = DishaDecoder::new(registry);

        assert_eq!(decoder.decode(&message()), Ok(None));
    }
}
