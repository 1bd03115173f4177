//! # Capture Cursor
//!
//! The ordered captures of one successful grammar match, consumed strictly
//! left to right through typed reads. Each read advances the cursor by
//! exactly one capture (coordinates and calendar groups read several), and
//! [`Captures::finish`] checks that a builder consumed every capture its
//! grammar produced.

use std::str::FromStr;

use crate::{error::DecodeError, grammar::MAX_CAPTURES};

/// The captured substrings of one matched message.
///
/// Created per message by [`Grammar::captures`](crate::Grammar::captures) and
/// discarded once the report is built. Reads that run past the end, and
/// tokens that fail their typed conversion, surface as [`DecodeError`]
/// because they indicate a grammar/builder mismatch, not bad input.
#[derive(Debug)]
pub struct Captures<'a> {
    items: heapless::Vec<&'a str, MAX_CAPTURES>,
    cursor: usize,
}

impl<'a> Captures<'a> {
    pub(crate) fn new(items: heapless::Vec<&'a str, MAX_CAPTURES>) -> Self {
        Captures { items, cursor: 0 }
    }

    /// The number of captures not yet read.
    pub fn remaining(&self) -> usize {
        self.items.len() - self.cursor
    }

    /// Reads the next capture as-is.
    pub fn next_str(&mut self) -> Result<&'a str, DecodeError> {
        let item = self
            .items
            .get(self.cursor)
            .copied()
            .ok_or(DecodeError::CursorExhausted)?;
        self.cursor += 1;
        Ok(item)
    }

    fn convert<T: FromStr>(&mut self, expected: &'static str) -> Result<T, DecodeError> {
        let raw = self.next_str()?;
        raw.parse().map_err(|_| DecodeError::Conversion {
            value: raw.to_owned(),
            expected,
        })
    }

    /// Reads the next capture as a small unsigned integer.
    pub fn next_u8(&mut self) -> Result<u8, DecodeError> {
        self.convert("an 8-bit integer")
    }

    /// Reads the next capture as a signed integer.
    pub fn next_i64(&mut self) -> Result<i64, DecodeError> {
        self.convert("an integer")
    }

    /// Reads the next capture as a decimal number.
    pub fn next_f64(&mut self) -> Result<f64, DecodeError> {
        self.convert("a decimal number")
    }

    /// Reads a degrees capture, a minutes capture and a hemisphere capture,
    /// and combines them into signed decimal degrees.
    ///
    /// Southern and western hemispheres negate the value.
    pub fn next_coordinate(&mut self) -> Result<f64, DecodeError> {
        let degrees: f64 = self.convert("coordinate degrees")?;
        let minutes: f64 = self.convert("coordinate minutes")?;
        let hemisphere = self.next_str()?;

        let value = degrees + minutes / 60.0;
        match hemisphere {
            "N" | "E" => Ok(value),
            "S" | "W" => Ok(-value),
            _ => Err(DecodeError::Conversion {
                value: hemisphere.to_owned(),
                expected: "a hemisphere letter",
            }),
        }
    }

    /// Reads three two-digit captures as a time of day.
    pub fn next_time(&mut self) -> Result<time::Time, DecodeError> {
        let (hour, minute, second) = (self.next_u8()?, self.next_u8()?, self.next_u8()?);

        time::Time::from_hms(hour, minute, second).map_err(|_| DecodeError::Conversion {
            value: format!("{hour:02}{minute:02}{second:02}"),
            expected: "a time of day",
        })
    }

    /// Reads three two-digit captures transmitted in day, month, year order
    /// and assembles them as a calendar date with the day/month positions
    /// exchanged relative to a year-month-day reading: captures `05`, `11`,
    /// `20` become 2020-11-05.
    ///
    /// Two-digit years land in the 2000s.
    pub fn next_date_reverse(&mut self) -> Result<time::Date, DecodeError> {
        let (day, month, year) = (self.next_u8()?, self.next_u8()?, self.next_u8()?);

        let invalid = |_| DecodeError::Conversion {
            value: format!("{day:02}{month:02}{year:02}"),
            expected: "a calendar date",
        };

        let month = time::Month::try_from(month).map_err(invalid)?;
        time::Date::from_calendar_date(2000 + year as i32, month, day).map_err(invalid)
    }

    /// Closes the cursor, verifying that every capture was read.
    pub fn finish(self) -> Result<(), DecodeError> {
        match self.remaining() {
            0 => Ok(()),
            unread => Err(DecodeError::UnreadCaptures(unread)),
        }
    }
}
