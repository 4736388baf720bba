//! Hours/minutes/seconds value shared by stored fields and the display

use std::fmt;
use serde::{Deserialize, Serialize};

use super::Field;

/// A time value split into hours, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hms {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Hms {
    pub const ZERO: Hms = Hms { hours: 0, minutes: 0, seconds: 0 };

    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self { hours, minutes, seconds }
    }

    /// Decompose a number of seconds by floor division; negative input yields zero
    pub fn from_seconds(total: i64) -> Self {
        let total = total.max(0);
        let (minutes, seconds) = (total / 60, total % 60);
        let (hours, minutes) = (minutes / 60, minutes % 60);
        Self {
            hours: hours.min(u32::MAX as i64) as u32,
            minutes: minutes as u32,
            seconds: seconds as u32,
        }
    }

    /// Decompose a millisecond span, flooring to whole seconds
    pub fn from_millis(total: i64) -> Self {
        Self::from_seconds(total.div_euclid(1000))
    }

    pub fn total_seconds(&self) -> i64 {
        self.hours as i64 * 3600 + self.minutes as i64 * 60 + self.seconds as i64
    }

    pub fn get(&self, field: Field) -> u32 {
        match field {
            Field::Hours => self.hours,
            Field::Minutes => self.minutes,
            Field::Seconds => self.seconds,
        }
    }

    pub fn set(&mut self, field: Field, value: u32) {
        match field {
            Field::Hours => self.hours = value,
            Field::Minutes => self.minutes = value,
            Field::Seconds => self.seconds = value,
        }
    }

    /// Bring every component into its editable range (hours mod 24, minutes/seconds mod 60)
    pub fn wrapped(&self) -> Self {
        Self {
            hours: self.hours % 24,
            minutes: self.minutes % 60,
            seconds: self.seconds % 60,
        }
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_seconds_floor_division() {
        assert_eq!(Hms::from_seconds(0), Hms::ZERO);
        assert_eq!(Hms::from_seconds(3661), Hms::new(1, 1, 1));
        assert_eq!(Hms::from_seconds(90_000), Hms::new(25, 0, 0));
        assert_eq!(Hms::from_seconds(-5), Hms::ZERO);
    }

    #[test]
    fn test_from_millis_floors() {
        assert_eq!(Hms::from_millis(4_999), Hms::new(0, 0, 4));
        assert_eq!(Hms::from_millis(800), Hms::ZERO);
        assert_eq!(Hms::from_millis(-200), Hms::ZERO);
    }

    #[test]
    fn test_display_and_wrap() {
        assert_eq!(Hms::new(1, 2, 3).to_string(), "01:02:03");
        assert_eq!(Hms::new(25, 0, 0).wrapped(), Hms::new(1, 0, 0));
        assert_eq!(Hms::new(123, 4, 5).to_string(), "123:04:05");
    }
}
