//! Bounded wrap-around counter used to edit one hour/minute/second field

use std::{fmt, str::FromStr, time::Duration};
use serde::{Deserialize, Serialize};

/// Delay between the press and the first repeated step
pub const HOLD_START_DELAY: Duration = Duration::from_millis(350);
/// Delay between repeated steps once the fast phase is reached
pub const HOLD_REPEAT_DELAY: Duration = Duration::from_millis(100);

/// Which stored component an editor controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Hours, Field::Minutes, Field::Seconds];

    /// Number of distinct values the field can take
    pub fn interval(self) -> u32 {
        match self {
            Field::Hours => 24,
            Field::Minutes | Field::Seconds => 60,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Hours => "hours",
            Field::Minutes => "minutes",
            Field::Seconds => "seconds",
        })
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h" | "hour" | "hours" => Ok(Field::Hours),
            "m" | "min" | "minute" | "minutes" => Ok(Field::Minutes),
            "s" | "sec" | "second" | "seconds" => Ok(Field::Seconds),
            _ => Err(format!("Unknown field: {}", s)),
        }
    }
}

/// Step direction of an editor button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    fn delta(self) -> i64 {
        match self {
            Direction::Increase => 1,
            Direction::Decrease => -1,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "inc" | "increase" => Ok(Direction::Increase),
            "down" | "dec" | "decrease" => Ok(Direction::Decrease),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

/// An active press-and-hold. The generation identifies the press that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hold {
    pub direction: Direction,
    pub generation: u64,
}

/// Spinner state: a value kept in `[0, interval)` plus the held button, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEditor {
    value: u32,
    interval: u32,
    held: Option<Hold>,
    next_generation: u64,
}

impl FieldEditor {
    pub fn new(interval: u32) -> Self {
        Self {
            value: 0,
            interval: interval.max(1),
            held: None,
            next_generation: 0,
        }
    }

    pub fn for_field(field: Field) -> Self {
        Self::new(field.interval())
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn held(&self) -> Option<Hold> {
        self.held
    }

    /// Store `value mod interval`. Returns the new value only if it changed.
    pub fn set(&mut self, value: i64) -> Option<u32> {
        let wrapped = value.rem_euclid(self.interval as i64) as u32;
        if wrapped == self.value {
            return None;
        }
        self.value = wrapped;
        Some(wrapped)
    }

    pub fn step(&mut self, direction: Direction) -> Option<u32> {
        self.set(self.value as i64 + direction.delta())
    }

    pub fn increase(&mut self) -> Option<u32> {
        self.step(Direction::Increase)
    }

    pub fn decrease(&mut self) -> Option<u32> {
        self.step(Direction::Decrease)
    }

    /// Begin a press: cancel any previous hold, step once, and record a new hold.
    /// Returns the hold (for the repeat task) and the changed value, if any.
    pub fn press(&mut self, direction: Direction) -> (Hold, Option<u32>) {
        self.release();
        let changed = self.step(direction);
        self.next_generation += 1;
        let hold = Hold {
            direction,
            generation: self.next_generation,
        };
        self.held = Some(hold);
        (hold, changed)
    }

    /// One repeat tick. Steps only while the hold that spawned the tick is still current.
    pub fn repeat(&mut self, generation: u64) -> Option<u32> {
        match self.held {
            Some(hold) if hold.generation == generation => self.step(hold.direction),
            _ => None,
        }
    }

    pub fn is_held(&self, generation: u64) -> bool {
        matches!(self.held, Some(hold) if hold.generation == generation)
    }

    /// Button released or pointer left the control
    pub fn release(&mut self) {
        self.held = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_both_directions() {
        let mut editor = FieldEditor::new(60);
        assert_eq!(editor.decrease(), Some(59));
        assert_eq!(editor.increase(), Some(0));

        let mut hours = FieldEditor::for_field(Field::Hours);
        hours.set(23);
        assert_eq!(hours.increase(), Some(0));
    }

    #[test]
    fn test_value_stays_in_range_for_any_sequence() {
        for interval in [1u32, 2, 24, 60] {
            let mut editor = FieldEditor::new(interval);
            for i in 0..500i64 {
                if (i * 7) % 3 == 0 {
                    editor.decrease();
                } else {
                    editor.increase();
                }
                assert!(editor.value() < interval);
            }
            editor.set(-1_000_003);
            assert!(editor.value() < interval);
        }
    }

    #[test]
    fn test_set_reports_only_changes() {
        let mut editor = FieldEditor::new(60);
        assert_eq!(editor.set(5), Some(5));
        assert_eq!(editor.set(65), None);
        assert_eq!(editor.set(-1), Some(59));

        let mut single = FieldEditor::new(1);
        assert_eq!(single.increase(), None);
        assert_eq!(single.value(), 0);
    }

    #[test]
    fn test_press_steps_once_and_holds() {
        let mut editor = FieldEditor::new(60);
        let (hold, changed) = editor.press(Direction::Increase);
        assert_eq!(changed, Some(1));
        assert_eq!(editor.held(), Some(hold));

        assert_eq!(editor.repeat(hold.generation), Some(2));
        assert_eq!(editor.repeat(hold.generation), Some(3));
    }

    #[test]
    fn test_repeat_after_release_is_ignored() {
        let mut editor = FieldEditor::new(60);
        let (hold, _) = editor.press(Direction::Decrease);
        assert_eq!(editor.value(), 59);

        editor.release();
        assert_eq!(editor.repeat(hold.generation), None);
        assert_eq!(editor.value(), 59);
    }

    #[test]
    fn test_stale_generation_is_ignored_after_repress() {
        let mut editor = FieldEditor::new(24);
        let (first, _) = editor.press(Direction::Increase);
        let (second, _) = editor.press(Direction::Decrease);
        assert_ne!(first.generation, second.generation);
        assert_eq!(editor.value(), 0);

        assert_eq!(editor.repeat(first.generation), None);
        assert_eq!(editor.repeat(second.generation), Some(23));
    }

    #[test]
    fn test_parse_field_and_direction() {
        assert_eq!("min".parse::<Field>(), Ok(Field::Minutes));
        assert_eq!("Hours".parse::<Field>(), Ok(Field::Hours));
        assert!("days".parse::<Field>().is_err());
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Increase));
        assert!("sideways".parse::<Direction>().is_err());
    }
}
