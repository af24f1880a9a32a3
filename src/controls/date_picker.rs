//! Date picker control

use super::events::{ControlEvent, EventTargets};
use chrono::{DateTime, Duration, Utc};

/// What a picker step moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePickerMode {
    Time,
    #[default]
    Date,
    DateAndTime,
}

/// Picker over a point in time, stepped by the user from the keyboard
#[derive(Debug)]
pub struct DatePicker {
    date: DateTime<Utc>,
    pub mode: DatePickerMode,
    /// Minutes moved by one step in the time modes
    pub minute_interval: u32,
    pub minimum_date: Option<DateTime<Utc>>,
    pub maximum_date: Option<DateTime<Utc>>,
    targets: EventTargets,
}

impl Default for DatePicker {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl DatePicker {
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            date,
            mode: DatePickerMode::default(),
            minute_interval: 1,
            minimum_date: None,
            maximum_date: None,
            targets: EventTargets::default(),
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Set the date programmatically. Clamped to the bounds, queues nothing.
    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = self.clamp(date);
    }

    pub fn targets(&self) -> &EventTargets {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut EventTargets {
        &mut self.targets
    }

    /// Move by `units` steps as the user would. Queues a value change if the date moved.
    pub fn step(&mut self, units: i64) -> bool {
        let delta = match self.mode {
            DatePickerMode::Date => Duration::days(units),
            DatePickerMode::Time | DatePickerMode::DateAndTime => {
                Duration::minutes(units * i64::from(self.minute_interval.max(1)))
            }
        };
        let Some(moved) = self.date.checked_add_signed(delta) else {
            return false;
        };
        let moved = self.clamp(moved);
        if moved == self.date {
            return false;
        }
        self.date = moved;
        self.targets.send_action(ControlEvent::ValueChanged);
        true
    }

    fn clamp(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        let date = match self.minimum_date {
            Some(min) if date < min => min,
            _ => date,
        };
        match self.maximum_date {
            Some(max) if date > max => max,
            _ => date,
        }
    }
}
