//! Adding events by conference day and time of day.

use chrono::{Days, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::colour::Colour;
use crate::error::{ScheduleError, ScheduleResult};
use crate::event::NewEvent;

/// Days an event can be scheduled on, in order.
pub const CONFERENCE_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Maps weekday names to the dates of the conference week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConferenceWeek {
    monday: NaiveDate,
}

impl ConferenceWeek {
    pub fn starting(monday: NaiveDate) -> Self {
        ConferenceWeek { monday }
    }

    pub fn date_of(&self, day: Weekday) -> Option<NaiveDate> {
        if !CONFERENCE_DAYS.contains(&day) {
            return None;
        }
        self.monday
            .checked_add_days(Days::new(u64::from(day.num_days_from_monday())))
    }

    /// `(name, date)` for every conference day, Monday first.
    pub fn days(&self) -> Vec<(Weekday, NaiveDate)> {
        CONFERENCE_DAYS
            .iter()
            .filter_map(|&d| self.date_of(d).map(|date| (d, date)))
            .collect()
    }
}

/// What an operator fills in to add an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddEventForm {
    pub title: String,
    /// Weekday name, e.g. "Monday" or "mon".
    pub day: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    #[serde(default)]
    pub colour: Option<String>,
}

impl AddEventForm {
    /// Check the form and turn it into a row ready for insertion.
    ///
    /// Nothing is sent to the store unless this succeeds.
    pub fn validate(&self, week: &ConferenceWeek) -> ScheduleResult<NewEvent> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ScheduleError::EmptyTitle);
        }

        let date = self
            .day
            .trim()
            .parse::<Weekday>()
            .ok()
            .and_then(|d| week.date_of(d))
            .ok_or_else(|| ScheduleError::UnknownDay(self.day.clone()))?;

        let start = parse_time(&self.start_time)?;
        let end = parse_time(&self.end_time)?;

        if end <= start {
            return Err(ScheduleError::EndNotAfterStart);
        }

        let colour = match self.colour.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => Colour::new(c),
            _ => Colour::default(),
        };

        Ok(NewEvent {
            title: title.to_string(),
            start: date.and_time(start),
            end: date.and_time(end),
            colour,
        })
    }
}

/// Parse `HH:MM`, dropping any seconds.
fn parse_time(s: &str) -> ScheduleResult<NaiveTime> {
    let s = s.trim();
    let time = NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| ScheduleError::InvalidTime(s.to_string()))?;

    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0)
        .ok_or_else(|| ScheduleError::InvalidTime(s.to_string()))
}
