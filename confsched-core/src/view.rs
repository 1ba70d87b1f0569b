//! What the calendar widget is given to draw.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use crate::config::{CalendarSettings, ScheduleConfig};
use crate::event::{Event, EventId, TIMESTAMP_FORMAT};

pub const GRID_VIEW: &str = "timeGridWeek";
pub const LIST_VIEW: &str = "listWeek";

/// Static display configuration for the time grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    pub initial_date: NaiveDate,
    pub slot_min_time: String,
    pub slot_max_time: String,
    pub locale: String,
    pub hour12: bool,
    pub list_breakpoint_px: u32,
}

impl CalendarView {
    pub fn new(initial_date: NaiveDate, settings: &CalendarSettings) -> Self {
        CalendarView {
            initial_date,
            slot_min_time: settings.slot_min_time.clone(),
            slot_max_time: settings.slot_max_time.clone(),
            locale: settings.locale.clone(),
            hour12: settings.hour12,
            list_breakpoint_px: settings.list_breakpoint_px,
        }
    }

    /// Opens on the conference week.
    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self::new(config.conference_week_start, &config.calendar)
    }

    /// Everything the widget needs: display options plus one entry per event.
    ///
    /// Stored times are naive, so the widget is pinned to UTC. That way the
    /// instants it emits after a drag come back as the same wall-clock time.
    pub fn feed(&self, events: &[Event]) -> CalendarFeed {
        let entries: Vec<CalendarEntry> = events.iter().map(CalendarEntry::from).collect();

        let options = json!({
            "locale": self.locale,
            "timeZone": "UTC",
            "initialView": GRID_VIEW,
            "initialDate": self.initial_date.format("%Y-%m-%d").to_string(),
            "editable": true,
            "selectable": true,
            "allDaySlot": false,
            "expandRows": true,
            "slotMinTime": self.slot_min_time,
            "slotMaxTime": self.slot_max_time,
            "eventTimeFormat": {
                "hour": "2-digit",
                "minute": "2-digit",
                "hour12": self.hour12,
            },
            "events": entries,
        });

        CalendarFeed {
            options,
            list_breakpoint_px: self.list_breakpoint_px,
        }
    }
}

/// One event as the widget expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub id: EventId,
    pub title: String,
    pub start: String,
    pub end: String,
    pub background_color: String,
    pub border_color: String,
    pub text_color: &'static str,
}

impl From<&Event> for CalendarEntry {
    fn from(event: &Event) -> Self {
        CalendarEntry {
            id: event.id.clone(),
            title: event.title.clone(),
            start: event.start.format(TIMESTAMP_FORMAT).to_string(),
            end: event.end.format(TIMESTAMP_FORMAT).to_string(),
            background_color: event.colour.to_string(),
            border_color: event.colour.to_string(),
            text_color: event.colour.contrast_text().css(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalendarFeed {
    pub options: serde_json::Value,
    pub list_breakpoint_px: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Colour;

    fn event(colour: &str) -> Event {
        let day = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        Event {
            id: EventId::from(1),
            title: "Keynote".into(),
            start: day.and_hms_opt(9, 0, 0).unwrap(),
            end: day.and_hms_opt(10, 0, 0).unwrap(),
            colour: Colour::new(colour),
        }
    }

    fn view() -> CalendarView {
        CalendarView::from_config(&ScheduleConfig::default())
    }

    #[test]
    fn test_entry_colours() {
        let dark_bg = CalendarEntry::from(&event("#000000"));
        assert_eq!(dark_bg.background_color, "#000000");
        assert_eq!(dark_bg.text_color, "white");

        let light_bg = CalendarEntry::from(&event("#FFFFFF"));
        assert_eq!(light_bg.text_color, "black");
    }

    #[test]
    fn test_feed_options() {
        let feed = view().feed(&[event("#4a90e2")]);
        let opts = &feed.options;

        assert_eq!(opts["initialView"], "timeGridWeek");
        assert_eq!(opts["initialDate"], "2025-12-01");
        assert_eq!(opts["slotMinTime"], "08:30:00");
        assert_eq!(opts["slotMaxTime"], "17:00:00");
        assert_eq!(opts["locale"], "en-gb");
        assert_eq!(opts["eventTimeFormat"]["hour12"], false);
        assert_eq!(opts["events"][0]["start"], "2025-12-01T09:00:00");
        assert_eq!(opts["events"][0]["textColor"], "black");
        assert_eq!(opts["events"][0]["id"], "1");
    }

    #[test]
    fn test_feed_is_deterministic() {
        let events = vec![event("#4a90e2")];
        assert_eq!(view().feed(&events).options, view().feed(&events).options);
    }

    #[test]
    fn test_feed_carries_list_breakpoint() {
        let feed = view().feed(&[]);
        assert_eq!(feed.list_breakpoint_px, 768);
        assert_eq!(feed.options["initialView"], GRID_VIEW);
    }
}
