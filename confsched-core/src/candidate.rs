//! Update candidates emitted by the calendar after a drag or resize.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::{ScheduleError, ScheduleResult};
use crate::event::{EventId, parse_timestamp, timestamp};

/// Query parameter the calendar page has always used to hand back a move.
pub const QUERY_PARAM: &str = "updated_event";

/// New position of an event, not yet written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCandidate {
    pub id: EventId,
    #[serde(default)]
    pub title: String,
    #[serde(with = "timestamp")]
    pub start: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end: NaiveDateTime,
}

/// Body of the reschedule endpoint. The id comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct Reschedule {
    #[serde(default)]
    pub title: String,
    pub start: String,
    pub end: String,
}

impl Reschedule {
    pub fn into_candidate(self, id: EventId) -> ScheduleResult<UpdateCandidate> {
        Ok(UpdateCandidate {
            id,
            title: self.title,
            start: parse_field("start", &self.start)?,
            end: parse_field("end", &self.end)?,
        })
    }
}

fn parse_field(name: &str, value: &str) -> ScheduleResult<NaiveDateTime> {
    parse_timestamp(value)
        .ok_or_else(|| ScheduleError::InvalidCandidate(format!("{name} '{value}' is not a timestamp")))
}

impl UpdateCandidate {
    /// Decode the JSON object `{id, title, start, end}`.
    pub fn from_json(json: &str) -> ScheduleResult<Self> {
        serde_json::from_str(json).map_err(|e| ScheduleError::InvalidCandidate(e.to_string()))
    }

    /// Pull a candidate out of a raw (still percent-encoded) query string.
    ///
    /// `None` means no move is pending. Only the first occurrence of the
    /// parameter is considered.
    pub fn from_query(query: &str) -> Option<ScheduleResult<Self>> {
        form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .find(|(key, _)| *key == QUERY_PARAM)
            .map(|(_, value)| Self::from_json(&value))
    }

    /// The span the widget sent is not checked for ordering anywhere
    /// downstream; this only reports it.
    pub fn is_inverted(&self) -> bool {
        self.end <= self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_decodes_browser_payload() {
        // What the widget produces: string id, ISO instants with millis and Z.
        let query = "updated_event=%7B%22id%22%3A%2212%22%2C%22title%22%3A%22Keynote%22%2C%22start%22%3A%222025-12-01T10%3A00%3A00.000Z%22%2C%22end%22%3A%222025-12-01T11%3A00%3A00.000Z%22%7D";

        let candidate = UpdateCandidate::from_query(query).unwrap().unwrap();
        assert_eq!(candidate.id.as_str(), "12");
        assert_eq!(candidate.title, "Keynote");
        assert_eq!(candidate.start, at(10));
        assert_eq!(candidate.end, at(11));
    }

    #[test]
    fn test_numeric_id_accepted() {
        let c = UpdateCandidate::from_json(
            r#"{"id": 3, "title": "x", "start": "2025-12-01T10:00:00", "end": "2025-12-01T11:00:00"}"#,
        )
        .unwrap();
        assert_eq!(c.id.as_str(), "3");
    }

    #[test]
    fn test_absent_param_is_none() {
        assert!(UpdateCandidate::from_query("").is_none());
        assert!(UpdateCandidate::from_query("?week=2").is_none());
    }

    #[test]
    fn test_malformed_json_is_error() {
        let result = UpdateCandidate::from_query("updated_event=%7Bnot-json").unwrap();
        assert!(matches!(result, Err(ScheduleError::InvalidCandidate(_))));
    }

    #[test]
    fn test_missing_start_is_error() {
        let result = UpdateCandidate::from_json(r#"{"id": "1", "end": "2025-12-01T11:00:00"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_reserved_characters_in_title_survive_decoding() {
        let candidate = UpdateCandidate {
            id: EventId::from(5),
            title: "Q&A = fun?".into(),
            start: at(14),
            end: at(15),
        };

        let json = serde_json::to_string(&candidate).unwrap();
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(QUERY_PARAM, &json)
            .append_pair("week", "2")
            .finish();
        assert_eq!(UpdateCandidate::from_query(&query).unwrap().unwrap(), candidate);
    }

    #[test]
    fn test_reschedule_body_uses_path_id() {
        let body = Reschedule {
            title: "Talk".into(),
            start: "2025-12-01T10:00:00Z".into(),
            end: "2025-12-01T11:00:00Z".into(),
        };
        let c = body.into_candidate(EventId::from(9)).unwrap();
        assert_eq!(c.id.as_str(), "9");
        assert_eq!(c.start, at(10));
    }

    #[test]
    fn test_reschedule_bad_time_rejected() {
        let body = Reschedule {
            title: String::new(),
            start: "soon".into(),
            end: "2025-12-01T11:00:00Z".into(),
        };
        assert!(matches!(
            body.into_candidate(EventId::from(9)),
            Err(ScheduleError::InvalidCandidate(_))
        ));
    }

    #[test]
    fn test_inverted_span_detected() {
        let c = UpdateCandidate {
            id: EventId::from(1),
            title: String::new(),
            start: at(11),
            end: at(10),
        };
        assert!(c.is_inverted());
    }
}
