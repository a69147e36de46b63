use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use validator::Validate;

use crate::domain::event::NewEvent;
use crate::forms::{FormError, plain_text};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for creating or updating an event.
pub struct EventForm {
    #[validate(length(min = 1, max = 255))]
    pub label: String,
    /// ISO-8601 date or date-time.
    pub start_date: String,
    /// ISO-8601 date or date-time, not before `start_date`.
    pub end_date: String,
}

/// Parses an ISO-8601 date (`2024-06-21`), local date-time
/// (`2024-06-21T18:00:00`) or offset date-time (`2024-06-21T18:00:00+02:00`).
fn parse_iso8601(value: &str) -> Result<NaiveDateTime, FormError> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.naive_utc());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(datetime);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| FormError::InvalidDate(value.to_string()))
}

impl TryFrom<EventForm> for NewEvent {
    type Error = FormError;

    fn try_from(form: EventForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let label = plain_text(form.label.trim());
        if label.trim().is_empty() {
            return Err(FormError::InvalidLabel);
        }

        let start_date = form.start_date.trim();
        let end_date = form.end_date.trim();
        if parse_iso8601(end_date)? < parse_iso8601(start_date)? {
            return Err(FormError::InvalidDateRange);
        }

        Ok(NewEvent::new(label, start_date, end_date))
    }
}
