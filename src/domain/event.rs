use serde::{Deserialize, Serialize};

use crate::domain::artist::Artist;

/// Event with its ISO-8601 date range and the artists performing at it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub label: String,
    pub start_date: String,
    pub end_date: String,
    pub artists: Vec<Artist>,
}

/// Payload sent to the backend when creating or updating an event.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub label: String,
    pub start_date: String,
    pub end_date: String,
}

impl NewEvent {
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into().trim().to_string(),
            start_date: start_date.into().trim().to_string(),
            end_date: end_date.into().trim().to_string(),
        }
    }
}
