//! Maps raw backend objects into well-formed domain entities.

use serde_json::Value;

use crate::domain::artist::Artist;
use crate::domain::event::Event;
use crate::domain::page::PaginatedResponse;
use crate::models::config::LabelsConfig;
use crate::validation::sanitize_string;

/// Builds entities from untyped JSON, substituting configured labels for
/// missing names. Every call produces fresh values.
#[derive(Clone, Debug)]
pub struct EntitySanitizer {
    unknown_artist: String,
    untitled_event: String,
}

impl EntitySanitizer {
    pub fn new(labels: &LabelsConfig) -> Self {
        Self {
            unknown_artist: labels.unknown_artist.clone(),
            untitled_event: labels.untitled_event.clone(),
        }
    }

    pub fn artist(&self, raw: &Value) -> Artist {
        Artist {
            id: sanitize_string(raw.get("id"), ""),
            label: sanitize_string(raw.get("label"), &self.unknown_artist),
        }
    }

    pub fn event(&self, raw: &Value) -> Event {
        let artists = match raw.get("artists") {
            Some(Value::Array(items)) => items.iter().map(|item| self.artist(item)).collect(),
            _ => Vec::new(),
        };

        Event {
            id: sanitize_string(raw.get("id"), ""),
            label: sanitize_string(raw.get("label"), &self.untitled_event),
            start_date: sanitize_string(raw.get("startDate"), ""),
            end_date: sanitize_string(raw.get("endDate"), ""),
            artists,
        }
    }

    /// Keeps the envelope of `response` and sanitizes each item.
    pub fn paginated<T>(
        &self,
        response: PaginatedResponse<Value>,
        item: impl Fn(&Self, &Value) -> T,
    ) -> PaginatedResponse<T> {
        response.map(|raw| item(self, &raw))
    }
}

/// Entities that can be built from a raw backend object.
pub trait FromRaw: Sized {
    fn from_raw(raw: &Value, sanitizer: &EntitySanitizer) -> Self;
}

impl FromRaw for Artist {
    fn from_raw(raw: &Value, sanitizer: &EntitySanitizer) -> Self {
        sanitizer.artist(raw)
    }
}

impl FromRaw for Event {
    fn from_raw(raw: &Value, sanitizer: &EntitySanitizer) -> Self {
        sanitizer.event(raw)
    }
}

impl FromRaw for Value {
    fn from_raw(raw: &Value, _sanitizer: &EntitySanitizer) -> Self {
        raw.clone()
    }
}
