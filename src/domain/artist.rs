use serde::{Deserialize, Serialize};

/// Performer as shown in listings and attached to events.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Artist {
    pub id: String,
    pub label: String,
}

/// Payload sent to the backend when creating or renaming an artist.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NewArtist {
    pub label: String,
}

impl NewArtist {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into().trim().to_string(),
        }
    }
}
