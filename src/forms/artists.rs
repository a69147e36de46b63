use serde::Deserialize;
use validator::Validate;

use crate::domain::artist::NewArtist;
use crate::forms::{FormError, plain_text};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or renaming an artist.
pub struct ArtistForm {
    #[validate(length(min = 1, max = 255))]
    pub label: String,
}

impl TryFrom<ArtistForm> for NewArtist {
    type Error = FormError;

    /// Validates the form and strips markup from the label.
    fn try_from(form: ArtistForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let label = plain_text(form.label.trim());
        if label.trim().is_empty() {
            return Err(FormError::InvalidLabel);
        }
        Ok(NewArtist::new(label))
    }
}
