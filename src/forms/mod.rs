//! Form definitions backing artist and event edits.

use thiserror::Error;
use validator::ValidationErrors;

pub mod artists;
pub mod events;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("formulaire invalide : {0}")]
    Validation(#[from] ValidationErrors),

    #[error("le libellé est vide")]
    InvalidLabel,

    #[error("date invalide : {0}")]
    InvalidDate(String),

    #[error("la date de fin précède la date de début")]
    InvalidDateRange,
}

/// Strips every tag from `raw`, dropping `<script>`/`<style>` content, and
/// returns the remaining text unescaped for storage as plain JSON.
pub(crate) fn plain_text(raw: &str) -> String {
    let cleaned = ammonia::Builder::empty()
        .add_clean_content_tags(["script", "style"])
        .clean(raw)
        .to_string();

    // Undo the text escaping of the HTML serializer; `&amp;` goes last.
    cleaned
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}
