use serde::Serialize;

use crate::pagination::{PaginationInfo, PaginationState};

/// Renderable result of loading one page of a listing.
///
/// Serializes flat: `{items, page, size, totalPages, first, last,
/// totalElements, searchTerm?, errorMessage?}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T> {
    pub items: Vec<T>,
    #[serde(flatten)]
    pub pagination: PaginationState,
    /// `None` when the listing does not support search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    /// Set when the page degraded to the empty state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl<T> PageData<T> {
    pub fn is_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn info(&self, max_visible: u64) -> PaginationInfo {
        PaginationInfo::new(&self.pagination, max_visible)
    }
}
