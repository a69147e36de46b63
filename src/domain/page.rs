use serde::{Deserialize, Serialize};

/// Page envelope returned by list endpoints. `number` is 0-indexed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
    pub size: u64,
    pub first: bool,
    pub last: bool,
}

impl<T> PaginatedResponse<T> {
    /// Keeps the envelope and replaces every item with `f(item)`.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            first: self.first,
            last: self.last,
        }
    }
}
