use serde::Serialize;

use crate::models::config::PaginationConfig;

/// Parameters handed to a data source for one page request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationParams {
    /// Page index as sent to the backend (0-indexed).
    pub page: u64,
    pub size: u64,
    pub search: Option<String>,
}

/// Page and size after validation. `page` is client-facing (1-indexed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidatedPage {
    pub page: u64,
    pub size: u64,
}

/// Normalized pagination metadata of a loaded page.
///
/// `first` and `last` come from the backend and are not derived from `page`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub page: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
    pub total_elements: u64,
    pub size: u64,
}

/// Leading integer of `raw`, the way browsers parse query values:
/// `"12abc"` is `12`, `" -3"` is `-3`, `"abc"` has none.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Clamps raw `page`/`size` query values and converts page indexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationValidator {
    min_size: u64,
    max_size: u64,
    default_size: u64,
}

impl PaginationValidator {
    /// Expects `min_size <= default_size <= max_size`.
    pub fn new(min_size: u64, max_size: u64, default_size: u64) -> Self {
        Self {
            min_size,
            max_size,
            default_size,
        }
    }

    pub fn from_config(config: &PaginationConfig) -> Self {
        Self::new(config.min_size, config.max_size, config.default_size)
    }

    /// Never fails: unparsable or zero values fall back to page 1 and the
    /// default size, negative pages become 1 and sizes are clamped. Pages
    /// have no upper bound here.
    pub fn validate(&self, page_param: Option<&str>, size_param: Option<&str>) -> ValidatedPage {
        let page = page_param
            .and_then(parse_leading_int)
            .filter(|page| *page != 0)
            .unwrap_or(1)
            .max(1) as u64;

        let min = self.min_size as i64;
        let max = self.max_size.max(self.min_size) as i64;
        let size = size_param
            .and_then(parse_leading_int)
            .filter(|size| *size != 0)
            .unwrap_or(self.default_size as i64)
            .clamp(min, max) as u64;

        ValidatedPage { page, size }
    }

    pub fn to_api_page(page: u64) -> u64 {
        page.saturating_sub(1)
    }

    pub fn from_api_page(api_page: u64) -> u64 {
        api_page.saturating_add(1)
    }
}

/// Picks which page numbers pagination controls display.
pub trait PageRangeStrategy {
    /// Ascending, contiguous run within `1..=total_pages`, at most
    /// `max_visible` long.
    fn visible_pages(&self, current_page: u64, total_pages: u64, max_visible: u64) -> Vec<u64>;
}

/// Window centered on the current page, shifted to stay inside the range.
#[derive(Clone, Copy, Debug, Default)]
pub struct CenteredRange;

impl PageRangeStrategy for CenteredRange {
    fn visible_pages(&self, current_page: u64, total_pages: u64, max_visible: u64) -> Vec<u64> {
        if total_pages <= max_visible {
            return (1..=total_pages).collect();
        }
        if max_visible == 0 {
            return Vec::new();
        }

        let start = current_page.saturating_sub(max_visible / 2).max(1);
        let end = total_pages.min(start.saturating_add(max_visible - 1));
        let adjusted_start = end.saturating_sub(max_visible - 1).max(1);

        (adjusted_start..=end).collect()
    }
}

pub fn get_visible_pages(current_page: u64, total_pages: u64, max_visible: u64) -> Vec<u64> {
    CenteredRange.visible_pages(current_page, total_pages, max_visible)
}

/// Everything pagination controls need to render around a loaded page.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_elements: u64,
    pub size: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page: Option<u64>,
    pub next_page: Option<u64>,
    /// 1-based index of the first item on the page, 0 when empty.
    pub start_item: u64,
    pub end_item: u64,
    pub visible_pages: Vec<u64>,
}

impl PaginationInfo {
    pub fn new(state: &PaginationState, max_visible: u64) -> Self {
        Self::with_strategy(state, max_visible, &CenteredRange)
    }

    pub fn with_strategy(
        state: &PaginationState,
        max_visible: u64,
        strategy: &dyn PageRangeStrategy,
    ) -> Self {
        let current_page = state.page.max(1);
        let has_previous = current_page > 1;
        let has_next = current_page < state.total_pages;

        let offset = (current_page - 1).saturating_mul(state.size);
        let (start_item, end_item) = if state.total_elements == 0 || offset >= state.total_elements
        {
            (0, 0)
        } else {
            (
                offset + 1,
                offset.saturating_add(state.size).min(state.total_elements),
            )
        };

        Self {
            current_page,
            total_pages: state.total_pages,
            total_elements: state.total_elements,
            size: state.size,
            has_previous,
            has_next,
            previous_page: has_previous.then(|| current_page - 1),
            next_page: has_next.then(|| current_page + 1),
            start_item,
            end_item,
            visible_pages: strategy.visible_pages(current_page, state.total_pages, max_visible),
        }
    }
}
