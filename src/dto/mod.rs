//! View models handed to page-level route handlers.

pub mod page;
