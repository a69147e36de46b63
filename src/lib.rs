//! Client-side data layer for the artists and events backend: paginated
//! listings normalized into view models, CRUD services and navigation hrefs.

pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod navigation;
pub mod pagination;
pub mod query;
pub mod repository;
pub mod sanitizer;
pub mod services;
pub mod settings;
pub mod validation;

pub const ARTISTS_ENDPOINT: &str = "artists";
pub const EVENTS_ENDPOINT: &str = "events";
