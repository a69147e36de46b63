//! Configuration records shared across the crate.

pub mod config;
