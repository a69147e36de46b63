//! Domain values exchanged with the artists/events backend.

pub mod artist;
pub mod event;
pub mod page;
