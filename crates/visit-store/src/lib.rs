//! In-memory backend for the visit calendar.
//!
//! The host owns the visit list; [`MemoryStore`] keeps it in a `Vec` and can
//! load it from (and write it back to) a JSON array on disk.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryStore;

#[cfg(test)]
mod tests;
