//! Domain layer for the campusnotes backend.
//!
//! Zero internal dependencies so it can be used by both the repository layer
//! and the API crate: error taxonomy, shared type aliases, the branch/year
//! catalog enumerations, upload and review validation, and media storage
//! path helpers.

pub mod catalog;
pub mod error;
pub mod review;
pub mod storage;
pub mod types;
pub mod upload;
