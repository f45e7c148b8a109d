//! API client layer: endpoint table, HTTP operations, and error taxonomy.
//!
//! The server owns all data, storage, and authorization; this module is the
//! only place that talks to it. View state machines consume these operations
//! and never construct URLs themselves.

mod client;
mod endpoints;
mod error;

pub use client::{ApiClient, UploadFile};
pub use endpoints::{Endpoints, PAGE_SIZE, page_count};
pub use error::ApiError;
