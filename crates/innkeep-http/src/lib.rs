//! innkeep-http - Record loader and store over HTTP.
//!
//! The remote side is a plain JSON collection endpoint: `GET` returns the
//! whole array, `POST` with a JSON object appends one record and answers
//! with the record as stored.

mod client;
mod endpoint;
mod loader;
mod store;

pub use client::HttpClient;
pub use endpoint::{Endpoint, EndpointError};
pub use loader::HttpLoader;
pub use store::HttpRecordStore;
