//! Request extractors for cross-cutting concerns.
//!
//! - [`auth`]: bearer-token authentication backed by a directory lookup

pub mod auth;
