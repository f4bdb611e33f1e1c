//! User directory: public browsing and self-service profile management.

pub mod controller;
pub mod router;
pub mod service;
