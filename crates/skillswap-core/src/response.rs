//! The JSON envelope shared by every API response.
//!
//! Successful responses carry `"status": "success"` and a `data` payload;
//! failures are produced by [`crate::errors::AppError`] with `fail` or
//! `error`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    #[default]
    Success,
    Fail,
    Error,
}
