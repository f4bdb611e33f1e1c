//! `ValidatedJson`: JSON body extraction followed by `validator` checks.
//! `ValidatedQuery` and `ValidatedPath` wrap axum's extractors the same way.
//!
//! Body, query and path rejections as well as rule violations all surface as
//! `ValidationError`.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use skillswap_core::AppError;
use tracing::debug;
use validator::{Validate, ValidationErrors};

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    // field_errors() is unordered.
    messages.sort();
    messages.join(", ")
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::validation(anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = quoted_field(&error_msg, "missing field `").unwrap_or("unknown");
        return AppError::validation(anyhow!("{} is required", field));
    }

    if error_msg.contains("invalid type") {
        return AppError::validation(anyhow!("Invalid field type in request"));
    }

    AppError::validation(anyhow!("Invalid request body"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value
            .validate()
            .map_err(|errors| AppError::validation(anyhow!("{}", format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

/// Pulls the field name out of serde's "duplicate field `x`" and
/// "missing field `x`" messages.
fn quoted_field<'a>(message: &'a str, marker: &str) -> Option<&'a str> {
    message.split(marker).nth(1).and_then(|s| s.split('`').next())
}

fn query_rejection_to_error(rejection: QueryRejection) -> AppError {
    let error_msg = rejection.body_text();

    if let Some(field) = quoted_field(&error_msg, "duplicate field `") {
        return AppError::validation(anyhow!("{} may only be given once", field));
    }

    if let Some(field) = quoted_field(&error_msg, "missing field `") {
        return AppError::validation(anyhow!("{} is required", field));
    }

    AppError::validation(anyhow!("Invalid query string"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection_to_error)?;

        Ok(ValidatedQuery(value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| {
                debug!(error = %rejection.body_text(), "Path rejected");
                AppError::validation(anyhow!("Invalid path parameter"))
            })?;

        Ok(ValidatedPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;
    use skillswap_core::ErrorKind;

    #[derive(Debug, Deserialize, Validate)]
    struct NameBody {
        #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
        name: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_field_is_reported_by_name() {
        let err = ValidatedJson::<NameBody>::from_request(json_request("{}"), &())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::ValidationError);
        assert_eq!(err.public_message(), "name is required");
    }

    #[tokio::test]
    async fn test_rule_violation_uses_rule_message() {
        let err = ValidatedJson::<NameBody>::from_request(json_request(r#"{"name":"ab"}"#), &())
            .await
            .unwrap_err();

        assert_eq!(err.public_message(), "Name must be at least 3 characters");
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let req = Request::builder()
            .body(Body::from(r#"{"name":"abc"}"#))
            .unwrap();
        let err = ValidatedJson::<NameBody>::from_request(req, &())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::ValidationError);
        assert!(err.public_message().contains("Content-Type"));
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let ValidatedJson(body) =
            ValidatedJson::<NameBody>::from_request(json_request(r#"{"name":"abc"}"#), &())
                .await
                .unwrap();
        assert_eq!(body.name, "abc");
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Filters {
        skills_offered: Option<String>,
    }

    fn parts_for(uri: &str) -> Parts {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn test_query_duplicate_field_is_validation_error() {
        let mut parts = parts_for("/users?skillsOffered=x&skillsOffered=y");
        let err = ValidatedQuery::<Filters>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::ValidationError);
        assert_eq!(err.public_message(), "skillsOffered may only be given once");
    }

    #[tokio::test]
    async fn test_query_passes_through() {
        let mut parts = parts_for("/users?skillsOffered=rust");
        let ValidatedQuery(filters) =
            ValidatedQuery::<Filters>::from_request_parts(&mut parts, &())
                .await
                .unwrap();
        assert_eq!(filters.skills_offered.as_deref(), Some("rust"));
    }
}
