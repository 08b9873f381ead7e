//! Custom Axum extractors

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::{Map, Value};

use super::error::ApiError;
use crate::models::ValidationError;

/// Raw body of `POST /api/books`. Fields stay optional so absence is
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl CreateBookRequest {
    /// Read the fields from a JSON object. `null` counts as absent.
    fn from_object(object: &Map<String, Value>) -> Result<Self, ValidationError> {
        Ok(Self {
            title: string_field(object, "title")?,
            author: string_field(object, "author")?,
        })
    }
}

fn string_field(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::Malformed {
            reason: "'title' and 'author' must be strings",
        }),
    }
}

/// JSON object payload; any body or content-type problem is a 400
pub struct BookPayload(pub CreateBookRequest);

impl<S> FromRequest<S> for BookPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "Rejected book payload");
                ApiError::Validation(ValidationError::Malformed {
                    reason: "expected a JSON object",
                })
            })?;

        let object = body.as_object().ok_or(ValidationError::Malformed {
            reason: "expected a JSON object",
        })?;

        Ok(Self(CreateBookRequest::from_object(object)?))
    }
}
