use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Query, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;

use service::query::{normalize_query, QueryParams};

use crate::errors::ApiError;

/// JSON body that must be a non-empty object.
///
/// An absent body, `null` or `{}` is rejected with [`ApiError::NoData`] before
/// the payload reaches a service.
pub struct RequiredJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for RequiredJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ApiError::NoData);
        }
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))?;
        match &value {
            Value::Null => return Err(ApiError::NoData),
            Value::Object(map) if map.is_empty() => return Err(ApiError::NoData),
            Value::Object(_) => {}
            _ => return Err(ApiError::BadRequest("JSON body must be an object".into())),
        }
        serde_json::from_value(value)
            .map(RequiredJson)
            .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))
    }
}

/// Raw query pairs normalized into [`QueryParams`]; `None` when the query string is empty.
pub fn query_params(Query(pairs): Query<Vec<(String, String)>>) -> Option<QueryParams> {
    if pairs.is_empty() {
        None
    } else {
        Some(normalize_query(pairs))
    }
}
