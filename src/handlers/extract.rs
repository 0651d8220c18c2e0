//! Request body extractor accepting either JSON or URL-encoded forms.

use crate::Error;
use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

/// Deserializes the body as JSON when the request says so, and as
/// `application/x-www-form-urlencoded` otherwise.
///
/// ```ignore
/// async fn handler(FormOrJson(body): FormOrJson<CreateGenomesBody>) { .. }
/// ```
pub struct FormOrJson<T>(pub T);

impl<S, T> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with("application/json"));

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| Error::validation(e.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| Error::validation(e.body_text()))?;
            Ok(Self(value))
        }
    }
}
