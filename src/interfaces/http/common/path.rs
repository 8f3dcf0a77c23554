//! Path extractor whose rejection is a JSON `{"error": ...}` body.

use axum::extract::FromRequestParts;

use super::ApiError;

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
