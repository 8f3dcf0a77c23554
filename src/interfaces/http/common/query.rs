//! Query-string extractor whose rejection is a JSON `{"error": ...}` body.

use axum::extract::FromRequestParts;

use super::ApiError;

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
