use axum::extract::{FromRequest, FromRequestParts};

use super::error::ApiError;

// axum's stock extractors reject with plain-text responses; routing their
// rejections through ApiError keeps every failure in the JSON envelope.

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
