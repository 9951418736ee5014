//! Caller identification.
//!
//! Authentication happens upstream; requests arrive with the authenticated
//! user's id in the `x-user-id` header. Every data route is scoped by it.

use axum::{
    body::Body,
    http::{HeaderName, Request},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;

pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

const MAX_USER_ID_LEN: usize = 128;

/// Identifier of the user a request acts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rejects requests without a usable user id and exposes it to handlers as
/// an `Extension<UserId>`.
pub async fn require_user(mut request: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let user_id = request
        .headers()
        .get(&USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty() && value.len() <= MAX_USER_ID_LEN)
        .ok_or_else(|| ApiError::Unauthorized("Missing or invalid x-user-id header".into()))?
        .to_string();

    request.extensions_mut().insert(UserId(user_id));
    Ok(next.run(request).await)
}
