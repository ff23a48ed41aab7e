// Authentication extractor and failure-to-response mapping
// Decision: Support both header-based (API) and cookie-based (browser) tokens
// Decision: Invalid tokens answer 401 with a WWW-Authenticate: Bearer
// challenge; credential and disabled-account failures at issuance answer 400

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use gatehouse_core::{validate, AuthFailure, TokenService, UserDirectory, UserRecord};

use crate::api::common::ErrorResponse;

/// HTTP-facing wrapper around [`AuthFailure`].
///
/// This is the scoped-acquisition point of the handshake: the extractor
/// acquires the identity, and any downstream failure is translated into the
/// matching error kind here rather than unwound through handler bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRejection(pub AuthFailure);

impl From<AuthFailure> for AuthRejection {
    fn from(failure: AuthFailure) -> Self {
        Self(failure)
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.0.to_string()));
        match self.0 {
            AuthFailure::InvalidCredentials | AuthFailure::AccountDisabled => {
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AuthFailure::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                body,
            )
                .into_response(),
        }
    }
}

/// Handler-level error: either a handshake failure owned by the client,
/// or a server-side fault that must not masquerade as one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Auth(AuthFailure),
    /// Signing misconfiguration or similar; the client sees a plain 500
    Internal,
}

impl From<AuthFailure> for ApiError {
    fn from(failure: AuthFailure) -> Self {
        Self::Auth(failure)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Auth(failure) => AuthRejection(failure).into_response(),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("internal server error")),
            )
                .into_response(),
        }
    }
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub token_service: Arc<TokenService>,
    pub directory: Arc<dyn UserDirectory>,
}

impl AuthState {
    pub fn new(token_service: TokenService, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            token_service: Arc::new(token_service),
            directory,
        }
    }
}

/// Extractor for the authenticated user on protected routes.
///
/// Re-executes token validation on every request; there is no server-side
/// session state. Rejects with 401 + challenge when no usable token is
/// presented.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let token = extract_bearer_token(parts).ok_or(AuthFailure::InvalidToken)?;

        let user = validate(
            &auth_state.token_service,
            auth_state.directory.as_ref(),
            &token,
        )
        .await?;

        Ok(CurrentUser(user))
    }
}

/// Pull the token from the Authorization header, falling back to the
/// access_token cookie for browser clients.
fn extract_bearer_token(parts: &Parts) -> Option<String> {
    if let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
        // A non-bearer Authorization header is not a valid credential and
        // does not fall through to the cookie
        return None;
    }

    let jar = CookieJar::from_headers(&parts.headers);
    jar.get("access_token").map(|c| c.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/v1/auth/me");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_header_extraction() {
        let parts = parts_with_headers(&[("authorization", "Bearer abc.def.ghi")]);
        assert_eq!(extract_bearer_token(&parts).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_cookie_fallback() {
        let parts = parts_with_headers(&[("cookie", "access_token=abc.def.ghi")]);
        assert_eq!(extract_bearer_token(&parts).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let parts = parts_with_headers(&[
            ("authorization", "Basic dXNlcjpwYXNz"),
            ("cookie", "access_token=abc.def.ghi"),
        ]);
        assert_eq!(extract_bearer_token(&parts), None);
    }

    #[test]
    fn test_no_credentials() {
        let parts = parts_with_headers(&[]);
        assert_eq!(extract_bearer_token(&parts), None);
    }

    #[test]
    fn test_internal_error_is_not_an_auth_failure() {
        let resp = ApiError::Internal.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.headers().get(header::WWW_AUTHENTICATE).is_none());

        // Handshake failures pass through with their usual mapping
        let resp = ApiError::from(AuthFailure::InvalidCredentials).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_rejection_status_mapping() {
        let resp = AuthRejection(AuthFailure::InvalidToken).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );

        let resp = AuthRejection(AuthFailure::InvalidCredentials).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AuthRejection(AuthFailure::AccountDisabled).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
