// Authentication HTTP routes
// Decision: /v1/auth/* prefix, consistent with other API routes
// Decision: The token endpoint takes a form-encoded body (OAuth2 password
// flow shape) and also sets an access_token cookie for browser clients

use axum::{
    extract::State,
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use gatehouse_core::{authenticate, AuthFailure};

use super::middleware::{ApiError, AuthRejection, AuthState, CurrentUser};
use crate::api::common::ErrorResponse;

/// Token request (form-encoded credentials)
#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Token response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// User info response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserInfoResponse {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub disabled: bool,
}

/// Create auth routes
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/v1/auth/token", post(issue_token))
        .route("/v1/auth/me", get(get_current_user))
        .with_state(state)
}

/// POST /v1/auth/token - Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/v1/auth/token",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid credentials or disabled account", body = ErrorResponse),
        (status = 500, description = "Token issuance misconfigured", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn issue_token(
    State(state): State<AuthState>,
    jar: CookieJar,
    Form(req): Form<TokenRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), ApiError> {
    let user = authenticate(state.directory.as_ref(), &req.username, &req.password).await?;

    let access_token = state.token_service.issue(&user, None).map_err(|e| {
        // Issuance is pure computation; failure here means the service is
        // misconfigured, which is not the client's fault
        tracing::error!("Token issuance error: {}", e);
        ApiError::Internal
    })?;

    let expires_in = state.token_service.default_ttl_secs();

    tracing::debug!(username = %user.username, "Issued access token");

    let cookie = Cookie::build(("access_token", access_token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(expires_in))
        .build();

    Ok((
        jar.add(cookie),
        Json(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
        }),
    ))
}

/// GET /v1/auth/me - Get the authenticated user's record
#[utoipa::path(
    get,
    path = "/v1/auth/me",
    responses(
        (status = 200, description = "Authenticated user", body = UserInfoResponse),
        (status = 400, description = "Account is disabled", body = ErrorResponse),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn get_current_user(
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserInfoResponse>, AuthRejection> {
    // A valid token for a since-deactivated account is not useful identity
    if user.disabled {
        return Err(AuthFailure::AccountDisabled.into());
    }

    Ok(Json(UserInfoResponse {
        username: user.username,
        email: user.email,
        full_name: user.full_name,
        disabled: user.disabled,
    }))
}
