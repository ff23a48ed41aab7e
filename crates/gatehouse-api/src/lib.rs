// Gatehouse API server library
// Decision: Router assembly lives here (not in main.rs) so integration tests
// can drive the full HTTP surface with tower::ServiceExt::oneshot

pub mod api;
pub mod auth;
pub mod config;
pub mod storage;
pub mod timing;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::middleware::AuthState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(auth::routes::issue_token, auth::routes::get_current_user),
    components(schemas(
        auth::routes::TokenRequest,
        auth::routes::TokenResponse,
        auth::routes::UserInfoResponse,
        api::common::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Token issuance and identity endpoints")
    ),
    info(
        title = "Gatehouse API",
        version = "0.1.0",
        description = "Bearer-token authentication handshake: credential verification, token issuance, and validation",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

/// Build the application router.
///
/// Includes the auth routes, health endpoint, Swagger UI, and the
/// response-time middleware. CORS and request tracing are layered on in
/// `main` because they are deployment concerns.
pub fn api_router(state: AuthState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(auth::routes::routes(state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn(timing::process_time))
}
