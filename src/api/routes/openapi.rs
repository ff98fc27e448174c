//! OpenAPI specification endpoints.

use axum::{
    response::{Html, Json},
    routing::get,
    Router,
};
use utoipa::OpenApi;

use super::super::openapi::ApiDoc;
use super::app_state::AppState;

/// Create the OpenAPI router
pub fn openapi_router() -> Router<AppState> {
    Router::new()
        .route("/openapi.json", get(serve_openapi_json))
        .route("/swagger", get(serve_swagger_html))
}

/// GET /openapi.json - Serve the OpenAPI specification as JSON
pub async fn serve_openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /swagger - Minimal pointer page to the JSON spec
pub async fn serve_swagger_html() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head><title>Blood Donation API - OpenAPI Documentation</title></head>
<body>
    <h1>Blood Donation API</h1>
    <p>The OpenAPI specification is available at <a href="/api/v1/openapi.json">openapi.json</a>.</p>
</body>
</html>
"#,
    )
}
