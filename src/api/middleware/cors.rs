//! CORS middleware configuration.

use tower_http::cors::CorsLayer;

/// Create a CORS layer with permissive settings for development.
///
/// For production, configure more restrictive settings.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
