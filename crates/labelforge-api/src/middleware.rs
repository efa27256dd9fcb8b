//! Cross-cutting layers for the API surface.
use tower_http::cors::CorsLayer;

/// Permissive CORS: browser clients are served from anywhere, and preflight
/// OPTIONS requests short-circuit inside the layer without touching handlers.
pub fn cors() -> CorsLayer {
    CorsLayer::permissive()
}
