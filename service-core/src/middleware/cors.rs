use axum::http::{header, HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};

/// CORS policy shared by both edge services: wildcard origin, POST only,
/// and the header set browsers send alongside the Supabase client.
///
/// The layer also answers OPTIONS preflight requests with an empty body
/// before any handler (and therefore any auth check) runs.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}
