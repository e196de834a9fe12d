//! Route configuration and setup

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Json, Router,
};
use filedepot_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let mut app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .route(
            &format!("{}/files/uploads", API_PREFIX),
            post(handlers::uploads::request_upload),
        )
        .route(
            &format!("{}/files/uploads/confirm", API_PREFIX),
            post(handlers::uploads::confirm_upload),
        )
        .route(
            &format!("{}/files/{{file_id}}", API_PREFIX),
            get(handlers::files::get_file_info).delete(handlers::files::delete_file),
        );

    // Byte-transfer routes exist only for the local backend; a real object
    // store receives the presigned PUT directly.
    if state.local_files.is_some() {
        app = app
            .route(
                "/files/upload/{file_id}/{file_name}",
                put(handlers::local_files::upload_file),
            )
            .route(
                "/files/{file_id}/{file_name}",
                get(handlers::local_files::download_file),
            );
    }

    let app = app
        .layer(RequestBodyLimitLayer::new(config.max_file_size_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins().iter().map(|o| o.parse()).collect();

        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    };
    Ok(cors)
}
