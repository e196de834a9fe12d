//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use filedepot_core::{Config, RandomFileIdGenerator};
use filedepot_services::FileUploadService;
use std::sync::Arc;
use std::time::Duration;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    // Setup storage
    let (storage, local_files) = storage::setup_storage(&config).await?;

    let uploads = FileUploadService::new(storage.clone(), Arc::new(RandomFileIdGenerator))
        .with_upload_ttl(Duration::from_secs(config.upload_url_ttl_secs()));

    let state = Arc::new(AppState {
        is_production: config.is_production(),
        uploads: Arc::new(uploads),
        storage,
        local_files,
        config,
    });

    // Setup routes
    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}
