//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use filedepot_core::Config;

/// Validate critical configuration values
///
/// This function checks that critical configuration is set correctly and will
/// fail fast if there are issues that could cause security problems or runtime errors.
pub fn validate_config(config: &Config) -> Result<()> {
    // Validate production mode detection
    let is_production = config.is_production();
    let env_var = std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .ok();

    if is_production && env_var.is_none() {
        tracing::warn!(
            "Production mode detected but ENVIRONMENT/APP_ENV not set - error details may leak"
        );
    }

    // Validate CORS configuration in production
    if is_production {
        let cors_origins = config.cors_origins();
        if cors_origins.contains(&"*".to_string()) {
            return Err(anyhow::anyhow!(
                "CORS configured to allow all origins (*) in production - this is a security risk. \
                Please set specific allowed origins via CORS_ORIGINS environment variable."
            ));
        }
    }

    // Validate upload policy
    if config.max_file_size_bytes() == 0 {
        return Err(anyhow::anyhow!("Max file size cannot be 0"));
    }

    if config.upload_url_ttl_secs() == 0 {
        return Err(anyhow::anyhow!("Upload URL TTL cannot be 0"));
    }

    if config.upload_url_ttl_secs() > 24 * 60 * 60 {
        tracing::warn!(
            ttl_secs = config.upload_url_ttl_secs(),
            "Upload URL TTL is longer than a day - credentials stay usable for a long time"
        );
    }

    // Validate storage configuration
    if config.local_storage_path().trim().is_empty() {
        return Err(anyhow::anyhow!("Local storage path cannot be empty"));
    }

    if config.file_base_url().trim().is_empty() {
        return Err(anyhow::anyhow!("File base URL cannot be empty"));
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}
