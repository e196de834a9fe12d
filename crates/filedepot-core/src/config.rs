//! Configuration module
//!
//! Environment-driven configuration for the file service: server settings,
//! storage backend selection, and upload policy knobs.

use std::env;

use crate::storage_types::StorageBackend;

// Defaults
const DEFAULT_PORT: u16 = 8005;
const DEFAULT_LOCAL_STORAGE_PATH: &str = "./uploads";
const DEFAULT_UPLOAD_URL_TTL_SECS: u64 = 900;
const MAX_FILE_SIZE_MB: usize = 100;

/// File service configuration.
#[derive(Clone, Debug)]
pub struct FileServiceConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub local_storage_path: String,
    pub file_base_url: String,
    // Upload policy
    pub upload_url_ttl_secs: u64,
    pub max_file_size_bytes: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<FileServiceConfig>);

impl Config {
    fn inner(&self) -> &FileServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = FileServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.inner().server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().environment
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.inner().storage_backend
    }

    pub fn local_storage_path(&self) -> &str {
        &self.inner().local_storage_path
    }

    pub fn file_base_url(&self) -> &str {
        &self.inner().file_base_url
    }

    pub fn upload_url_ttl_secs(&self) -> u64 {
        self.inner().upload_url_ttl_secs
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.inner().max_file_size_bytes
    }
}

impl FileServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let server_port: u16 = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .and_then(|s| s.parse::<StorageBackend>().ok());

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let config = FileServiceConfig {
            cors_origins,
            environment,
            storage_backend,
            local_storage_path: env::var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|_| DEFAULT_LOCAL_STORAGE_PATH.to_string()),
            file_base_url: env::var("FILE_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}/files", server_port)),
            upload_url_ttl_secs: env::var("UPLOAD_URL_TTL_SECS")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_URL_TTL_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_UPLOAD_URL_TTL_SECS),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            server_port,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.local_storage_path.trim().is_empty() {
            return Err(anyhow::anyhow!("LOCAL_STORAGE_PATH cannot be empty"));
        }

        if self.file_base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("FILE_BASE_URL cannot be empty"));
        }

        if self.upload_url_ttl_secs == 0 {
            return Err(anyhow::anyhow!("UPLOAD_URL_TTL_SECS cannot be 0"));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB cannot be 0"));
        }

        Ok(())
    }
}
