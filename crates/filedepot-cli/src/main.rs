//! Filedepot CLI — command-line client for the Filedepot API.
//!
//! Set FILEDEPOT_API_URL (or API_URL); defaults to http://localhost:8005.

use anyhow::Context;
use clap::{Parser, Subcommand};
use filedepot_cli::{guess_content_type, init_tracing, ApiClient};
use filedepot_core::models::upload::RequestUploadRequest;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "filedepot", about = "Filedepot API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file: request a credential, transfer the bytes, confirm
    Upload {
        /// Path to the file to upload
        file: std::path::PathBuf,
        /// Content type; guessed from the extension when omitted
        #[arg(long)]
        content_type: Option<String>,
        /// Optional description stored with the upload request
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Confirm a previously requested upload by file ID
    Confirm {
        /// File ID
        id: String,
    },
    /// Get file metadata by ID
    Info {
        /// File ID
        id: String,
    },
    /// Delete a file by ID
    Delete {
        /// File ID
        id: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let client = ApiClient::from_env().context("Failed to create API client")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            file,
            content_type,
            description,
        } => {
            let data = std::fs::read(&file)
                .with_context(|| format!("Failed to read file: {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .context("File path has no valid file name")?
                .to_string();
            let content_type =
                content_type.unwrap_or_else(|| guess_content_type(&file_name).to_string());

            let credential = client
                .request_upload(&RequestUploadRequest {
                    file_name,
                    content_type,
                    file_size: data.len() as i64,
                    description,
                })
                .await?;

            tracing::info!(
                file_id = %credential.file_id,
                upload_url = %credential.upload_url,
                expires_in = credential.expires_in,
                "Upload credential issued"
            );

            client
                .transfer_bytes(
                    &credential.upload_url,
                    &credential.method,
                    &credential.headers,
                    data,
                )
                .await?;

            let confirmed = client.confirm_upload(&credential.file_id).await?;
            if !confirmed.success {
                return Err(anyhow::anyhow!(
                    "Upload confirmation failed: {}",
                    confirmed.message
                ));
            }
            print_json(&confirmed)?;
        }
        Commands::Confirm { id } => {
            let response = client.confirm_upload(&id).await?;
            print_json(&response)?;
        }
        Commands::Info { id } => {
            let response = client.get_file_info(&id).await?;
            print_json(&response)?;
        }
        Commands::Delete { id } => {
            let response = client.delete_file(&id).await?;
            print_json(&response)?;
        }
    }

    Ok(())
}
