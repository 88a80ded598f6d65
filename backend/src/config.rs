//! Server configuration from command-line flags and environment variables.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

use crate::domain::ReferenceData;
use crate::storage::connection::DEFAULT_DATABASE_URL;

#[derive(Debug, Clone, Parser)]
#[command(name = "expense-tracker", version, about = "Personal expense tracker server")]
pub struct ServerConfig {
    /// SQLite database URL; the file is created if missing
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Origin allowed to call the API with credentials
    #[arg(long, env = "ALLOWED_ORIGIN", default_value = "http://localhost:8080")]
    pub allowed_origin: String,

    /// YAML file with categories, merchants and emotion tags
    #[arg(long, env = "REFERENCE_DATA")]
    pub reference_data: Option<PathBuf>,
}

impl ServerConfig {
    /// The configured reference data, or the built-in lists
    pub fn load_reference_data(&self) -> Result<ReferenceData> {
        match &self.reference_data {
            Some(path) => {
                info!("Loading reference data from {}", path.display());
                ReferenceData::from_yaml_file(path)
            }
            None => Ok(ReferenceData::default()),
        }
    }
}
