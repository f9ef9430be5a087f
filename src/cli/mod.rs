use clap::Parser;

use crate::config::{AppConfig, StoreBackend};

/// Command-line overrides for the server; anything unset keeps the value from
/// the environment-driven configuration.
#[derive(Debug, Parser)]
#[command(name = "mflix-api")]
#[command(about = "REST API over the mflix movies and comments collections")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Address to bind (overrides API_HOST)")]
    pub host: Option<String>,

    #[arg(long, short, help = "Port to listen on (overrides API_PORT / PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Serve from an in-memory store instead of MongoDB")]
    pub memory: bool,

    #[arg(long, help = "MongoDB database name (overrides MONGODB_DATABASE)")]
    pub database: Option<String>,

    #[arg(long, help = "Disable per-request tracing")]
    pub quiet: bool,
}

impl Cli {
    pub fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = self.host {
            config.api.host = host;
        }
        if let Some(port) = self.port {
            config.api.port = port;
        }
        if self.memory {
            config.database.backend = StoreBackend::Memory;
        }
        if let Some(database) = self.database {
            config.database.name = database;
        }
        if self.quiet {
            config.api.enable_request_logging = false;
        }
        config
    }
}
