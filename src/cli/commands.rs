use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use super::args::{Cli, StoreKind};
use crate::db::{InMemoryProvider, RepoProvider, SqliteProvider};

pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .map(|mut path| {
            path.push(".commander");
            path.push("commander.db");
            path
        })
        .unwrap_or_else(|| PathBuf::from("commander.db"))
}

/// Builds the repository provider selected on the command line.
pub fn open_repos(cli: &Cli) -> Result<Arc<dyn RepoProvider>> {
    match cli.store {
        StoreKind::Memory => {
            info!("using in-memory store");
            Ok(Arc::new(InMemoryProvider::new()))
        }
        StoreKind::Sqlite => {
            let db_path = cli.db_path.clone().unwrap_or_else(default_db_path);

            // Create parent directory if it doesn't exist
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create directory {}", parent.display())
                    })?;
                }
            }

            let path = db_path
                .to_str()
                .with_context(|| format!("database path {} is not UTF-8", db_path.display()))?;
            info!(path, "using sqlite store");
            Ok(Arc::new(SqliteProvider::new(path)?))
        }
    }
}
