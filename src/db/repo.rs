use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::models::{Command, SaveSummary};

/// A unit of work over the command store.
///
/// Reads always see committed state. Mutations are staged and only reach the
/// store when `save_changes` commits them, all at once and in the order they
/// were staged. A repository belongs to a single request, so every method
/// takes `&mut self`.
#[async_trait]
pub trait CommanderRepo: Send {
    async fn create_command(&mut self, command: Command) -> Result<()>;

    async fn get_all_commands(&mut self) -> Result<Vec<Command>>;

    async fn get_command_by_id(&mut self, id: i64) -> Result<Option<Command>>;

    /// Stage a full overwrite of the record carrying the same id.
    async fn update_command(&mut self, command: Command) -> Result<()>;

    async fn delete_command(&mut self, command: &Command) -> Result<()>;

    async fn save_changes(&mut self) -> Result<SaveSummary>;
}

/// Hands out one [`CommanderRepo`] per request.
#[async_trait]
pub trait RepoProvider: Send + Sync {
    async fn open(&self) -> Result<Box<dyn CommanderRepo>>;
}

pub(crate) fn require_id(command: &Command) -> Result<i64> {
    command
        .id
        .ok_or_else(|| anyhow!("Cannot modify command without id"))
}
