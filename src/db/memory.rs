use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::models::{Command, PendingChange, SaveSummary};
use super::repo::{require_id, CommanderRepo, RepoProvider};

#[derive(Debug)]
struct MemoryStore {
    next_id: i64,
    commands: BTreeMap<i64, Command>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore {
            next_id: 1,
            commands: BTreeMap::new(),
        }
    }
}

impl MemoryStore {
    /// Applies every change or none of them.
    fn apply(&mut self, changes: Vec<PendingChange>) -> Result<SaveSummary> {
        self.check(&changes)?;

        let mut summary = SaveSummary::default();
        for change in changes {
            match change {
                PendingChange::Insert(mut command) => {
                    command.id = Some(self.next_id);
                    self.commands.insert(self.next_id, command.clone());
                    self.next_id += 1;
                    summary.inserted.push(command);
                }
                PendingChange::Update(command) => {
                    let id = require_id(&command)?;
                    self.commands.insert(id, command);
                    summary.updated += 1;
                }
                PendingChange::Delete(id) => {
                    self.commands.remove(&id);
                    summary.deleted += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Replays the changes against the ids they touch without mutating the
    /// store, failing on the first one that targets a missing record.
    fn check(&self, changes: &[PendingChange]) -> Result<()> {
        let mut added = HashSet::new();
        let mut removed = HashSet::new();
        let mut next_id = self.next_id;
        let exists = |id: i64, added: &HashSet<i64>, removed: &HashSet<i64>| {
            !removed.contains(&id) && (self.commands.contains_key(&id) || added.contains(&id))
        };

        for change in changes {
            match change {
                PendingChange::Insert(_) => {
                    added.insert(next_id);
                    next_id += 1;
                }
                PendingChange::Update(command) => {
                    let id = require_id(command)?;
                    if !exists(id, &added, &removed) {
                        return Err(anyhow!("Command not found"));
                    }
                }
                PendingChange::Delete(id) => {
                    if !exists(*id, &added, &removed) {
                        return Err(anyhow!("Command not found"));
                    }
                    removed.insert(*id);
                }
            }
        }

        Ok(())
    }
}

/// Volatile store shared by all units of work it opens. Ids are never reused.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    store: Arc<RwLock<MemoryStore>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RepoProvider for InMemoryProvider {
    async fn open(&self) -> Result<Box<dyn CommanderRepo>> {
        Ok(Box::new(InMemoryCommanderRepo {
            store: Arc::clone(&self.store),
            pending: Vec::new(),
        }))
    }
}

pub struct InMemoryCommanderRepo {
    store: Arc<RwLock<MemoryStore>>,
    pending: Vec<PendingChange>,
}

#[async_trait]
impl CommanderRepo for InMemoryCommanderRepo {
    async fn create_command(&mut self, command: Command) -> Result<()> {
        self.pending.push(PendingChange::Insert(Command { id: None, ..command }));
        Ok(())
    }

    async fn get_all_commands(&mut self) -> Result<Vec<Command>> {
        Ok(self.store.read().await.commands.values().cloned().collect())
    }

    async fn get_command_by_id(&mut self, id: i64) -> Result<Option<Command>> {
        Ok(self.store.read().await.commands.get(&id).cloned())
    }

    async fn update_command(&mut self, command: Command) -> Result<()> {
        require_id(&command)?;
        self.pending.push(PendingChange::Update(command));
        Ok(())
    }

    async fn delete_command(&mut self, command: &Command) -> Result<()> {
        let id = require_id(command)?;
        self.pending.push(PendingChange::Delete(id));
        Ok(())
    }

    async fn save_changes(&mut self) -> Result<SaveSummary> {
        let changes = std::mem::take(&mut self.pending);
        if changes.is_empty() {
            return Ok(SaveSummary::default());
        }

        let summary = self.store.write().await.apply(changes)?;
        debug!(
            inserted = summary.inserted.len(),
            updated = summary.updated,
            deleted = summary.deleted,
            "committed in-memory changes"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_save_leaves_store_untouched() -> Result<()> {
        let provider = InMemoryProvider::new();

        let mut repo = provider.open().await?;
        repo.create_command(Command::new("ls", "lists files")).await?;
        repo.save_changes().await?;

        let mut repo = provider.open().await?;
        repo.create_command(Command::new("pwd", "prints directory")).await?;
        repo.delete_command(&Command {
            id: Some(42),
            ..Command::new("ghost", "never stored")
        })
        .await?;
        assert!(repo.save_changes().await.is_err());

        let mut repo = provider.open().await?;
        let all = repo.get_all_commands().await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "ls");

        // Ids continue from the last committed insert.
        repo.create_command(Command::new("pwd", "prints directory")).await?;
        let summary = repo.save_changes().await?;
        assert_eq!(summary.inserted[0].id, Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn second_delete_of_same_record_fails_whole_save() -> Result<()> {
        let provider = InMemoryProvider::new();
        let mut repo = provider.open().await?;
        repo.create_command(Command::new("ls", "lists files")).await?;
        let saved = repo.save_changes().await?.inserted.remove(0);

        let mut edited = saved.clone();
        edited.name = "ls -la".to_string();
        repo.update_command(edited).await?;
        repo.delete_command(&saved).await?;
        repo.delete_command(&saved).await?;
        assert!(repo.save_changes().await.is_err());

        let kept = repo.get_command_by_id(1).await?.unwrap();
        assert_eq!(kept.name, "ls");
        Ok(())
    }

    #[tokio::test]
    async fn update_after_delete_in_one_save_fails() -> Result<()> {
        let provider = InMemoryProvider::new();
        let mut repo = provider.open().await?;
        repo.create_command(Command::new("pwd", "prints directory")).await?;
        let saved = repo.save_changes().await?.inserted.remove(0);

        repo.delete_command(&saved).await?;
        repo.update_command(saved.clone()).await?;
        assert!(repo.save_changes().await.is_err());
        assert!(repo.get_command_by_id(1).await?.is_some());
        Ok(())
    }
}
