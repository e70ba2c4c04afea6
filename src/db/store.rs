use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rusqlite::{Connection, Row};
use tracing::debug;

use super::models::{Command, PendingChange, SaveSummary};
use super::repo::{require_id, CommanderRepo, RepoProvider};

/// SQLite-backed unit of work. Each instance owns its own connection, and
/// every statement runs on the blocking thread pool.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: String,
    pending: Vec<PendingChange>,
}

impl Database {
    /// Opens the database file and creates the schema if it is missing.
    pub fn new(path: &str) -> Result<Self> {
        let db = Self::connect(path)?;
        db.init()?;
        Ok(db)
    }

    fn connect(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {}", path))?;
        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
            path: path.to_string(),
            pending: Vec::new(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn init(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("sqlite connection lock poisoned"))?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS commands (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                how_to TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    async fn blocking<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|_| anyhow!("sqlite connection lock poisoned"))?;
            work(&mut *conn)
        })
        .await
        .context("sqlite task failed")?
    }
}

fn commit(conn: &mut Connection, changes: Vec<PendingChange>) -> Result<SaveSummary> {
    let tx = conn.transaction()?;
    let mut summary = SaveSummary::default();

    for change in changes {
        match change {
            PendingChange::Insert(mut command) => {
                tx.execute(
                    "INSERT INTO commands (name, how_to) VALUES (?1, ?2)",
                    (&command.name, &command.how_to),
                )?;
                command.id = Some(tx.last_insert_rowid());
                summary.inserted.push(command);
            }
            PendingChange::Update(command) => {
                let id = require_id(&command)?;
                let rows_affected = tx.execute(
                    "UPDATE commands SET name = ?1, how_to = ?2 WHERE id = ?3",
                    rusqlite::params![command.name, command.how_to, id],
                )?;
                if rows_affected == 0 {
                    return Err(anyhow!("Command not found"));
                }
                summary.updated += 1;
            }
            PendingChange::Delete(id) => {
                let rows_affected = tx.execute("DELETE FROM commands WHERE id = ?", [id])?;
                if rows_affected == 0 {
                    return Err(anyhow!("Command not found"));
                }
                summary.deleted += 1;
            }
        }
    }

    tx.commit()?;
    Ok(summary)
}

fn command_from_row(row: &Row<'_>) -> rusqlite::Result<Command> {
    Ok(Command {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        how_to: row.get(2)?,
    })
}

#[async_trait]
impl CommanderRepo for Database {
    async fn create_command(&mut self, command: Command) -> Result<()> {
        self.pending.push(PendingChange::Insert(Command { id: None, ..command }));
        Ok(())
    }

    async fn get_all_commands(&mut self) -> Result<Vec<Command>> {
        self.blocking(|conn| {
            let mut stmt = conn.prepare("SELECT id, name, how_to FROM commands ORDER BY id")?;

            let commands = stmt
                .query_map([], command_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(commands)
        })
        .await
    }

    async fn get_command_by_id(&mut self, id: i64) -> Result<Option<Command>> {
        self.blocking(move |conn| {
            let mut stmt = conn.prepare("SELECT id, name, how_to FROM commands WHERE id = ?")?;

            let mut rows = stmt.query([id])?;

            if let Some(row) = rows.next()? {
                Ok(Some(command_from_row(row)?))
            } else {
                Ok(None)
            }
        })
        .await
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

        let staged = changes.len();
        let summary = self.blocking(move |conn| commit(conn, changes)).await?;
        debug!(
            staged,
            inserted = summary.inserted.len(),
            updated = summary.updated,
            deleted = summary.deleted,
            "committed sqlite changes"
        );
        Ok(summary)
    }
}

/// Opens a fresh SQLite connection for every unit of work.
pub struct SqliteProvider {
    path: String,
}

impl SqliteProvider {
    /// Opens the database once so the schema exists before the first request.
    pub fn new(path: &str) -> Result<Self> {
        let db = Database::new(path)?;
        Ok(SqliteProvider {
            path: db.path().to_string(),
        })
    }
}

#[async_trait]
impl RepoProvider for SqliteProvider {
    async fn open(&self) -> Result<Box<dyn CommanderRepo>> {
        let path = self.path.clone();
        let db = tokio::task::spawn_blocking(move || Database::connect(&path))
            .await
            .context("sqlite task failed")??;
        Ok(Box::new(db))
    }
}
