use serde::{Deserialize, Serialize};

/// A stored command and the note on how to use it.
///
/// `id` is `None` until the record has been saved; the store assigns it and
/// it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub id: Option<i64>,
    pub name: String,
    pub how_to: String,
}

impl Command {
    pub fn new(name: impl Into<String>, how_to: impl Into<String>) -> Self {
        Command {
            id: None,
            name: name.into(),
            how_to: how_to.into(),
        }
    }
}

/// Result of committing a unit of work.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    /// Inserted records, in staging order, with their assigned ids.
    pub inserted: Vec<Command>,
    pub updated: usize,
    pub deleted: usize,
}

impl SaveSummary {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.updated == 0 && self.deleted == 0
    }
}

/// A mutation waiting for `save_changes`.
#[derive(Debug, Clone)]
pub(crate) enum PendingChange {
    Insert(Command),
    Update(Command),
    Delete(i64),
}
