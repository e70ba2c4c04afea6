pub mod memory;
pub mod models;
pub mod repo;
pub mod store;

pub use memory::InMemoryProvider;
pub use models::{Command, SaveSummary};
pub use repo::{CommanderRepo, RepoProvider};
pub use store::{Database, SqliteProvider};
