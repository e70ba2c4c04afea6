pub mod args;
pub mod commands;

pub use args::{Cli, StoreKind};
pub use commands::{default_db_path, open_repos};
