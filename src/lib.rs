pub mod api;
pub mod cli;
pub mod db;
pub mod dtos;
pub mod server;
pub mod version;

pub use api::{build_router, AppState};
pub use db::{Database, InMemoryProvider, SqliteProvider};
pub use version::VERSION;
