use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(short, long, env = "COMMANDER_BIND_ADDR", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Where commands are kept
    #[arg(
        short,
        long,
        env = "COMMANDER_STORE",
        value_enum,
        default_value_t = StoreKind::Sqlite
    )]
    pub store: StoreKind,

    /// SQLite database file. Defaults to ~/.commander/commander.db
    #[arg(long, env = "COMMANDER_DB_PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    /// SQLite database file
    Sqlite,
    /// Volatile store, lost on exit
    Memory,
}
