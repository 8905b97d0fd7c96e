//! CLI configuration.
//!
//! Arguments are parsed with clap; every global option falls back to an
//! environment variable, then to a default.
//!
//! ```text
//! --store  / RECEIPT_STORE    sqlite | memory      (default: sqlite)
//! --db     / RECEIPT_DB_PATH  path to SQLite file  (default: receipts.db)
//! RUST_LOG                    log filter           (default: warn,receipt_db=info,receipt_cli=info)
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Default SQLite file, next to where the command runs.
pub const DEFAULT_DB_PATH: &str = "receipts.db";

/// Which backend holds open receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StoreKind {
    /// SQLite file; receipts survive between runs.
    #[default]
    Sqlite,
    /// Process memory; receipts vanish on exit.
    Memory,
}

/// Sales tax receipt generator.
#[derive(Debug, Parser)]
#[command(name = "receipt", version, about)]
pub struct Cli {
    /// Receipt store backend.
    #[arg(long, env = "RECEIPT_STORE", value_enum, default_value_t = StoreKind::Sqlite, global = true)]
    pub store: StoreKind,

    /// SQLite database file (sqlite store only).
    #[arg(long, env = "RECEIPT_DB_PATH", default_value = DEFAULT_DB_PATH, global = true)]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price an item and add it to a receipt.
    Add {
        /// Receipt key; a fresh one is generated when omitted.
        #[arg(long, short)]
        key: Option<String>,

        /// Quantity (1-999).
        quantity: i64,

        /// Unit price, e.g. 12.49.
        price: String,

        /// Item name, e.g. imported box of chocolates.
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Print an open receipt without closing it.
    Show { key: String },

    /// Print a receipt and remove it from the store.
    Checkout { key: String },

    /// List open receipt keys.
    List,

    /// Remove every open receipt.
    Clear,

    /// Run the three sample baskets and print their receipts.
    Demo,
}
