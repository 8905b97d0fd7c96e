//! # receipt: Sales Tax Receipt CLI
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  receipt add -k input1 1 12.49 book     price + append, open if absent │
//! │  receipt show input1                    print without closing          │
//! │  receipt checkout input1                print and remove               │
//! │  receipt list                           open keys                      │
//! │  receipt clear                          drop every open receipt        │
//! │  receipt demo                           the three sample baskets       │
//! │                                                                         │
//! │  Receipts go to stdout, logs go to stderr.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod demo;
mod printer;

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use receipt_core::LineItem;
use receipt_db::{Database, DbConfig, InMemoryStore, ReceiptBook, ReceiptStore};

use crate::config::{Cli, Command, StoreKind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    // The demo never touches persistent receipts.
    let kind = match cli.command {
        Command::Demo => StoreKind::Memory,
        _ => cli.store,
    };

    let (store, db) = open_store(kind, &cli.db).await?;
    let book = ReceiptBook::new(store);

    let result = run(&book, cli.command).await;

    if let Some(db) = db {
        db.close().await;
    }
    result
}

async fn run(book: &ReceiptBook, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Add {
            key,
            quantity,
            price,
            name,
        } => {
            let key = key.unwrap_or_else(|| Uuid::new_v4().simple().to_string());
            let item = LineItem::parse(quantity, name.join(" "), &price)?;
            let receipt = book.save_item(&key, &item).await?;
            let line = receipt
                .items()
                .last()
                .context("receipt has no items after save")?;
            println!("{key}: {} {}: {}", line.quantity, line.name, line.price);
        }
        Command::Show { key } => match book.peek(&key).await? {
            Some(receipt) => println!("{}", printer::render(&receipt, None)),
            None => bail!("no open receipt for {key:?}"),
        },
        Command::Checkout { key } => match book.checkout(&key).await? {
            Some(receipt) => println!("{}", printer::render(&receipt, None)),
            None => bail!("no open receipt for {key:?}"),
        },
        Command::List => {
            for key in book.open_keys().await? {
                println!("{key}");
            }
        }
        Command::Clear => {
            let removed = book.clear().await?;
            println!("removed {removed} receipt(s)");
        }
        Command::Demo => {
            let rendered: Vec<String> = demo::run(book)
                .await?
                .iter()
                .enumerate()
                .map(|(i, r)| printer::render(r, Some(&format!("Output {}", i + 1))))
                .collect();
            println!("{}", rendered.join("\n\n"));
        }
    }
    Ok(())
}

async fn open_store(
    kind: StoreKind,
    path: &Path,
) -> anyhow::Result<(Arc<dyn ReceiptStore>, Option<Database>)> {
    match kind {
        StoreKind::Memory => {
            info!("Using in-memory receipt store");
            let store: Arc<dyn ReceiptStore> = Arc::new(InMemoryStore::new());
            Ok((store, None))
        }
        StoreKind::Sqlite => {
            let db = Database::new(DbConfig::new(path))
                .await
                .with_context(|| format!("opening {}", path.display()))?;
            if !db.health_check().await {
                bail!("receipt database {} is not answering queries", path.display());
            }
            let store: Arc<dyn ReceiptStore> = Arc::new(db.receipts());
            Ok((store, Some(db)))
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,receipt_db=info,receipt_cli=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
