//! The game of atlas.
//!
//! Players take turns naming nations. Each nation must start with the letter that the previous
//! one ended with, and no nation may be named twice. The player opens with a nation starting with
//! 'S'; the computer answers every valid nation with one of its own. The player loses by naming an
//! invalid nation, and wins when the computer has no answer.

mod catalog;
mod chooser;
mod console;
mod engine;
mod error;
mod ledger;
mod service;
mod session;
mod store;
use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::Context;

use self::catalog::Catalog;
use self::chooser::{Chooser, Random};
use self::console::Console;
use self::engine::Engine;
use self::error::{CatalogError, LedgerError, ServiceError, StoreError, Violation};
use self::ledger::{Ledger, Registration};
use self::service::Atlas;
use self::session::{RawSession, Session};
use self::store::{JsonStore, MemoryStore, Player, Scores, Store};
use crate::args::Args;

/// Runs the game with a simple command-line interface.
pub fn cli_main(args: Args) -> anyhow::Result<()> {
    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("cannot load catalog {}", path.display()))?,
        None => Catalog::builtin().context("cannot load built-in catalog")?,
    };

    let store: Arc<dyn Store> = match &args.store {
        Some(path) => {
            let store = JsonStore::open(path)
                .with_context(|| format!("cannot open store {}", path.display()))?;
            tracing::info!(path = %store.path().display(), "opened store");
            Arc::new(store)
        }
        None => {
            tracing::warn!("no store given, scores will not be kept");
            Arc::new(MemoryStore::default())
        }
    };

    let chooser: Box<dyn Chooser + Send> = match args.seed {
        Some(seed) => Box::new(Random::seeded(seed)),
        None => Box::new(Random::from_entropy()),
    };

    let atlas = Atlas::new(catalog, store, chooser, &args.guest).context("cannot load game")?;
    let color = !args.no_color && std::io::stdout().is_terminal();
    let mut console = Console::new(color, args.json, args.guest.clone());
    let stdin = std::io::stdin();
    console.run(&atlas, stdin.lock(), std::io::stdout())?;
    Ok(())
}
