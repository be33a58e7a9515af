//! Storage trait definitions

use crate::deck::{Deck, DeckId};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No writable location for table {0}")]
    NoWritableLocation(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// The three backing tables of a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Tasks,
    Cards,
    Scenarios,
}

impl TableKind {
    /// Conventional file name of this table inside a data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            TableKind::Tasks => "tasks.csv",
            TableKind::Cards => "cards.csv",
            TableKind::Scenarios => "scenario_cards.csv",
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TableKind::Tasks => "tasks",
            TableKind::Cards => "cards",
            TableKind::Scenarios => "scenarios",
        };
        write!(f, "{}", name)
    }
}

/// Trait for deck storage backends
///
/// Implementations must be thread-safe (Send + Sync) so a store can sit
/// behind a shared engine.
pub trait DeckStore: Send + Sync {
    /// Stable identity of the deck this store backs.
    fn deck_id(&self) -> &DeckId;

    /// Load a full snapshot of all tables.
    ///
    /// A missing table is "no data", never an error: tasks and cards load
    /// as empty, the scenario table as absent.
    fn load_deck(&self) -> StorageResult<Deck>;

    /// Replace one table wholesale with new tabular data.
    ///
    /// Returns the path the table was actually written to, which may be a
    /// fallback location when the configured one is not writable. Callers
    /// own invalidating any cached snapshot afterwards.
    fn replace_table(&self, table: TableKind, data: &[u8]) -> StorageResult<PathBuf>;
}
