//! Storage backends for deck tables
//!
//! Decks load from backing tables through the `DeckStore` trait. The
//! primary implementation is `CsvStore` over a directory of CSV files.

mod csv;
mod traits;

pub use self::csv::CsvStore;
pub use traits::{DeckStore, StorageError, StorageResult, TableKind};
