//! Crossdeck: ranking and filtering for task intersection cards
//!
//! An in-memory engine behind a dashboard of precomputed "cards", each
//! describing a functional overlap between two product tasks: a conflict,
//! a duplicate, or a synergy. Tables load whole from CSV, every view is a
//! pure recomputation over the loaded snapshot, and updates replace a
//! table wholesale.
//!
//! # Core Concepts
//!
//! - **Cards**: machine-generated records relating two tasks, annotated
//!   with reason-code signals and an optional score
//! - **Scenario cards**: human-written narratives elaborating cards for
//!   non-technical readers
//! - **Decks**: immutable snapshots of the three backing tables, cached
//!   process-wide until explicitly invalidated
//!
//! # Example
//!
//! ```
//! use crossdeck::{CardFilter, CardType};
//!
//! let filter = CardFilter::new()
//!     .with_types([CardType::Conflict, CardType::Duplicate])
//!     .only_cross()
//!     .min_score(50);
//! // Ready to execute against a loaded deck
//! ```

mod api;
mod deck;
pub mod query;
pub mod storage;

pub use api::DeckApi;
pub use deck::{urgency_weight, Card, CardType, Deck, DeckEngine, DeckId, ScenarioCard, Task};
pub use query::{
    correlate, executive_summary, priority, CardFilter, ExecutiveSummary, FilterResult,
    ScenarioFilter, ScenarioResult,
};
pub use storage::{CsvStore, DeckStore, StorageError, StorageResult, TableKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
