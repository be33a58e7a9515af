//! Transport-independent API layer.
//!
//! `DeckApi` is the single entry point for consumer-facing operations.
//! UI surfaces (CLI, web frontends, embedding hosts) call `DeckApi`
//! methods; they never reach into `DeckEngine` or the store directly.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::deck::{Card, Deck, DeckEngine, ScenarioCard, Task};
use crate::query::{
    correlate, executive_summary, CardFilter, ExecutiveSummary, FilterResult, ScenarioFilter,
    ScenarioResult,
};
use crate::storage::{CsvStore, DeckStore, StorageResult, TableKind};

/// Single entry point over one deck's store and the process-wide cache.
#[derive(Clone)]
pub struct DeckApi {
    engine: Arc<DeckEngine>,
    store: Arc<CsvStore>,
}

impl DeckApi {
    /// Open an API over a data directory with a private engine.
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        Self::new(
            Arc::new(DeckEngine::new()),
            Arc::new(CsvStore::open(data_dir)),
        )
    }

    /// Create an API over an existing engine and store, for hosts that
    /// share one engine across several decks.
    pub fn new(engine: Arc<DeckEngine>, store: Arc<CsvStore>) -> Self {
        Self { engine, store }
    }

    // --- Load lifecycle ---

    /// The current deck snapshot, loaded on first use and cached after.
    pub fn deck(&self) -> StorageResult<Arc<Deck>> {
        self.engine.load(self.store.as_ref())
    }

    /// Drop the cached snapshot and re-read the backing tables.
    pub fn reload(&self) -> StorageResult<Arc<Deck>> {
        self.engine.reload(self.store.as_ref())
    }

    // --- Views ---

    /// Filtered, priority-ranked cards.
    pub fn filter_cards(&self, filter: &CardFilter) -> StorageResult<FilterResult> {
        let deck = self.deck()?;
        Ok(filter.execute(&deck))
    }

    /// Filtered, urgency-ordered scenario cards. Empty when the scenario
    /// table is absent.
    pub fn filter_scenarios(&self, filter: &ScenarioFilter) -> StorageResult<ScenarioResult> {
        let deck = self.deck()?;
        Ok(match deck.scenarios.as_deref() {
            Some(scenarios) => filter.execute(scenarios),
            None => ScenarioResult::empty(),
        })
    }

    /// The scenario narrative for a card, if one exists.
    pub fn correlate(&self, card: &Card) -> StorageResult<Option<ScenarioCard>> {
        let deck = self.deck()?;
        Ok(deck
            .scenarios
            .as_deref()
            .and_then(|scenarios| correlate(card, scenarios))
            .cloned())
    }

    /// Headline scenarios for the executive view.
    pub fn summary(&self) -> StorageResult<ExecutiveSummary> {
        let deck = self.deck()?;
        Ok(deck
            .scenarios
            .as_deref()
            .map(executive_summary)
            .unwrap_or_default())
    }

    /// The task rows behind a card's two sides, where known.
    pub fn task_details(&self, card: &Card) -> StorageResult<(Option<Task>, Option<Task>)> {
        let deck = self.deck()?;
        Ok((
            deck.task(&card.a_id).cloned(),
            deck.task(&card.b_id).cloned(),
        ))
    }

    // --- Updates ---

    /// Replace a backing table wholesale and invalidate the cached deck.
    ///
    /// Returns the path the table was written to (a fallback location when
    /// the data directory is not writable).
    pub fn replace_table(&self, table: TableKind, data: &[u8]) -> StorageResult<PathBuf> {
        let written = self.store.replace_table(table, data)?;
        self.engine.invalidate(self.store.deck_id());
        Ok(written)
    }
}
