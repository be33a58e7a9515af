//! Deck: one loaded snapshot of the three backing tables

use super::card::Card;
use super::scenario::ScenarioCard;
use super::task::Task;
use chrono::{DateTime, Utc};

/// Identity of a deck.
///
/// Serialises as a plain string; in practice the canonicalised data
/// directory the deck was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeckId(String);

impl DeckId {
    /// Create a DeckId from a string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DeckId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DeckId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An immutable snapshot of the tasks, cards and scenario tables.
///
/// A deck is produced whole by a bulk load and replaced whole on reload;
/// nothing mutates it in place. `scenarios` is `None` when the scenario
/// table is absent on disk, which downgrades correlation to a no-op rather
/// than being an error.
#[derive(Debug, Clone)]
pub struct Deck {
    /// Identity (the data directory this deck came from)
    pub id: DeckId,
    /// Tasks table
    pub tasks: Vec<Task>,
    /// Cards table, with derived fields already computed
    pub cards: Vec<Card>,
    /// Scenario cards table, if present
    pub scenarios: Option<Vec<ScenarioCard>>,
    /// When this snapshot was loaded
    pub loaded_at: DateTime<Utc>,
}

impl Deck {
    /// Create an empty deck.
    pub fn new(id: DeckId) -> Self {
        Self {
            id,
            tasks: Vec::new(),
            cards: Vec::new(),
            scenarios: None,
            loaded_at: Utc::now(),
        }
    }

    /// Look up a task by its identifier.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }

    /// Sorted, de-duplicated product names across all tasks.
    pub fn products(&self) -> Vec<String> {
        let mut products: Vec<String> = self.tasks.iter().map(|t| t.product.clone()).collect();
        products.sort();
        products.dedup();
        products
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Number of scenario cards, zero when the table is absent.
    pub fn scenario_count(&self) -> usize {
        self.scenarios.as_ref().map_or(0, |s| s.len())
    }
}
