//! Query result structures

use crate::deck::{Card, ScenarioCard};
use serde::Serialize;

/// Result of a card filter.
#[derive(Debug, Clone, Serialize)]
pub struct FilterResult {
    /// Matching cards, highest priority first
    pub cards: Vec<Card>,
    /// Total matches before offset/limit were applied
    pub total_count: usize,
}

/// Result of a scenario filter.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    /// Matching scenarios, most urgent first
    pub scenarios: Vec<ScenarioCard>,
    /// Total matches before limit was applied
    pub total_count: usize,
}

impl ScenarioResult {
    /// Result with no scenarios, for decks without a scenario table.
    pub fn empty() -> Self {
        Self {
            scenarios: Vec::new(),
            total_count: 0,
        }
    }
}

/// Headline scenarios for the executive view: at most one per card type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecutiveSummary {
    /// Highest-urgency conflict scenario
    pub conflict: Option<ScenarioCard>,
    /// First duplicate scenario in table order
    pub duplicate: Option<ScenarioCard>,
    /// First synergy scenario in table order
    pub synergy: Option<ScenarioCard>,
}

impl ExecutiveSummary {
    /// True when no headline scenario exists at all.
    pub fn is_empty(&self) -> bool {
        self.conflict.is_none() && self.duplicate.is_none() && self.synergy.is_none()
    }
}
