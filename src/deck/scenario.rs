//! Scenario cards: human-authored narratives elaborating cards

use super::card::CardType;
use serde::{Deserialize, Serialize};

/// Numeric weight of an urgency label.
///
/// `HIGH` = 3, `MEDIUM` = 2, `LOW` = 1; anything unrecognised is treated
/// as `LOW` rather than rejected.
pub fn urgency_weight(urgency: &str) -> u8 {
    match urgency {
        "HIGH" => 3,
        "MEDIUM" => 2,
        "LOW" => 1,
        _ => 1,
    }
}

/// A row from the scenario cards table.
///
/// Scenario cards are written by people for people: each one elaborates a
/// single intersection card into a ready-to-send narrative. A scenario
/// correlates to zero or one card via `match_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioCard {
    /// Relationship kind this scenario elaborates
    #[serde(rename = "type")]
    pub card_type: CardType,
    /// Urgency label: HIGH / MEDIUM / LOW
    #[serde(default)]
    pub urgency: String,
    /// Free-form grouping label
    #[serde(default)]
    pub category: String,
    /// Headline
    #[serde(default)]
    pub title: String,
    /// Where the underlying signal came from
    #[serde(default)]
    pub source: String,
    /// Ready-to-send plain-language summary
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub why_1: String,
    #[serde(default)]
    pub why_2: String,
    #[serde(default)]
    pub why_3: String,
    #[serde(default)]
    pub step_1: String,
    #[serde(default)]
    pub step_2: String,
    #[serde(default)]
    pub step_3: String,
    #[serde(default)]
    pub scenario: String,
    #[serde(default)]
    pub user_story: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub product_context: String,
    #[serde(default)]
    pub objective_kpi: String,
    #[serde(default)]
    pub risks: String,
    /// Cross-reference back to a card
    #[serde(default)]
    pub match_id: Option<String>,
}

impl ScenarioCard {
    /// Create a scenario card with the fields that drive ordering and search.
    pub fn new(
        card_type: CardType,
        urgency: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            card_type,
            urgency: urgency.into(),
            category: String::new(),
            title: title.into(),
            source: String::new(),
            plain_text: String::new(),
            why_1: String::new(),
            why_2: String::new(),
            why_3: String::new(),
            step_1: String::new(),
            step_2: String::new(),
            step_3: String::new(),
            scenario: String::new(),
            user_story: String::new(),
            impact: String::new(),
            product_context: String::new(),
            objective_kpi: String::new(),
            risks: String::new(),
            match_id: None,
        }
    }

    /// Set the category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the plain-language summary.
    pub fn with_plain_text(mut self, text: impl Into<String>) -> Self {
        self.plain_text = text.into();
        self
    }

    /// Set the card cross-reference.
    pub fn with_match_id(mut self, match_id: impl Into<String>) -> Self {
        self.match_id = Some(match_id.into());
        self.derive_fields();
        self
    }

    /// Normalise a blank `match_id` to `None`. Called once per row at load.
    pub fn derive_fields(&mut self) {
        if self
            .match_id
            .as_deref()
            .is_some_and(|m| m.trim().is_empty())
        {
            self.match_id = None;
        }
    }

    /// Numeric weight of this scenario's urgency label.
    pub fn urgency_weight(&self) -> u8 {
        urgency_weight(&self.urgency)
    }
}
