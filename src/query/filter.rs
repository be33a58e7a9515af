//! Card filtering: the working-inbox view

use super::priority::priority;
use super::types::FilterResult;
use crate::deck::{Card, CardType, Deck};

/// Criteria for selecting and ranking cards.
///
/// All predicates are conjunctive; an unset criterion matches everything.
/// Results come back sorted by display priority, descending, with ties
/// keeping their table order.
#[derive(Debug, Clone, Default)]
pub struct CardFilter {
    /// Card types to include (None = all)
    pub types: Option<Vec<CardType>>,
    /// Products to include; a card passes when *either* side's product is in
    /// the set (inclusive-OR, deliberately not AND)
    pub products: Option<Vec<String>>,
    /// Keep only cards whose tasks belong to different products
    pub only_cross: bool,
    /// Score threshold for duplicate/synergy cards; conflicts always pass
    pub min_score: Option<i64>,
    /// Case-insensitive substring query over task ids and signals
    pub search: Option<String>,
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Number of results to skip
    pub offset: Option<usize>,
}

impl CardFilter {
    /// Create a new empty filter (matches all cards).
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given card types.
    pub fn with_types(mut self, types: impl IntoIterator<Item = CardType>) -> Self {
        self.types = Some(types.into_iter().collect());
        self
    }

    /// Restrict to cards touching any of the given products.
    pub fn with_products<I, S>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.products = Some(products.into_iter().map(Into::into).collect());
        self
    }

    /// Keep only cross-product cards.
    pub fn only_cross(mut self) -> Self {
        self.only_cross = true;
        self
    }

    /// Require duplicate/synergy cards to carry a parseable score of at
    /// least `min_score`. Cards whose score is missing or malformed are
    /// excluded by this rule, not defaulted.
    pub fn min_score(mut self, min_score: i64) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Search task ids and signals for a substring, case-insensitively.
    /// An empty query is a no-op.
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Limit results.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip results (for pagination).
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Execute the filter against a deck.
    pub fn execute(&self, deck: &Deck) -> FilterResult {
        self.execute_on(&deck.cards)
    }

    /// Execute the filter against a card slice.
    pub fn execute_on(&self, cards: &[Card]) -> FilterResult {
        let mut ranked: Vec<(f64, Card)> = cards
            .iter()
            .filter(|card| self.matches(card))
            .map(|card| (priority(card), card.clone()))
            .collect();

        let total_count = ranked.len();

        // Stable sort: equal priorities keep their table order.
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut cards: Vec<Card> = ranked.into_iter().map(|(_, card)| card).collect();

        if let Some(offset) = self.offset {
            if offset < cards.len() {
                cards.drain(..offset);
            } else {
                cards.clear();
            }
        }

        if let Some(limit) = self.limit {
            cards.truncate(limit);
        }

        FilterResult { cards, total_count }
    }

    /// Check if a card matches all criteria.
    pub fn matches(&self, card: &Card) -> bool {
        if let Some(ref types) = self.types {
            if !types.contains(&card.card_type) {
                return false;
            }
        }

        if let Some(ref products) = self.products {
            let hit = products
                .iter()
                .any(|p| p == &card.a_prod || p == &card.b_prod);
            if !hit {
                return false;
            }
        }

        if self.only_cross && !card.cross_product {
            return false;
        }

        if !self.passes_score(card) {
            return false;
        }

        if let Some(ref query) = self.search {
            if !query.is_empty() {
                let query = query.to_lowercase();
                let hit = card.a_id.to_lowercase().contains(&query)
                    || card.b_id.to_lowercase().contains(&query)
                    || card.signals.to_lowercase().contains(&query);
                if !hit {
                    return false;
                }
            }
        }

        true
    }

    /// The score-threshold rule. Score only means something for
    /// duplicate/synergy cards, so conflicts pass unconditionally; a scored
    /// type whose score fails to parse is excluded.
    fn passes_score(&self, card: &Card) -> bool {
        let Some(min_score) = self.min_score else {
            return true;
        };
        if !card.card_type.scored() {
            return true;
        }
        match card.parsed_score() {
            Some(score) => score >= min_score,
            None => false,
        }
    }
}
