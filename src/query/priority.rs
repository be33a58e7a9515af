//! Display-priority scoring for cards
//!
//! Priority is an interpretive ordering over cards, never a filter: the
//! tables store ground truth and the weights below decide what surfaces
//! first in the inbox view.

use crate::deck::{Card, CardType};

/// Base weight by card type. Conflicts outrank duplicates outrank synergies.
pub fn type_weight(card_type: CardType) -> f64 {
    match card_type {
        CardType::Conflict => 3.0,
        CardType::Duplicate => 2.0,
        CardType::Synergy => 1.0,
    }
}

/// Weight of a single signal token. Unknown tokens contribute nothing.
pub fn signal_weight(token: &str) -> f64 {
    match token {
        "contract" | "kpi_tension" => 2.0,
        "surface" | "goal_overlap" | "opposite_lever" => 1.5,
        "entity" | "surface_contention" => 1.2,
        "capability_same" | "capability_complement" => 1.0,
        "kpi_family" => 0.8,
        _ => 0.0,
    }
}

/// Display-ordering priority of a card.
///
/// Type weight, plus the sum of per-token signal weights, plus
/// `score / 100` for duplicate/synergy cards. A missing or malformed score
/// contributes zero here; contrast with the score-threshold predicate in
/// [`CardFilter`](super::CardFilter), which excludes such cards outright.
/// The two policies are intentionally different.
pub fn priority(card: &Card) -> f64 {
    let mut total = type_weight(card.card_type);
    total += card
        .signal_tokens()
        .map(|token| signal_weight(token.trim()))
        .sum::<f64>();
    if card.card_type.scored() {
        total += card.parsed_score().unwrap_or(0) as f64 / 100.0;
    }
    total
}
