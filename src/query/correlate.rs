//! Correlating cards with their scenario narratives

use super::types::ExecutiveSummary;
use crate::deck::{Card, CardType, ScenarioCard};

/// Find the scenario card elaborating a card.
///
/// Returns the first scenario in table order whose `match_id` equals the
/// card's, or `None` when the card carries no `match_id` or nothing
/// matches. Callers with no scenario table at all simply never get here
/// with one, so absence degrades to `None` throughout.
pub fn correlate<'a>(card: &Card, scenarios: &'a [ScenarioCard]) -> Option<&'a ScenarioCard> {
    let match_id = card.match_id.as_deref()?;
    scenarios
        .iter()
        .find(|scen| scen.match_id.as_deref() == Some(match_id))
}

/// Pick the headline scenarios for the executive view.
///
/// One tile per card type: the first highest-urgency conflict, and the
/// first duplicate and synergy in table order.
pub fn executive_summary(scenarios: &[ScenarioCard]) -> ExecutiveSummary {
    let mut conflict: Option<&ScenarioCard> = None;
    for scen in scenarios.iter().filter(|s| s.card_type == CardType::Conflict) {
        match conflict {
            Some(best) if best.urgency_weight() >= scen.urgency_weight() => {}
            _ => conflict = Some(scen),
        }
    }

    let first_of = |card_type: CardType| {
        scenarios
            .iter()
            .find(|s| s.card_type == card_type)
            .cloned()
    };

    ExecutiveSummary {
        conflict: conflict.cloned(),
        duplicate: first_of(CardType::Duplicate),
        synergy: first_of(CardType::Synergy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenarios() -> Vec<ScenarioCard> {
        vec![
            ScenarioCard::new(CardType::Conflict, "MEDIUM", "Medium clash").with_match_id("m-1"),
            ScenarioCard::new(CardType::Conflict, "HIGH", "First high clash").with_match_id("m-2"),
            ScenarioCard::new(CardType::Conflict, "HIGH", "Second high clash").with_match_id("m-3"),
            ScenarioCard::new(CardType::Duplicate, "LOW", "First duplicate").with_match_id("m-2"),
            ScenarioCard::new(CardType::Synergy, "HIGH", "First synergy"),
        ]
    }

    #[test]
    fn correlate_finds_first_match_in_table_order() {
        let scenarios = scenarios();
        let card = Card::new(CardType::Conflict, "a", "b", "x", "y").with_match_id("m-2");

        // Two rows carry m-2; the conflict comes first in the table.
        let hit = correlate(&card, &scenarios).unwrap();
        assert_eq!(hit.title, "First high clash");
    }

    #[test]
    fn correlate_without_match_id_is_none() {
        let scenarios = scenarios();
        let card = Card::new(CardType::Conflict, "a", "b", "x", "y");
        assert!(correlate(&card, &scenarios).is_none());
    }

    #[test]
    fn correlate_with_unmatched_id_is_none() {
        let scenarios = scenarios();
        let card = Card::new(CardType::Synergy, "a", "b", "x", "y").with_match_id("m-404");
        assert!(correlate(&card, &scenarios).is_none());
    }

    #[test]
    fn correlate_against_empty_table_is_none() {
        let card = Card::new(CardType::Synergy, "a", "b", "x", "y").with_match_id("m-1");
        assert!(correlate(&card, &[]).is_none());
    }

    #[test]
    fn summary_prefers_urgency_for_conflicts_and_table_order_for_ties() {
        let summary = executive_summary(&scenarios());
        assert_eq!(summary.conflict.unwrap().title, "First high clash");
        assert_eq!(summary.duplicate.unwrap().title, "First duplicate");
        assert_eq!(summary.synergy.unwrap().title, "First synergy");
    }

    #[test]
    fn summary_of_nothing_is_empty() {
        let summary = executive_summary(&[]);
        assert!(summary.is_empty());
    }
}
