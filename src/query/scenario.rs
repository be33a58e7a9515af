//! Scenario filtering: the executive reading view

use super::types::ScenarioResult;
use crate::deck::{CardType, ScenarioCard};

/// Criteria for selecting and ordering scenario cards.
///
/// Ordering is urgency weight descending, then card type ascending, stable.
#[derive(Debug, Clone, Default)]
pub struct ScenarioFilter {
    /// Card types to include (None = all)
    pub types: Option<Vec<CardType>>,
    /// Categories to include (None = all)
    pub categories: Option<Vec<String>>,
    /// Case-insensitive substring query over title and plain text
    pub search: Option<String>,
    /// When set, the search query also matches against the category
    pub match_category: bool,
    /// Maximum number of results
    pub limit: Option<usize>,
}

impl ScenarioFilter {
    /// Create a new empty filter (matches all scenarios).
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given card types.
    pub fn with_types(mut self, types: impl IntoIterator<Item = CardType>) -> Self {
        self.types = Some(types.into_iter().collect());
        self
    }

    /// Restrict to the given categories.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Search titles and plain text for a substring, case-insensitively.
    /// An empty query is a no-op.
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Also match the search query against category labels.
    pub fn match_category(mut self) -> Self {
        self.match_category = true;
        self
    }

    /// Limit results.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Execute the filter against a scenario slice.
    pub fn execute(&self, scenarios: &[ScenarioCard]) -> ScenarioResult {
        let mut hits: Vec<ScenarioCard> = scenarios
            .iter()
            .filter(|scen| self.matches(scen))
            .cloned()
            .collect();

        let total_count = hits.len();

        // Stable sort: most urgent first, alphabetical type as tiebreak.
        hits.sort_by(|a, b| {
            b.urgency_weight()
                .cmp(&a.urgency_weight())
                .then_with(|| a.card_type.cmp(&b.card_type))
        });

        if let Some(limit) = self.limit {
            hits.truncate(limit);
        }

        ScenarioResult {
            scenarios: hits,
            total_count,
        }
    }

    /// Check if a scenario matches all criteria.
    pub fn matches(&self, scen: &ScenarioCard) -> bool {
        if let Some(ref types) = self.types {
            if !types.contains(&scen.card_type) {
                return false;
            }
        }

        if let Some(ref categories) = self.categories {
            if !categories.iter().any(|c| c == &scen.category) {
                return false;
            }
        }

        if let Some(ref query) = self.search {
            if !query.is_empty() {
                let query = query.to_lowercase();
                let mut hit = scen.title.to_lowercase().contains(&query)
                    || scen.plain_text.to_lowercase().contains(&query);
                if self.match_category {
                    hit = hit || scen.category.to_lowercase().contains(&query);
                }
                if !hit {
                    return false;
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scenarios() -> Vec<ScenarioCard> {
        vec![
            ScenarioCard::new(CardType::Synergy, "LOW", "Bundle offers")
                .with_category("growth")
                .with_plain_text("Payments and insurance could share the checkout banner."),
            ScenarioCard::new(CardType::Duplicate, "HIGH", "Two export pipelines")
                .with_category("platform")
                .with_plain_text("Both teams are rebuilding the statement export."),
            ScenarioCard::new(CardType::Conflict, "HIGH", "Checkout contract clash")
                .with_category("platform")
                .with_plain_text("Breaking change lands mid-quarter."),
            ScenarioCard::new(CardType::Conflict, "SOON", "Mystery urgency")
                .with_category("growth"),
        ]
    }

    #[test]
    fn ordered_by_urgency_then_type() {
        let scenarios = sample_scenarios();
        let result = ScenarioFilter::new().execute(&scenarios);

        let titles: Vec<_> = result.scenarios.iter().map(|s| s.title.as_str()).collect();
        // HIGH conflict before HIGH duplicate; unknown urgency weighs as LOW
        // and ties with the LOW synergy, conflict sorting first by type.
        assert_eq!(
            titles,
            vec![
                "Checkout contract clash",
                "Two export pipelines",
                "Mystery urgency",
                "Bundle offers",
            ]
        );
    }

    #[test]
    fn type_and_category_filters_restrict() {
        let scenarios = sample_scenarios();

        let conflicts = ScenarioFilter::new()
            .with_types([CardType::Conflict])
            .execute(&scenarios);
        assert_eq!(conflicts.total_count, 2);

        let growth = ScenarioFilter::new()
            .with_categories(["growth"])
            .execute(&scenarios);
        assert_eq!(growth.total_count, 2);
    }

    #[test]
    fn search_covers_title_and_plain_text() {
        let scenarios = sample_scenarios();

        let by_title = ScenarioFilter::new().search("EXPORT").execute(&scenarios);
        assert_eq!(by_title.total_count, 1);

        let by_text = ScenarioFilter::new().search("banner").execute(&scenarios);
        assert_eq!(by_text.total_count, 1);
        assert_eq!(by_text.scenarios[0].title, "Bundle offers");
    }

    #[test]
    fn category_joins_the_search_only_when_asked() {
        let scenarios = sample_scenarios();

        let without = ScenarioFilter::new().search("platform").execute(&scenarios);
        assert_eq!(without.total_count, 0);

        let with = ScenarioFilter::new()
            .search("platform")
            .match_category()
            .execute(&scenarios);
        assert_eq!(with.total_count, 2);
    }

    #[test]
    fn empty_search_is_a_no_op() {
        let scenarios = sample_scenarios();
        let result = ScenarioFilter::new().search("").execute(&scenarios);
        assert_eq!(result.total_count, 4);
    }

    #[test]
    fn limit_bounds_results_not_total() {
        let scenarios = sample_scenarios();
        let result = ScenarioFilter::new().limit(2).execute(&scenarios);
        assert_eq!(result.scenarios.len(), 2);
        assert_eq!(result.total_count, 4);
    }
}
