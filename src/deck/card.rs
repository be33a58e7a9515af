//! Card: a detected relationship between two tasks

use serde::{Deserialize, Serialize};

/// Kind of relationship a card describes.
///
/// Declaration order is lexicographic, so the derived `Ord` matches the
/// alphabetical tiebreak used when ordering scenario cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    /// Two tasks pull in opposite directions (shared contract, KPI tension, ...)
    Conflict,
    /// Two tasks build the same thing twice
    Duplicate,
    /// Two tasks would benefit from being coordinated
    Synergy,
}

impl CardType {
    /// All known card types.
    pub const ALL: [CardType; 3] = [CardType::Conflict, CardType::Duplicate, CardType::Synergy];

    /// Lowercase name as it appears in the backing tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Conflict => "conflict",
            CardType::Duplicate => "duplicate",
            CardType::Synergy => "synergy",
        }
    }

    /// Whether `score` carries meaning for this card type.
    ///
    /// Scores are produced only for duplicate/synergy detection; a conflict
    /// card may carry a score column value but it is never interpreted.
    pub fn scored(&self) -> bool {
        matches!(self, CardType::Duplicate | CardType::Synergy)
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conflict" => Ok(CardType::Conflict),
            "duplicate" => Ok(CardType::Duplicate),
            "synergy" => Ok(CardType::Synergy),
            other => Err(format!("unknown card type '{}'", other)),
        }
    }
}

/// A machine-generated record describing a relationship between two tasks.
///
/// Cards are loaded in bulk from the cards table and never mutated in place;
/// filtering and ranking always produce new derived views. The `score` field
/// is kept as the raw source string because its two consumers apply
/// different fallback policies when it fails to parse (see
/// [`CardFilter`](crate::query::CardFilter) and
/// [`priority`](crate::query::priority)).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// Relationship kind
    #[serde(rename = "type")]
    pub card_type: CardType,
    /// Identifier of the first task
    pub a_id: String,
    /// Identifier of the second task
    pub b_id: String,
    /// Product owning the first task
    pub a_prod: String,
    /// Product owning the second task
    pub b_prod: String,
    /// Comma-space-separated reason codes ("contract, kpi_tension"); may be empty
    #[serde(default)]
    pub signals: String,
    /// Raw score string 0–100; meaningful only for duplicate/synergy
    #[serde(default)]
    pub score: Option<String>,
    /// Cross-reference to a scenario card
    #[serde(default)]
    pub match_id: Option<String>,
    /// Derived at load: the two tasks belong to different products
    #[serde(skip_deserializing)]
    pub cross_product: bool,
    /// Derived at load: number of non-empty signal tokens
    #[serde(skip_deserializing)]
    pub signals_count: usize,
}

impl Card {
    /// Create a card between two tasks. Derived fields are kept current by
    /// the builder methods; rows coming off disk call [`Card::derive_fields`]
    /// once after deserialization instead.
    pub fn new(
        card_type: CardType,
        a_id: impl Into<String>,
        b_id: impl Into<String>,
        a_prod: impl Into<String>,
        b_prod: impl Into<String>,
    ) -> Self {
        let mut card = Self {
            card_type,
            a_id: a_id.into(),
            b_id: b_id.into(),
            a_prod: a_prod.into(),
            b_prod: b_prod.into(),
            signals: String::new(),
            score: None,
            match_id: None,
            cross_product: false,
            signals_count: 0,
        };
        card.derive_fields();
        card
    }

    /// Set the signals string.
    pub fn with_signals(mut self, signals: impl Into<String>) -> Self {
        self.signals = signals.into();
        self.derive_fields();
        self
    }

    /// Set the raw score string.
    pub fn with_score(mut self, score: impl Into<String>) -> Self {
        self.score = Some(score.into());
        self
    }

    /// Set the scenario cross-reference.
    pub fn with_match_id(mut self, match_id: impl Into<String>) -> Self {
        self.match_id = Some(match_id.into());
        self.derive_fields();
        self
    }

    /// Recompute the derived fields from the source fields.
    ///
    /// Called once per row at load time. Also normalises a blank `match_id`
    /// to `None` so an empty card field can never correlate with an empty
    /// scenario field.
    pub fn derive_fields(&mut self) {
        self.cross_product = self.a_prod != self.b_prod;
        self.signals_count = self.signal_tokens().filter(|t| !t.is_empty()).count();
        if self
            .match_id
            .as_deref()
            .is_some_and(|m| m.trim().is_empty())
        {
            self.match_id = None;
        }
    }

    /// Signal tokens as written, split on the literal `", "` separator.
    ///
    /// Tokens are not trimmed here; consumers that need trimming (the weight
    /// lookup) do it per token.
    pub fn signal_tokens(&self) -> impl Iterator<Item = &str> {
        self.signals.split(", ")
    }

    /// The score parsed as an integer, if present and well-formed.
    pub fn parsed_score(&self) -> Option<i64> {
        self.score.as_deref()?.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_product_is_product_inequality() {
        let same = Card::new(CardType::Synergy, "t1", "t2", "pay", "pay");
        let cross = Card::new(CardType::Conflict, "t1", "t3", "pay", "credit");
        assert!(!same.cross_product);
        assert!(cross.cross_product);
    }

    #[test]
    fn signals_count_ignores_empty_tokens() {
        let card = Card::new(CardType::Conflict, "a", "b", "x", "y")
            .with_signals("contract, kpi_tension");
        assert_eq!(card.signals_count, 2);

        let empty = Card::new(CardType::Conflict, "a", "b", "x", "y").with_signals("");
        assert_eq!(empty.signals_count, 0);
    }

    #[test]
    fn parsed_score_absorbs_garbage() {
        let card = Card::new(CardType::Duplicate, "a", "b", "x", "y");
        assert_eq!(card.parsed_score(), None);
        assert_eq!(card.clone().with_score("80").parsed_score(), Some(80));
        assert_eq!(card.clone().with_score(" 80 ").parsed_score(), Some(80));
        assert_eq!(card.clone().with_score("abc").parsed_score(), None);
        assert_eq!(card.with_score("80.5").parsed_score(), None);
    }

    #[test]
    fn blank_match_id_normalises_to_none() {
        let card = Card::new(CardType::Synergy, "a", "b", "x", "y").with_match_id("  ");
        assert_eq!(card.match_id, None);

        let card = Card::new(CardType::Synergy, "a", "b", "x", "y").with_match_id("m-7");
        assert_eq!(card.match_id.as_deref(), Some("m-7"));
    }

    #[test]
    fn card_type_parses_case_insensitively() {
        assert_eq!("CONFLICT".parse::<CardType>(), Ok(CardType::Conflict));
        assert_eq!("synergy".parse::<CardType>(), Ok(CardType::Synergy));
        assert!("merge".parse::<CardType>().is_err());
    }
}
