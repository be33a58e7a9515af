//! Ranking and filter engine
//!
//! Pure functions over a loaded deck: select cards with conjunctive
//! predicates, order them by display priority, and correlate them with
//! their scenario narratives. Nothing here mutates the deck.

mod correlate;
mod filter;
mod priority;
mod scenario;
mod types;

pub use correlate::{correlate, executive_summary};
pub use filter::CardFilter;
pub use priority::{priority, signal_weight, type_weight};
pub use scenario::ScenarioFilter;
pub use types::{ExecutiveSummary, FilterResult, ScenarioResult};
