//! Core deck data structures

mod card;
mod engine;
mod scenario;
mod snapshot;
mod task;


pub use card::{Card, CardType};
pub use engine::DeckEngine;
pub use scenario::{urgency_weight, ScenarioCard};
pub use snapshot::{Deck, DeckId};
pub use task::Task;
