//! DeckEngine: process-wide cache of loaded decks

use super::snapshot::{Deck, DeckId};
use crate::storage::{DeckStore, StorageResult};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Process-wide cache of loaded decks, keyed by deck identity.
///
/// The backing tables are read once per deck and the resulting snapshot is
/// shared until something explicitly invalidates it: a reload, or a table
/// replacement. Interactions in between run against the cached `Arc<Deck>`
/// and never touch disk.
#[derive(Debug, Default)]
pub struct DeckEngine {
    decks: DashMap<DeckId, Arc<Deck>>,
}

impl DeckEngine {
    /// Create a new engine with an empty cache.
    pub fn new() -> Self {
        Self {
            decks: DashMap::new(),
        }
    }

    /// Return the cached deck for the store's identity, loading it on first
    /// use.
    pub fn load(&self, store: &dyn DeckStore) -> StorageResult<Arc<Deck>> {
        if let Some(deck) = self.decks.get(store.deck_id()) {
            debug!(deck = %store.deck_id(), "deck cache hit");
            return Ok(deck.clone());
        }
        self.reload(store)
    }

    /// Drop any cached snapshot for the store and load fresh from disk.
    pub fn reload(&self, store: &dyn DeckStore) -> StorageResult<Arc<Deck>> {
        let deck = Arc::new(store.load_deck()?);
        self.decks.insert(deck.id.clone(), deck.clone());
        Ok(deck)
    }

    /// Remove a cached deck. Returns true if a snapshot was cached.
    pub fn invalidate(&self, id: &DeckId) -> bool {
        self.decks.remove(id).is_some()
    }

    /// Get a cached deck without loading.
    pub fn cached(&self, id: &DeckId) -> Option<Arc<Deck>> {
        self.decks.get(id).map(|d| d.clone())
    }

    /// Number of cached decks.
    pub fn deck_count(&self) -> usize {
        self.decks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Card, CardType};
    use crate::storage::TableKind;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store stub that counts how many times it is read.
    struct CountingStore {
        id: DeckId,
        loads: AtomicUsize,
    }

    impl CountingStore {
        fn new() -> Self {
            Self {
                id: DeckId::from("counting"),
                loads: AtomicUsize::new(0),
            }
        }
    }

    impl DeckStore for CountingStore {
        fn deck_id(&self) -> &DeckId {
            &self.id
        }

        fn load_deck(&self) -> StorageResult<Deck> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            let mut deck = Deck::new(self.id.clone());
            deck.cards
                .push(Card::new(CardType::Conflict, "a", "b", "x", "y"));
            Ok(deck)
        }

        fn replace_table(&self, _table: TableKind, _data: &[u8]) -> StorageResult<PathBuf> {
            unimplemented!("not used by engine tests")
        }
    }

    #[test]
    fn load_reads_the_store_once() {
        let engine = DeckEngine::new();
        let store = CountingStore::new();

        let first = engine.load(&store).unwrap();
        let second = engine.load(&store).unwrap();

        assert_eq!(store.loads.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn reload_bypasses_the_cache() {
        let engine = DeckEngine::new();
        let store = CountingStore::new();

        engine.load(&store).unwrap();
        engine.reload(&store).unwrap();

        assert_eq!(store.loads.load(Ordering::SeqCst), 2);
        assert_eq!(engine.deck_count(), 1);
    }

    #[test]
    fn invalidate_forces_the_next_load_to_disk() {
        let engine = DeckEngine::new();
        let store = CountingStore::new();

        engine.load(&store).unwrap();
        assert!(engine.invalidate(store.deck_id()));
        assert!(engine.cached(store.deck_id()).is_none());

        engine.load(&store).unwrap();
        assert_eq!(store.loads.load(Ordering::SeqCst), 2);
    }
}
