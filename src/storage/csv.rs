//! CSV storage backend
//!
//! One data directory holds the three backing tables (`tasks.csv`,
//! `cards.csv`, `scenario_cards.csv`). Loads are tolerant: a missing file
//! is no data, a malformed row is skipped with a warning. Replacement is
//! strict on parse (a bad upload must never clobber a good table) and
//! tolerant on write (an unwritable directory falls back to a known-good
//! location).

use super::traits::{DeckStore, StorageError, StorageResult, TableKind};
use crate::deck::{Card, Deck, DeckId, ScenarioCard, Task};
use chrono::Utc;
use csv::StringRecord;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// CSV-backed deck store over a data directory.
pub struct CsvStore {
    dir: PathBuf,
    fallback: PathBuf,
    id: DeckId,
}

impl CsvStore {
    /// Open a store over a data directory.
    ///
    /// The directory does not have to exist; all tables then load empty.
    /// Table writes that fail land in the system temp directory unless a
    /// different fallback is configured via [`CsvStore::with_fallback`].
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let id = DeckId::from_string(dir.to_string_lossy().into_owned());
        Self {
            dir,
            fallback: std::env::temp_dir(),
            id,
        }
    }

    /// Use a different fallback directory for unwritable table paths.
    pub fn with_fallback(mut self, fallback: impl AsRef<Path>) -> Self {
        self.fallback = fallback.as_ref().to_path_buf();
        self
    }

    /// Configured path of a table.
    pub fn table_path(&self, table: TableKind) -> PathBuf {
        self.dir.join(table.file_name())
    }

    fn load_tasks(&self) -> StorageResult<Vec<Task>> {
        let path = self.table_path(TableKind::Tasks);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = csv::Reader::from_path(&path)?;
        let headers = rdr.headers()?.clone();
        let mut tasks = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    warn!(table = "tasks", row = i + 2, error = %e, "skipping malformed row");
                    continue;
                }
            };
            match task_from_record(&headers, &record) {
                Some(task) => tasks.push(task),
                None => {
                    warn!(table = "tasks", row = i + 2, "skipping row without task_id");
                }
            }
        }
        Ok(tasks)
    }

    fn load_cards(&self) -> StorageResult<Vec<Card>> {
        let path = self.table_path(TableKind::Cards);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = csv::Reader::from_path(&path)?;
        let mut cards = Vec::new();
        for (i, row) in rdr.deserialize::<Card>().enumerate() {
            match row {
                Ok(mut card) => {
                    card.derive_fields();
                    cards.push(card);
                }
                Err(e) => {
                    warn!(table = "cards", row = i + 2, error = %e, "skipping malformed row");
                }
            }
        }
        Ok(cards)
    }

    fn load_scenarios(&self) -> StorageResult<Option<Vec<ScenarioCard>>> {
        let path = self.table_path(TableKind::Scenarios);
        if !path.exists() {
            return Ok(None);
        }
        let mut rdr = csv::Reader::from_path(&path)?;
        let mut scenarios = Vec::new();
        for (i, row) in rdr.deserialize::<ScenarioCard>().enumerate() {
            match row {
                Ok(mut scen) => {
                    scen.derive_fields();
                    scenarios.push(scen);
                }
                Err(e) => {
                    warn!(table = "scenarios", row = i + 2, error = %e, "skipping malformed row");
                }
            }
        }
        Ok(Some(scenarios))
    }
}

impl DeckStore for CsvStore {
    fn deck_id(&self) -> &DeckId {
        &self.id
    }

    fn load_deck(&self) -> StorageResult<Deck> {
        let tasks = self.load_tasks()?;
        let cards = self.load_cards()?;
        let scenarios = self.load_scenarios()?;
        info!(
            deck = %self.id,
            tasks = tasks.len(),
            cards = cards.len(),
            scenarios = scenarios.as_ref().map_or(0, |s| s.len()),
            "loaded deck"
        );
        Ok(Deck {
            id: self.id.clone(),
            tasks,
            cards,
            scenarios,
            loaded_at: Utc::now(),
        })
    }

    fn replace_table(&self, table: TableKind, data: &[u8]) -> StorageResult<PathBuf> {
        // Parse before touching disk; a malformed upload is an error here,
        // not a half-written table.
        let mut rdr = csv::Reader::from_reader(data);
        let headers = rdr.headers()?.clone();
        let mut records = Vec::new();
        for record in rdr.records() {
            records.push(record?);
        }

        let primary = self.table_path(table);
        match write_table(&primary, &headers, &records) {
            Ok(()) => Ok(primary),
            Err(e) => {
                let fallback = self.fallback.join(table.file_name());
                warn!(
                    table = %table,
                    path = %primary.display(),
                    fallback = %fallback.display(),
                    error = %e,
                    "table path not writable, using fallback"
                );
                write_table(&fallback, &headers, &records)
                    .map_err(|_| StorageError::NoWritableLocation(table.to_string()))?;
                Ok(fallback)
            }
        }
    }
}

fn task_from_record(headers: &StringRecord, record: &StringRecord) -> Option<Task> {
    let mut task = Task::default();
    for (header, value) in headers.iter().zip(record.iter()) {
        match header {
            "task_id" => task.task_id = value.to_string(),
            "product" => task.product = value.to_string(),
            _ => {
                task.extra.insert(header.to_string(), value.to_string());
            }
        }
    }
    if task.task_id.is_empty() {
        return None;
    }
    Some(task)
}

fn write_table(
    path: &Path,
    headers: &StringRecord,
    records: &[StringRecord],
) -> StorageResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(headers)?;
    for record in records {
        wtr.write_record(record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::CardType;
    use std::fs;

    fn write_fixture(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn fixture_store(dir: &tempfile::TempDir) -> CsvStore {
        write_fixture(
            dir.path(),
            "tasks.csv",
            "task_id,product,title\n\
             pay-101,payments,Unify checkout\n\
             crd-204,credit,Limit review\n",
        );
        write_fixture(
            dir.path(),
            "cards.csv",
            "type,a_id,b_id,a_prod,b_prod,signals,score,match_id\n\
             conflict,pay-101,crd-204,payments,credit,\"contract, kpi_tension\",,m-1\n\
             synergy,pay-101,crd-204,payments,credit,kpi_family,65,\n\
             merge,x,y,p,q,,,\n",
        );
        write_fixture(
            dir.path(),
            "scenario_cards.csv",
            "type,urgency,category,title,source,plain_text,match_id\n\
             conflict,HIGH,platform,Checkout clash,detector,Two tasks fight over checkout.,m-1\n",
        );
        CsvStore::open(dir.path())
    }

    #[test]
    fn loads_all_three_tables() {
        let dir = tempfile::tempdir().unwrap();
        let store = fixture_store(&dir);

        let deck = store.load_deck().unwrap();
        assert_eq!(deck.task_count(), 2);
        assert_eq!(deck.card_count(), 2); // the "merge" row is dropped
        assert_eq!(deck.scenario_count(), 1);

        let task = deck.task("pay-101").unwrap();
        assert_eq!(task.product, "payments");
        assert_eq!(task.extra.get("title").unwrap(), "Unify checkout");
    }

    #[test]
    fn derived_card_fields_are_computed_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = fixture_store(&dir);

        let deck = store.load_deck().unwrap();
        let conflict = &deck.cards[0];
        assert_eq!(conflict.card_type, CardType::Conflict);
        assert!(conflict.cross_product);
        assert_eq!(conflict.signals_count, 2);
        assert_eq!(conflict.score, None);
        assert_eq!(conflict.match_id.as_deref(), Some("m-1"));

        let synergy = &deck.cards[1];
        assert_eq!(synergy.parsed_score(), Some(65));
        assert_eq!(synergy.match_id, None);
    }

    #[test]
    fn missing_files_load_as_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::open(dir.path().join("does-not-exist"));

        let deck = store.load_deck().unwrap();
        assert_eq!(deck.task_count(), 0);
        assert_eq!(deck.card_count(), 0);
        assert!(deck.scenarios.is_none());
    }

    #[test]
    fn replace_table_rewrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let store = fixture_store(&dir);

        let upload = "task_id,product\nnew-1,lending\n";
        let written = store
            .replace_table(TableKind::Tasks, upload.as_bytes())
            .unwrap();
        assert_eq!(written, store.table_path(TableKind::Tasks));

        let deck = store.load_deck().unwrap();
        assert_eq!(deck.task_count(), 1);
        assert_eq!(deck.task("new-1").unwrap().product, "lending");
    }

    #[test]
    fn replace_table_rejects_unparseable_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let store = fixture_store(&dir);

        // Ragged row: wrong field count must fail, leaving the table alone.
        let upload = "task_id,product\nonly-one-field\n";
        assert!(store
            .replace_table(TableKind::Tasks, upload.as_bytes())
            .is_err());
        assert_eq!(store.load_deck().unwrap().task_count(), 2);
    }

    #[test]
    fn replace_table_falls_back_when_dir_is_unwritable() {
        let fallback = tempfile::tempdir().unwrap();
        // A data directory that cannot receive writes (parent doesn't exist).
        let store = CsvStore::open("/nonexistent/crossdeck-data")
            .with_fallback(fallback.path());

        let upload = "type,a_id,b_id,a_prod,b_prod\nconflict,a,b,x,y\n";
        let written = store
            .replace_table(TableKind::Cards, upload.as_bytes())
            .unwrap();
        assert_eq!(written, fallback.path().join("cards.csv"));
        assert!(written.exists());
    }

    #[test]
    fn nullable_columns_may_be_missing_entirely() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(
            dir.path(),
            "cards.csv",
            "type,a_id,b_id,a_prod,b_prod\nsynergy,a,b,x,x\n",
        );
        let store = CsvStore::open(dir.path());

        let deck = store.load_deck().unwrap();
        assert_eq!(deck.card_count(), 1);
        let card = &deck.cards[0];
        assert_eq!(card.signals, "");
        assert_eq!(card.score, None);
        assert!(!card.cross_product);
    }
}
