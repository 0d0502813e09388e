//! Spin statistics per set of entry names.
//!
//! Buckets are keyed by the sorted entry names only. Two wheels with the same
//! names share a bucket even when their weights differ; that is the
//! established policy and win rates should be read with it in mind.

use crate::{
    entry::Entry,
    store::LocalStore,
};
use color_eyre::eyre::{
    Result,
    WrapErr,
};
use itertools::Itertools;
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        Mutex,
    },
};

pub const SIGNATURE_SEPARATOR: &str = "|";
/// Store key the whole history is written under.
pub const HISTORY_KEY: &str = "spinDecideHistory";

pub type HistoryBook = BTreeMap<String, HistoryRecord>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub total: u64,
    pub results: BTreeMap<String, u64>,
}

impl HistoryRecord {
    pub fn wins(&self, name: &str) -> u64 {
        self.results.get(name).copied().unwrap_or(0)
    }

    /// Share of spins won by `name`, in percent.
    pub fn win_percentage(&self, name: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.wins(name) as f64 / self.total as f64 * 100.0
    }
}

/// Order- and weight-independent key for a set of entries.
pub fn signature(entries: &[Entry]) -> String {
    entries
        .iter()
        .map(|e| e.name.as_str())
        .sorted()
        .join(SIGNATURE_SEPARATOR)
}

/// Where the history book lives between sessions.
pub trait HistoryStorage {
    /// read the whole book, empty if nothing was stored yet
    fn load(&self) -> Result<HistoryBook>;

    /// overwrite the stored book
    fn save(&mut self, book: &HistoryBook) -> Result<()>;
}

#[derive(Clone, Default)]
pub struct InMemoryHistoryStorage {
    book: Arc<Mutex<HistoryBook>>,
}

impl InMemoryHistoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn book(&self) -> Arc<Mutex<HistoryBook>> {
        self.book.clone()
    }
}

impl HistoryStorage for InMemoryHistoryStorage {
    fn load(&self) -> Result<HistoryBook> {
        let guard = self
            .book
            .lock()
            .map_err(|_| color_eyre::eyre::eyre!("history lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&mut self, book: &HistoryBook) -> Result<()> {
        let mut guard = self
            .book
            .lock()
            .map_err(|_| color_eyre::eyre::eyre!("history lock poisoned"))?;
        *guard = book.clone();
        Ok(())
    }
}

/// Keeps the book as one JSON string under [`HISTORY_KEY`].
#[derive(Clone, Debug)]
pub struct LocalStoreHistoryStorage {
    store: LocalStore,
}

impl LocalStoreHistoryStorage {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }
}

impl HistoryStorage for LocalStoreHistoryStorage {
    fn load(&self) -> Result<HistoryBook> {
        match self.store.get(HISTORY_KEY)? {
            Some(raw) => serde_json::from_str(&raw).wrap_err("Failed to parse spin history"),
            None => Ok(HistoryBook::new()),
        }
    }

    fn save(&mut self, book: &HistoryBook) -> Result<()> {
        let raw = serde_json::to_string(book).wrap_err("Failed to serialize spin history")?;
        self.store.set(HISTORY_KEY, &raw)
    }
}

/// In-memory history with write-through persistence. The in-memory copy is
/// authoritative for the session; failed writes are logged and skipped.
pub struct HistoryStore<S> {
    storage: S,
    book: HistoryBook,
}

impl<S: HistoryStorage> HistoryStore<S> {
    pub fn open(storage: S) -> Self {
        let book = match storage.load() {
            Ok(book) => book,
            Err(e) => {
                tracing::warn!(error = %e, "could not load spin history, starting empty");
                HistoryBook::new()
            }
        };
        tracing::debug!(buckets = book.len(), "spin history loaded");
        Self { storage, book }
    }

    pub fn record(&mut self, signature: &str, winner: &str) {
        let record = self.book.entry(signature.to_owned()).or_default();
        record.total += 1;
        *record.results.entry(winner.to_owned()).or_insert(0) += 1;
        self.persist();
    }

    /// Removes the bucket for `signature`. Returns whether one existed.
    pub fn reset(&mut self, signature: &str) -> bool {
        let removed = self.book.remove(signature).is_some();
        if removed {
            self.persist();
        }
        removed
    }

    pub fn query(&self, signature: &str) -> HistoryRecord {
        self.book.get(signature).cloned().unwrap_or_default()
    }

    pub fn book(&self) -> &HistoryBook {
        &self.book
    }

    fn persist(&mut self) {
        if let Err(e) = self.storage.save(&self.book) {
            tracing::warn!(error = %e, "failed to persist spin history");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use color_eyre::eyre::eyre;

    struct FailingStorage;

    impl HistoryStorage for FailingStorage {
        fn load(&self) -> Result<HistoryBook> {
            Err(eyre!("unreadable"))
        }

        fn save(&mut self, _book: &HistoryBook) -> Result<()> {
            Err(eyre!("disk full"))
        }
    }

    #[test]
    fn signature__ignores_order_and_weight() {
        let left = vec![Entry::new("A", 1), Entry::new("B", 2)];
        let right = vec![Entry::new("B", 5), Entry::new("A", 1)];

        assert_eq!(signature(&left), signature(&right));
        assert_eq!(signature(&left), "A|B");
    }

    #[test]
    fn record__counts_total_and_per_name_wins() {
        // given
        let storage = InMemoryHistoryStorage::new();
        let mut history = HistoryStore::open(storage.clone());

        // when
        history.record("A|B", "A");
        history.record("A|B", "A");
        history.record("A|B", "B");

        // then
        let record = history.query("A|B");
        assert_eq!(record.total, 3);
        assert_eq!(record.wins("A"), 2);
        assert_eq!(record.wins("B"), 1);
        assert!((record.win_percentage("A") - 66.666).abs() < 0.01);
        let persisted = storage.book().lock().unwrap().clone();
        assert_eq!(persisted.get("A|B"), Some(&record));
    }

    #[test]
    fn query__unknown_signature_is_empty() {
        let history = HistoryStore::open(InMemoryHistoryStorage::new());

        let record = history.query("nope");

        assert_eq!(record, HistoryRecord::default());
        assert_eq!(record.win_percentage("x"), 0.0);
    }

    #[test]
    fn reset__only_removes_one_bucket() {
        let mut history = HistoryStore::open(InMemoryHistoryStorage::new());
        history.record("A|B", "A");
        history.record("C|D", "D");

        assert!(history.reset("A|B"));
        assert!(!history.reset("A|B"));

        assert_eq!(history.query("A|B").total, 0);
        assert_eq!(history.query("C|D").total, 1);
    }

    #[test]
    fn open__reloads_previous_session() {
        let storage = InMemoryHistoryStorage::new();
        let mut first = HistoryStore::open(storage.clone());
        first.record("A|B", "B");

        let second = HistoryStore::open(storage);

        assert_eq!(second.query("A|B").wins("B"), 1);
    }

    #[test]
    fn record__failed_write_keeps_memory_state() {
        let mut history = HistoryStore::open(FailingStorage);

        history.record("A|B", "A");

        assert_eq!(history.query("A|B").total, 1);
    }
}
