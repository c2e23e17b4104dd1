use std::collections::HashMap;
use std::fs::{File as StdFile, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use scopeguard::{ScopeGuard, guard};

use crate::models::HistoryEntry;

/// The single slot the calculation log lives under.
pub const HISTORY_KEY: &str = "calculator-history";

/// Log cap. Appending past this evicts the oldest (tail) entries.
pub const MAX_ENTRIES: usize = 10;

/// Persistent key-value store the history is kept in. One key, one
/// serialized value; the store knows nothing about entries.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// File-per-key store rooted in a state directory. Writes land in a tmp
/// file first and are renamed over the target, so a crash mid-write leaves
/// the previous value intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let target = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        let cleanup = guard(tmp.clone(), |path| {
            let _ = std::fs::remove_file(path);
        });
        {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp)?;
            let mut writer = std::io::BufWriter::new(&file);
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, &target)?;
        ScopeGuard::into_inner(cleanup);
        if let Ok(dir) = StdFile::open(&self.dir) {
            let _ = dir.sync_all();
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.slots.remove(key);
        Ok(())
    }
}

pub struct HistoryStore<S: KvStore> {
    store: S,
}

impl<S: KvStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Corrupt-store recovery policy: an absent key, an unreadable store,
    /// or a value that fails to parse all come back as an empty log. The
    /// failure is noted on stderr and never reaches the caller, so the UI
    /// stays interactive no matter what is on disk.
    pub fn load(&self) -> Vec<HistoryEntry> {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                eprintln!("Failed to read history, starting fresh: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(log) => log,
            Err(e) => {
                eprintln!("Failed to parse stored history, starting fresh: {}", e);
                Vec::new()
            }
        }
    }

    /// Read-modify-write; last writer wins across concurrent processes.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        let mut log = self.load();
        log.insert(0, entry);
        log.truncate(MAX_ENTRIES);
        let raw = serde_json::to_string(&log)?;
        self.store.put(HISTORY_KEY, &raw)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(HISTORY_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatusTier;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn entry(tn: f64, tv: f64, kg: f64) -> HistoryEntry {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        HistoryEntry::record(tn, tv, kg, StatusTier::Satisfactory, now, true)
    }

    #[test]
    fn load_on_empty_store_is_empty() {
        let store = HistoryStore::new(MemoryStore::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn append_puts_the_new_entry_first() {
        let mut store = HistoryStore::new(MemoryStore::new());
        store.append(entry(1.0, 1.0, 0.5)).unwrap();
        store.append(entry(8.0, 2.0, 0.8)).unwrap();

        let log = store.load();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].kg, 0.8);
        assert_eq!(log[1].kg, 0.5);
    }

    #[test]
    fn append_keeps_the_previous_log_truncated_behind_it() {
        let mut store = HistoryStore::new(MemoryStore::new());
        for i in 0..MAX_ENTRIES {
            store.append(entry(i as f64, 1.0, 0.5)).unwrap();
        }
        let before = store.load();

        store.append(entry(99.0, 1.0, 0.99)).unwrap();
        let after = store.load();

        assert_eq!(after.len(), MAX_ENTRIES);
        assert_eq!(after[0].tn, 99.0);
        assert_eq!(&after[1..], &before[..MAX_ENTRIES - 1]);
    }

    #[test]
    fn eleven_appends_leave_the_ten_most_recent_newest_first() {
        let mut store = HistoryStore::new(MemoryStore::new());
        for i in 1..=11 {
            store.append(entry(i as f64, 1.0, 0.5)).unwrap();
        }

        let log = store.load();
        assert_eq!(log.len(), 10);
        let tns: Vec<f64> = log.iter().map(|e| e.tn).collect();
        assert_eq!(
            tns,
            vec![11.0, 10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0]
        );
    }

    #[test]
    fn clear_then_load_is_empty() {
        let mut store = HistoryStore::new(MemoryStore::new());
        store.append(entry(5.0, 0.0, 1.0)).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn clear_on_an_empty_store_is_fine() {
        let mut store = HistoryStore::new(MemoryStore::new());
        store.clear().unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_value_loads_as_empty() {
        for junk in ["not json", "{\"tn\":1}", "42", "[{\"tn\":\"oops\"}]"] {
            let mut kv = MemoryStore::new();
            kv.put(HISTORY_KEY, junk).unwrap();
            let store = HistoryStore::new(kv);
            assert!(store.load().is_empty(), "junk {junk:?} should load empty");
        }
    }

    #[test]
    fn append_over_a_corrupt_value_starts_a_fresh_log() {
        let mut kv = MemoryStore::new();
        kv.put(HISTORY_KEY, "][").unwrap();
        let mut store = HistoryStore::new(kv);

        store.append(entry(5.0, 0.0, 1.0)).unwrap();
        let log = store.load();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].tn, 5.0);
    }
}
