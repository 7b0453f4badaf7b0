//! JSON index persistence shared by every resource manager.
//!
//! An index is a pretty-printed JSON array holding every record of one
//! resource type. It is loaded whole at start-up and rewritten whole after
//! each mutation (temp file + rename).

use chrono::Local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::Timestamp;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================================
// Record
// ============================================================================

/// A row of an index file.
pub trait Record: Serialize + DeserializeOwned + Clone {
    fn id(&self) -> &str;
    fn created_at(&self) -> Timestamp;
}

/// Clone `records` ordered by creation time, newest first. Records created
/// at the same instant keep reverse insertion order.
pub fn newest_first<T: Record>(records: &[T]) -> Vec<T> {
    let mut indexed: Vec<(usize, &T)> = records.iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| ib.cmp(ia))
    });
    indexed.into_iter().map(|(_, r)| r.clone()).collect()
}

// ============================================================================
// Array Files
// ============================================================================

/// Read a JSON array file. A missing or blank file is an empty collection.
///
/// A file that fails to decode is renamed to `<name>.corrupt-<timestamp>`
/// and treated as empty, so the damaged data stays on disk for recovery.
pub fn read_array<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str(&text) {
        Ok(records) => Ok(records),
        Err(e) => {
            let moved_to = quarantine(path)?;
            log::error!(
                "[STORE] {} is not a valid index ({}); moved to {} and starting empty",
                path.display(),
                e,
                moved_to.display()
            );
            Ok(Vec::new())
        }
    }
}

/// Replace `path` with `records` as a pretty-printed JSON array.
pub fn write_array<T: Serialize>(path: &Path, records: &[T]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut bytes = serde_json::to_vec_pretty(records)?;
    bytes.push(b'\n');

    let tmp = sibling(path, "tmp");
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn quarantine(path: &Path) -> StoreResult<PathBuf> {
    let suffix = format!("corrupt-{}", Local::now().format("%Y%m%d%H%M%S"));
    let target = sibling(path, &suffix);
    fs::rename(path, &target)?;
    Ok(target)
}

/// `dir/name.json` -> `dir/name.json.<suffix>`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

// ============================================================================
// JsonIndex
// ============================================================================

/// In-memory copy of one index file.
///
/// Mutations are written through immediately; if the write fails the
/// in-memory state is rolled back and the error returned.
#[derive(Debug)]
pub struct JsonIndex<T> {
    path: PathBuf,
    records: Vec<T>,
}

impl<T: Record> JsonIndex<T> {
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let records = read_array(&path)?;
        Ok(Self { path, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn list(&self) -> Vec<T> {
        newest_first(&self.records)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn save(&self) -> StoreResult<()> {
        write_array(&self.path, &self.records)
    }

    pub fn insert(&mut self, record: T) -> StoreResult<T> {
        self.records.push(record.clone());
        if let Err(e) = self.save() {
            self.records.pop();
            return Err(e);
        }
        Ok(record)
    }

    /// Apply `f` to the record with `id` and persist. `Ok(None)` if absent.
    pub fn update<F>(&mut self, id: &str, f: F) -> StoreResult<Option<T>>
    where
        F: FnOnce(&mut T),
    {
        let Some(pos) = self.position(id) else {
            return Ok(None);
        };

        let before = self.records[pos].clone();
        f(&mut self.records[pos]);
        if let Err(e) = self.save() {
            self.records[pos] = before;
            return Err(e);
        }
        Ok(Some(self.records[pos].clone()))
    }

    pub fn remove(&mut self, id: &str) -> StoreResult<Option<T>> {
        let Some(pos) = self.position(id) else {
            return Ok(None);
        };

        let removed = self.records.remove(pos);
        if let Err(e) = self.save() {
            self.records.insert(pos, removed);
            return Err(e);
        }
        Ok(Some(removed))
    }

    pub fn clear(&mut self) -> StoreResult<()> {
        let old = std::mem::take(&mut self.records);
        if let Err(e) = self.save() {
            self.records = old;
            return Err(e);
        }
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::local_time;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Item {
        id: String,
        label: String,
        #[serde(with = "local_time")]
        created_at: Timestamp,
    }

    impl Record for Item {
        fn id(&self) -> &str {
            &self.id
        }
        fn created_at(&self) -> Timestamp {
            self.created_at
        }
    }

    fn item(id: &str, created: &str) -> Item {
        Item {
            id: id.to_string(),
            label: format!("label {}", id),
            created_at: local_time::parse(created).unwrap(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let index: JsonIndex<Item> = JsonIndex::open(dir.path().join("index.json")).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_insert_persists_and_reloads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("index.json");

        let mut index = JsonIndex::open(&path).unwrap();
        index.insert(item("a", "2024-01-01 10:00:00")).unwrap();
        index.insert(item("b", "2024-01-02 10:00:00")).unwrap();

        let reloaded: JsonIndex<Item> = JsonIndex::open(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("b").unwrap().label, "label b");
        assert!(!sibling(&path, "tmp").exists());
    }

    #[test]
    fn test_list_newest_first_with_ties() {
        let dir = TempDir::new().unwrap();
        let mut index = JsonIndex::open(dir.path().join("index.json")).unwrap();
        index.insert(item("old", "2024-01-01 10:00:00")).unwrap();
        index.insert(item("tie1", "2024-01-05 10:00:00")).unwrap();
        index.insert(item("tie2", "2024-01-05 10:00:00")).unwrap();
        index.insert(item("mid", "2024-01-03 10:00:00")).unwrap();

        let ids: Vec<String> = index.list().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["tie2", "tie1", "mid", "old"]);
    }

    #[test]
    fn test_update_and_remove() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        let mut index = JsonIndex::open(&path).unwrap();
        index.insert(item("a", "2024-01-01 10:00:00")).unwrap();

        let updated = index
            .update("a", |i| i.label = "renamed".to_string())
            .unwrap()
            .unwrap();
        assert_eq!(updated.label, "renamed");
        assert!(index.update("missing", |_| {}).unwrap().is_none());

        let removed = index.remove("a").unwrap().unwrap();
        assert_eq!(removed.id, "a");
        assert!(index.remove("a").unwrap().is_none());

        let reloaded: JsonIndex<Item> = JsonIndex::open(&path).unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_corrupt_index_is_moved_aside() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, "{ not json").unwrap();

        let index: JsonIndex<Item> = JsonIndex::open(&path).unwrap();
        assert!(index.is_empty());
        assert!(!path.exists());

        let preserved: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| name.starts_with("index.json.corrupt-"))
            .collect();
        assert_eq!(preserved.len(), 1);
        let kept = fs::read_to_string(dir.path().join(&preserved[0])).unwrap();
        assert_eq!(kept, "{ not json");
    }

    #[test]
    fn test_blank_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, "  \n").unwrap();
        let records: Vec<Item> = read_array(&path).unwrap();
        assert!(records.is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_non_ascii_written_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        let mut rec = item("a", "2024-01-01 10:00:00");
        rec.label = "完成项目文档".to_string();
        write_array(&path, &[rec]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("完成项目文档"));
    }
}
