//! One record per file, plus an index file that keeps insertion order.
//!
//! ```text
//! <dir>/index        one id per line
//! <dir>/<id>.json    one record
//! ```
//!
//! Reads fail soft: missing or unparsable files are treated as absent.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{RsvpError, RsvpResult};

const INDEX_FILE: &str = "index";

pub struct Collection {
    dir: PathBuf,
}

impl Collection {
    pub fn new(dir: PathBuf) -> Self {
        Collection { dir }
    }

    fn record_path(&self, id: &str) -> Option<PathBuf> {
        is_valid_id(id).then(|| self.dir.join(format!("{}.json", id)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.record_path(id).is_some_and(|path| path.exists())
    }

    /// Ids from the index file, in insertion order.
    fn indexed_ids(&self) -> Vec<String> {
        match std::fs::read_to_string(self.dir.join(INDEX_FILE)) {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect(),
            Err(_) => vec![],
        }
    }

    /// Indexed ids first, then any record files the index doesn't know
    /// about (sorted by name) so nothing on disk goes missing.
    fn ids(&self) -> Vec<String> {
        let mut ids = self.indexed_ids();
        let known: HashSet<String> = ids.iter().cloned().collect();

        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return ids;
        };

        let mut orphans: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "json"))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .filter(|id| !known.contains(id))
            .collect();

        if !orphans.is_empty() {
            tracing::warn!(
                dir = %self.dir.display(),
                count = orphans.len(),
                "Found records missing from index"
            );
        }

        orphans.sort();
        ids.extend(orphans);
        ids
    }

    pub fn load<T: DeserializeOwned>(&self, id: &str) -> Option<T> {
        let path = self.record_path(id)?;
        let content = std::fs::read_to_string(&path).ok()?;

        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable record");
                None
            }
        }
    }

    pub fn load_all<T: DeserializeOwned>(&self) -> Vec<T> {
        let mut seen = HashSet::new();

        self.ids()
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .filter_map(|id| self.load(&id))
            .collect()
    }

    /// Write a new record and append its id to the index.
    /// Caller must hold the store lock.
    pub fn insert<T: Serialize>(&self, id: &str, record: &T) -> RsvpResult<()> {
        self.save(id, record)?;

        let mut ids = self.indexed_ids();
        ids.push(id.to_string());
        write_atomic(&self.dir.join(INDEX_FILE), ids.join("\n").as_bytes())
    }

    /// Replace one record file. Caller must hold the store lock.
    pub fn save<T: Serialize>(&self, id: &str, record: &T) -> RsvpResult<()> {
        let path = self.record_path(id).ok_or_else(|| {
            RsvpError::Validation(format!("Invalid record id '{}'", id))
        })?;

        std::fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_vec_pretty(record)?;
        write_atomic(&path, &content)
    }
}

/// Write to a sibling temp file, then rename over the target.
pub fn write_atomic(path: &Path, content: &[u8]) -> RsvpResult<()> {
    let mut temp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    temp_name.push(".tmp");
    let temp = path.with_file_name(temp_name);

    std::fs::write(&temp, content)?;
    std::fs::rename(&temp, path)?;
    Ok(())
}

/// Ids become file names, so only allow what uuids are made of.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        n: u32,
    }

    fn item(id: &str, n: u32) -> Item {
        Item { id: id.into(), n }
    }

    #[test]
    fn test_load_all_follows_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let items = Collection::new(dir.path().join("items"));

        items.insert("zeta", &item("zeta", 1)).unwrap();
        items.insert("alpha", &item("alpha", 2)).unwrap();

        let loaded: Vec<Item> = items.load_all();
        assert_eq!(loaded, vec![item("zeta", 1), item("alpha", 2)]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let items = Collection::new(dir.path().join("nothing-here"));

        let loaded: Vec<Item> = items.load_all();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_corrupt_record_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let items = Collection::new(dir.path().join("items"));

        items.insert("a", &item("a", 1)).unwrap();
        items.insert("b", &item("b", 2)).unwrap();
        std::fs::write(dir.path().join("items/a.json"), "{ not json").unwrap();

        let loaded: Vec<Item> = items.load_all();
        assert_eq!(loaded, vec![item("b", 2)]);
    }

    #[test]
    fn test_records_missing_from_index_are_still_listed() {
        let dir = tempfile::tempdir().unwrap();
        let items = Collection::new(dir.path().join("items"));

        items.insert("b", &item("b", 2)).unwrap();
        std::fs::remove_file(dir.path().join("items/index")).unwrap();
        items.insert("c", &item("c", 3)).unwrap();

        let loaded: Vec<Item> = items.load_all();
        assert_eq!(loaded, vec![item("c", 3), item("b", 2)]);
    }

    #[test]
    fn test_path_like_ids_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let items = Collection::new(dir.path().join("items"));

        assert!(items.load::<Item>("../secret").is_none());
        assert!(items.save("../secret", &item("x", 0)).is_err());
    }
}
