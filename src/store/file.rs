//! # JSON-Lines File Backend
//!
//! One file per collection at `<root>/<collection>.jsonl`, one document per
//! line. Appends and reads are serialized by a single mutex so a reader
//! never observes a half-written line.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::{Map, Value};

use super::backend::{validate_collection_name, DocumentStore};
use super::document::{DocumentId, StoredDocument};
use super::errors::{StoreError, StoreResult};
use super::filter::EqualityFilter;

const EXTENSION: &str = "jsonl";

#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    io_lock: Mutex<()>,
}

impl FileStore {
    /// Open (creating if needed) the database directory at `root`
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            StoreError::ConnectionFailed(format!("cannot open {}: {}", root.display(), e))
        })?;
        if !root.is_dir() {
            return Err(StoreError::ConnectionFailed(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        Ok(Self {
            root,
            io_lock: Mutex::new(()),
        })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{}.{}", collection, EXTENSION))
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, ()>> {
        self.io_lock
            .lock()
            .map_err(|_| StoreError::Internal("file lock poisoned".to_string()))
    }
}

impl DocumentStore for FileStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    fn insert_one(&self, collection: &str, fields: Map<String, Value>) -> StoreResult<DocumentId> {
        validate_collection_name(collection)?;

        let id = DocumentId::generate();
        let mut line = serde_json::to_string(&StoredDocument::new(id.clone(), fields))
            .map_err(|e| StoreError::InvalidDocument(e.to_string()))?;
        line.push('\n');

        let _guard = self.lock()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.collection_path(collection))?;
        file.write_all(line.as_bytes())?;
        file.flush()?;

        Ok(id)
    }

    fn find(
        &self,
        collection: &str,
        filter: &EqualityFilter,
        limit: Option<usize>,
    ) -> StoreResult<Vec<StoredDocument>> {
        validate_collection_name(collection)?;
        let limit = limit.unwrap_or(usize::MAX);

        let _guard = self.lock()?;
        let file = match fs::File::open(self.collection_path(collection)) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut documents = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            if documents.len() >= limit {
                break;
            }
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let doc: StoredDocument =
                serde_json::from_str(&line).map_err(|e| StoreError::Corrupt {
                    collection: collection.to_string(),
                    line: idx + 1,
                    reason: e.to_string(),
                })?;
            if filter.matches(&doc.fields) {
                documents.push(doc);
            }
        }

        Ok(documents)
    }

    fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_documents_survive_reopen() {
        let tmp = TempDir::new().unwrap();
        let id = {
            let store = FileStore::open(tmp.path()).unwrap();
            store.insert_one("person", fields(json!({"name": "Ada", "tier": 1}))).unwrap()
        };

        let store = FileStore::open(tmp.path()).unwrap();
        let docs = store.find("person", &EqualityFilter::new(), None).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert_eq!(docs[0].fields["tier"], json!(1));
    }

    #[test]
    fn test_filter_and_limit() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        for tier in [1, 2, 2, 2] {
            store.insert_one("person", fields(json!({"tier": tier}))).unwrap();
        }

        let filter = EqualityFilter::new().and_eq("tier", 2);
        assert_eq!(store.find("person", &filter, None).unwrap().len(), 3);
        assert_eq!(store.find("person", &filter, Some(2)).unwrap().len(), 2);
        assert_eq!(store.find("person", &EqualityFilter::new(), Some(0)).unwrap().len(), 0);
    }

    #[test]
    fn test_missing_collection_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        assert!(store.find("person", &EqualityFilter::new(), None).unwrap().is_empty());
    }

    #[test]
    fn test_collection_names_from_files() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        store.insert_one("person", Map::new()).unwrap();
        store.insert_one("circle", Map::new()).unwrap();
        fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(store.list_collection_names().unwrap(), vec!["circle", "person"]);
    }

    #[test]
    fn test_corrupt_line_reported() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        store.insert_one("person", Map::new()).unwrap();

        let mut file = OpenOptions::new()
            .append(true)
            .open(tmp.path().join("person.jsonl"))
            .unwrap();
        file.write_all(b"{not json\n").unwrap();

        match store.find("person", &EqualityFilter::new(), None) {
            Err(StoreError::Corrupt { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected corrupt error, got {:?}", other),
        }
    }

    #[test]
    fn test_open_fails_when_root_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let err = FileStore::open(blocker.join("hundred")).unwrap_err();
        assert!(err.is_unavailable());
    }
}
