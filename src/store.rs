//! Loading phototag records from a store snapshot: either a single JSON
//! array file, or a directory holding one JSON document per record the way
//! the hosted store exports them.

use std::{fs, io, path::Path};

use thiserror::Error;
use tracing::{debug, warn};

use crate::record::Phototag;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store: {0}")]
    Io(#[from] io::Error),
    #[error("malformed store snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bad store walk pattern: {0}")]
    Pattern(#[from] globwalk::GlobError),
}

/// Load every phototag under `path`. A file is parsed as a JSON array of
/// records; a directory is walked for per-record `*.json` documents.
pub fn load_phototags(path: &Path) -> Result<Vec<Phototag>, StoreError> {
    if path.is_dir() {
        load_documents(path)
    } else {
        load_array(path)
    }
}

/// A snapshot file holds the whole collection. The store hands us trusted
/// shapes, so a snapshot that does not parse is an error, not a skip.
fn load_array(path: &Path) -> Result<Vec<Phototag>, StoreError> {
    let contents = fs::read_to_string(path)?;
    let records: Vec<Phototag> = serde_json::from_str(&contents)?;
    debug!(count = records.len(), "store snapshot loaded");
    Ok(records)
}

/// One record per `*.json` document, visited in path order. Document keys
/// in the hosted store sort chronologically, so path order is store order.
/// Individual documents that fail to parse are skipped with a warning.
fn load_documents(dir: &Path) -> Result<Vec<Phototag>, StoreError> {
    let mut paths: Vec<_> = globwalk::GlobWalkerBuilder::from_patterns(dir, &["**/*.json"])
        .build()?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.into_path()),
            Err(err) => {
                warn!(%err, "skipping unreadable store entry");
                None
            }
        })
        .collect();
    paths.sort();

    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str::<Phototag>(&contents) {
            Ok(record) => records.push(record),
            Err(err) => warn!(
                path = %path.display(),
                %err,
                "skipping malformed store document"
            ),
        }
    }
    debug!(count = records.len(), "store documents loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn doc(id: &str, lat: f64) -> String {
        format!(
            r#"{{"id":"{id}","locationLat":{lat},"locationLong":0.0,"description":"phototag {id}","timestamp":"2020-01-01","upvotes":1,"tags":["bench"]}}"#
        )
    }

    #[test]
    fn loads_an_array_snapshot_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("phototags.json");
        fs::write(&path, format!("[{},{}]", doc("b", 1.0), doc("a", 2.0))).unwrap();

        let records = load_phototags(&path).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "b");
        assert_eq!(records[1].id, "a");
    }

    #[test]
    fn loads_documents_in_path_order_and_skips_malformed_ones() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.json"), doc("b", 1.0)).unwrap();
        fs::write(dir.path().join("a.json"), doc("a", 2.0)).unwrap();
        fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a document").unwrap();

        let records = load_phototags(dir.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "a");
        assert_eq!(records[1].id, "b");
    }

    #[test]
    fn walks_nested_document_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("2020").join("01");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("a.json"), doc("a", 2.0)).unwrap();

        let records = load_phototags(dir.path()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "a");
    }

    #[test]
    fn an_empty_document_directory_is_an_empty_feed() {
        let dir = tempdir().unwrap();

        assert!(load_phototags(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn a_missing_snapshot_is_an_io_error() {
        let dir = tempdir().unwrap();

        let err = load_phototags(&dir.path().join("absent.json")).unwrap_err();

        assert!(matches!(err, StoreError::Io(_)));
    }

    #[test]
    fn a_malformed_snapshot_is_a_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("phototags.json");
        fs::write(&path, "{not an array").unwrap();

        let err = load_phototags(&path).unwrap_err();

        assert!(matches!(err, StoreError::Json(_)));
    }
}
