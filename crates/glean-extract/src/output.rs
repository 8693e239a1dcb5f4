//! Persisting extracted records

use crate::error::ExtractError;
use glean_domain::Record;
use std::fs;
use std::path::Path;
use tracing::info;

/// Write records to a file as a pretty-printed JSON array.
///
/// Parent directories are created if missing. The file is overwritten when
/// it already exists.
pub fn save_records<P: AsRef<Path>>(path: P, records: &[Record]) -> Result<(), ExtractError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(records)
        .map_err(|e| ExtractError::Io(format!("failed to serialize records: {}", e)))?;
    fs::write(path, json)?;

    info!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record(name: &str, age: i64) -> Record {
        let mut record = Record::new();
        record.insert("name".to_string(), json!(name));
        record.insert("age".to_string(), json!(age));
        record
    }

    #[test]
    fn save_and_reload_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        let records = vec![sample_record("Alice", 25), sample_record("Bob", 31)];
        save_records(&path, &records).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let reloaded: Vec<Record> = serde_json::from_str(&raw).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded[0].get("name"), Some(&json!("Alice")));
        assert_eq!(reloaded[1].get("age"), Some(&json!(31)));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("records.json");

        save_records(&path, &[sample_record("Carol", 40)]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_empty_batch_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");

        save_records(&path, &[]).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let reloaded: Vec<Record> = serde_json::from_str(&raw).unwrap();
        assert!(reloaded.is_empty());
    }
}
