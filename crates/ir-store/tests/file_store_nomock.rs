//! No-mock tests for the file-backed report store.
//!
//! Exercises the real filesystem path end to end:
//! - Missing store file reads as empty (missing-data outcome)
//! - Writer output is readable by the reader after reopening
//! - Hand-edited or corrupted store files surface as load errors

use ir_store::{
    FileStore, LoadError, ReportStore, StoreError, StoreReader, StoreWriter,
    INSTALLATION_DATA_KEY, REPORT_FORM_KEY,
};
use tempfile::tempdir;

const FORM: &str = r#"{"clientName":"Acme","preparedBy":"J. Doe","reportDate":"2024-01-15",
    "introduction":"Intro","conclusion":"Thanks"}"#;

#[test]
fn test_missing_file_reads_as_missing_data() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(&dir.path().join("store.json")).unwrap();

    assert!(store.keys().unwrap().is_empty());
    let err = StoreReader::new(&store).load().unwrap_err();
    assert!(matches!(err, LoadError::MissingData { .. }));
}

#[test]
fn test_write_reopen_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");

    {
        let mut store = FileStore::open(&path).unwrap();
        let mut writer = StoreWriter::new(&mut store);
        writer
            .write_records_json(r#"[{"Unit":"101","Toilet":1},{"Unit":"102","Toilet":2}]"#)
            .unwrap();
        writer.write_form_json(FORM).unwrap();
    }

    let store = FileStore::open(&path).unwrap();
    assert_eq!(
        store.keys().unwrap(),
        vec![INSTALLATION_DATA_KEY.to_string(), REPORT_FORM_KEY.to_string()]
    );

    let input = StoreReader::new(&store).load().unwrap();
    assert_eq!(input.records.len(), 2);
    assert_eq!(input.records[1].cell_text("Unit"), "102");
    assert_eq!(input.form.prepared_by, "J. Doe");
}

#[test]
fn test_stored_string_that_is_not_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    let mut map = serde_json::Map::new();
    map.insert(INSTALLATION_DATA_KEY.to_string(), "[{broken".into());
    map.insert(REPORT_FORM_KEY.to_string(), FORM.into());
    std::fs::write(&path, serde_json::Value::Object(map).to_string()).unwrap();

    let store = FileStore::open(&path).unwrap();
    let err = StoreReader::new(&store).load().unwrap_err();
    assert_eq!(err.kind(), "parse_failure");
}

#[test]
fn test_corrupted_store_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let store = FileStore::open(&path).unwrap();
    assert!(matches!(store.keys(), Err(StoreError::Corrupted(_))));

    let err = StoreReader::new(&store).load().unwrap_err();
    assert!(matches!(err, LoadError::Store(_)));
}

#[test]
fn test_non_string_value_is_corrupted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, r#"{"installationData": [1]}"#).unwrap();

    let store = FileStore::open(&path).unwrap();
    assert!(matches!(
        store.get(INSTALLATION_DATA_KEY),
        Err(StoreError::Corrupted(_))
    ));
}

#[test]
fn test_clear_removes_keys_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    let mut store = FileStore::open(&path).unwrap();
    store.set("unrelated", "keep".to_string()).unwrap();
    StoreWriter::new(&mut store).write_form_json(FORM).unwrap();

    let removed = StoreWriter::new(&mut store).clear().unwrap();
    assert_eq!(removed, 1);

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.keys().unwrap(), vec!["unrelated".to_string()]);
}

#[test]
fn test_directory_path_rejected() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        FileStore::open(dir.path()),
        Err(StoreError::Corrupted(_))
    ));
}
