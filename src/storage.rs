//! Durable local storage for the session record.
//!
//! The record is a single JSON object under a fixed key. Storage failures
//! are swallowed by contract: a broken backend leaves the session running
//! in memory only, it never surfaces an error. The loader is equally
//! forgiving, defaulting each field independently so corrupt or
//! partially-typed data can never break startup.

use crate::consts::STORAGE_KEY;
use crate::duration::CountingMode;
use crate::rows::DateRangeRow;
use crate::snapshot::SavedCalculation;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the session record lives. Read once at startup, written after
/// every state change; all failures are swallowed.
pub trait Storage {
    /// The stored payload, if any.
    fn read(&self) -> Option<String>;

    /// Replaces the stored payload. Errors are swallowed.
    fn write(&mut self, payload: &str);

    /// Removes the stored payload. Errors are swallowed.
    fn remove(&mut self);
}

/// File-backed storage: the fixed key maps to `<dir>/timeCreditCalculator.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn write(&mut self, payload: &str) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = fs::write(&self.path, payload);
    }

    fn remove(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// In-memory storage, used by tests and hosts that bring their own
/// persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Option<String> {
        self.slot.clone()
    }

    fn write(&mut self, payload: &str) {
        self.slot = Some(payload.to_owned());
    }

    fn remove(&mut self) {
        self.slot = None;
    }
}

/// Everything the durable record holds, already defaulted.
#[derive(Debug, Clone, Default)]
pub(crate) struct PersistedState {
    pub rows: Vec<DateRangeRow>,
    pub mode: CountingMode,
    pub identifier: String,
    pub saved: Vec<SavedCalculation>,
}

#[derive(Serialize)]
struct PersistedRecord<'a> {
    rows: &'a [DateRangeRow],
    mode: CountingMode,
    identifier: &'a str,
    #[serde(rename = "savedCalculations")]
    saved_calculations: &'a [SavedCalculation],
}

/// Serializes the full record. Returns `None` only if serde_json fails,
/// which the caller treats like any other storage failure.
pub(crate) fn encode(
    rows: &[DateRangeRow],
    mode: CountingMode,
    identifier: &str,
    saved: &[SavedCalculation],
) -> Option<String> {
    serde_json::to_string(&PersistedRecord {
        rows,
        mode,
        identifier,
        saved_calculations: saved,
    })
    .ok()
}

/// Decodes a stored payload, defaulting every field independently: invalid
/// JSON yields the full default, an unknown mode falls back to `StateJail`,
/// non-array rows/savedCalculations become empty, malformed rows are
/// skipped, and a missing `createdAt` becomes the load time.
pub(crate) fn decode(payload: Option<&str>) -> PersistedState {
    let Some(payload) = payload else {
        return PersistedState::default();
    };
    let value: Value = serde_json::from_str(payload).unwrap_or(Value::Null);

    PersistedState {
        rows: rows_from(value.get("rows")),
        mode: mode_from(value.get("mode")),
        identifier: value
            .get("identifier")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        saved: saved_from(value.get("savedCalculations")),
    }
}

fn rows_from(value: Option<&Value>) -> Vec<DateRangeRow> {
    value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn mode_from(value: Option<&Value>) -> CountingMode {
    value
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}

fn saved_from(value: Option<&Value>) -> Vec<SavedCalculation> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    let now = Utc::now();
    entries
        .iter()
        .filter_map(|entry| {
            let label = entry.get("label")?.as_str()?.trim();
            if label.is_empty() {
                return None;
            }
            let created_at = entry
                .get("createdAt")
                .and_then(|v| serde_json::from_value::<DateTime<Utc>>(v.clone()).ok())
                .unwrap_or(now);
            Some(SavedCalculation::new(
                label.to_owned(),
                rows_from(entry.get("rows")),
                mode_from(entry.get("mode")),
                created_at,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::row;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path());

        assert_eq!(storage.read(), None);

        storage.write("{\"rows\":[]}");
        assert_eq!(storage.read().as_deref(), Some("{\"rows\":[]}"));
        assert!(storage.path().ends_with("timeCreditCalculator.json"));

        storage.remove();
        assert_eq!(storage.read(), None);
    }

    #[test]
    fn test_file_storage_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.remove();
        storage.remove();
        assert_eq!(storage.read(), None);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let rows = vec![row(1, "01/01/25", "02/15/25"), row(2, "", "")];
        let saved = vec![SavedCalculation::new(
            "Case A".to_owned(),
            rows.clone(),
            CountingMode::TcjTdcj,
            Utc::now(),
        )];

        let payload = encode(&rows, CountingMode::TcjTdcj, "Case B", &saved).unwrap();
        let state = decode(Some(&payload));

        assert_eq!(state.rows, rows);
        assert_eq!(state.mode, CountingMode::TcjTdcj);
        assert_eq!(state.identifier, "Case B");
        assert_eq!(state.saved, saved);
    }

    #[test]
    fn test_decode_missing_payload() {
        let state = decode(None);
        assert!(state.rows.is_empty());
        assert_eq!(state.mode, CountingMode::StateJail);
        assert_eq!(state.identifier, "");
        assert!(state.saved.is_empty());
    }

    #[test]
    fn test_decode_invalid_json() {
        let state = decode(Some("{not json"));
        assert!(state.rows.is_empty());
        assert_eq!(state.mode, CountingMode::StateJail);
    }

    #[test]
    fn test_decode_unknown_mode_falls_back() {
        let state = decode(Some(r#"{"mode":"BOGUS"}"#));
        assert_eq!(state.mode, CountingMode::StateJail);
    }

    #[test]
    fn test_decode_wrong_typed_fields_default_independently() {
        let payload = r#"{"rows":42,"mode":7,"identifier":[],"savedCalculations":"nope"}"#;
        let state = decode(Some(payload));
        assert!(state.rows.is_empty());
        assert_eq!(state.mode, CountingMode::StateJail);
        assert_eq!(state.identifier, "");
        assert!(state.saved.is_empty());
    }

    #[test]
    fn test_decode_skips_malformed_rows() {
        let payload = r#"{"rows":[{"id":1,"start":"01/01/25","end":""},{"start":"no id"},17]}"#;
        let state = decode(Some(payload));
        assert_eq!(state.rows.len(), 1);
        assert_eq!(state.rows[0].start(), "01/01/25");
    }

    #[test]
    fn test_decode_saved_defaults_created_at() {
        let payload = r#"{"savedCalculations":[
            {"label":"Case A","rows":[],"mode":"TCJ_TDCJ"},
            {"label":"","rows":[]},
            {"rows":[]}
        ]}"#;
        let before = Utc::now();
        let state = decode(Some(payload));

        // Unlabeled entries are dropped, the rest default field by field
        assert_eq!(state.saved.len(), 1);
        let saved = &state.saved[0];
        assert_eq!(saved.label(), "Case A");
        assert_eq!(saved.mode(), CountingMode::TcjTdcj);
        assert!(saved.created_at() >= before);
    }
}
