//! Named, timestamped snapshots of the row set and counting mode.

use crate::duration::{CountingMode, total_days};
use crate::rows::DateRangeRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix for auto-generated labels when the user saves without one.
const AUTO_LABEL_PREFIX: &str = "Calculation";

/// Why a save was rejected. These are the only user-visible errors in the
/// system; everything else degrades silently.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    /// A snapshot with the same label (case-insensitive) already exists.
    #[error("A calculation named \"{0}\" already exists")]
    DuplicateLabel(String),

    /// No row produced any days, so there is nothing worth saving.
    #[error("Nothing to save: enter at least one valid date range")]
    EmptyInput,
}

/// An immutable saved calculation. The rows are a deep copy taken at save
/// time and never alias the live store's rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCalculation {
    label: String,
    rows: Vec<DateRangeRow>,
    mode: CountingMode,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
}

impl SavedCalculation {
    pub(crate) fn new(
        label: String,
        rows: Vec<DateRangeRow>,
        mode: CountingMode,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            label,
            rows,
            mode,
            created_at,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rows(&self) -> &[DateRangeRow] {
        &self.rows
    }

    pub const fn mode(&self) -> CountingMode {
        self.mode
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// The single place label equality is decided; uniqueness, lookup, and the
/// session's active-label tracking all go through it.
pub(crate) fn labels_equal(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Ordered collection of saved calculations, labels unique
/// case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotStore {
    saved: Vec<SavedCalculation>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the store from persisted snapshots, keeping save order.
    pub fn from_saved(saved: Vec<SavedCalculation>) -> Self {
        Self { saved }
    }

    /// Saved calculations in insertion (save) order.
    pub fn iter(&self) -> std::slice::Iter<'_, SavedCalculation> {
        self.saved.iter()
    }

    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Validates and appends a new snapshot, deep-copying the rows.
    ///
    /// A blank label is replaced by `Calculation N` for the smallest unused
    /// `N`. Rejects a zero-day total before checking the label, so an empty
    /// form never burns an auto-generated name.
    pub fn save(
        &mut self,
        label: &str,
        rows: &[DateRangeRow],
        mode: CountingMode,
    ) -> Result<&SavedCalculation, SaveError> {
        if total_days(rows, mode) == 0 {
            return Err(SaveError::EmptyInput);
        }

        let label = label.trim();
        let label = if label.is_empty() {
            self.next_auto_label()
        } else if self.contains(label) {
            return Err(SaveError::DuplicateLabel(label.to_owned()));
        } else {
            label.to_owned()
        };

        self.saved
            .push(SavedCalculation::new(label, rows.to_vec(), mode, Utc::now()));
        // Just pushed, so the store cannot be empty here
        Ok(&self.saved[self.saved.len() - 1])
    }

    /// Case-insensitive lookup.
    pub fn select(&self, label: &str) -> Option<&SavedCalculation> {
        self.saved
            .iter()
            .find(|saved| labels_equal(&saved.label, label))
    }

    /// Removes the matching snapshot; silently does nothing when absent.
    pub fn delete(&mut self, label: &str) {
        self.saved.retain(|saved| !labels_equal(&saved.label, label));
    }

    pub fn contains(&self, label: &str) -> bool {
        self.select(label).is_some()
    }

    fn next_auto_label(&self) -> String {
        let mut n: usize = 1;
        loop {
            let candidate = format!("{AUTO_LABEL_PREFIX} {n}");
            if !self.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    pub(crate) fn saved(&self) -> &[SavedCalculation] {
        &self.saved
    }
}
