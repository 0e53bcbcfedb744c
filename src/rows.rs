//! The ordered set of date-range rows the user is editing.

use crate::normalize::normalize;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identifier of a row, unique within a store for its lifetime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RowId(u64);

impl RowId {
    pub(crate) const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Which endpoint of a row an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Start,
    End,
}

/// One editable date range. The text fields hold raw or normalized
/// short-date text; parsing happens at computation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeRow {
    id: RowId,
    start: String,
    end: String,
}

impl DateRangeRow {
    fn blank(id: RowId) -> Self {
        Self {
            id,
            start: String::new(),
            end: String::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(id: RowId, start: &str, end: &str) -> Self {
        Self {
            id,
            start: start.to_owned(),
            end: end.to_owned(),
        }
    }

    pub const fn id(&self) -> RowId {
        self.id
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn is_blank(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }

    fn field(&self, field: Field) -> &str {
        match field {
            Field::Start => &self.start,
            Field::End => &self.end,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Start => &mut self.start,
            Field::End => &mut self.end,
        }
    }
}

/// Ordered collection of rows. Never empty: the last row is cleared rather
/// than removed, and ids are never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowStore {
    rows: Vec<DateRangeRow>,
    next_id: u64,
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RowStore {
    /// A store holding one blank row.
    pub fn new() -> Self {
        let mut store = Self {
            rows: Vec::new(),
            next_id: 1,
        };
        store.add_row();
        store
    }

    /// Rebuilds a store from persisted rows, reseeding the id counter above
    /// the largest seen id. Duplicate ids in a tampered payload get fresh
    /// ones so edits cannot land on the wrong row. An empty input yields
    /// one blank row.
    pub fn from_rows(mut rows: Vec<DateRangeRow>) -> Self {
        let mut next_id = rows.iter().map(|row| row.id.0 + 1).max().unwrap_or(1);
        let mut seen = HashSet::new();
        for row in &mut rows {
            if !seen.insert(row.id) {
                row.id = RowId::new(next_id);
                next_id += 1;
            }
        }
        let mut store = Self { rows, next_id };
        if store.rows.is_empty() {
            store.add_row();
        }
        store
    }

    pub fn rows(&self) -> &[DateRangeRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a blank row and returns its freshly allocated id.
    pub fn add_row(&mut self) -> RowId {
        let id = RowId::new(self.next_id);
        self.next_id += 1;
        self.rows.push(DateRangeRow::blank(id));
        id
    }

    /// Removes the final row, unless it is the only one, in which case its
    /// fields are cleared instead.
    pub fn remove_last_row(&mut self) {
        if self.rows.len() > 1 {
            self.rows.pop();
        } else if let Some(row) = self.rows.last_mut() {
            row.start.clear();
            row.end.clear();
        }
    }

    /// Replaces one endpoint's text. Unknown ids are ignored.
    pub fn update_field(&mut self, id: RowId, field: Field, value: &str) {
        if let Some(row) = self.find_mut(id) {
            *row.field_mut(field) = value.to_owned();
        }
    }

    /// Rewrites one endpoint with its normalized form. Invoked when the
    /// user finishes editing a field, not on every keystroke.
    pub fn normalize_field(&mut self, id: RowId, field: Field) {
        if let Some(row) = self.find_mut(id) {
            let canonical = normalize(row.field(field));
            *row.field_mut(field) = canonical;
        }
    }

    /// Where input focus goes after the user advances out of a field:
    /// start moves to the same row's end; the end of any row but the last
    /// moves to the next row's start; the end of the last row appends a new
    /// row and focuses its start. Unknown ids yield `None`.
    pub fn advance_focus(&mut self, id: RowId, field: Field) -> Option<(RowId, Field)> {
        let index = self.rows.iter().position(|row| row.id == id)?;
        match field {
            Field::Start => Some((id, Field::End)),
            Field::End => match self.rows.get(index + 1) {
                Some(next) => Some((next.id, Field::Start)),
                None => Some((self.add_row(), Field::Start)),
            },
        }
    }

    fn find_mut(&mut self, id: RowId) -> Option<&mut DateRangeRow> {
        self.rows.iter_mut().find(|row| row.id == id)
    }
}
