//! The session controller: wires user edits to the row store, switches
//! between the live calculation and saved snapshots, and formats the
//! combined result expression.

use crate::ShortDate;
use crate::consts::{COPY_NOTICE_DURATION, SAVE_NOTICE_DURATION};
use crate::duration::{CountingMode, format_days, total_days};
use crate::rows::{Field, RowId, RowStore};
use crate::snapshot::{SaveError, SnapshotStore, labels_equal};
use crate::storage::{self, Storage};
use std::time::{Duration, Instant};

/// Write-only text export seam. The host platform supplies the real
/// clipboard; failures are swallowed by the session.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Opaque clipboard failure; the session only cares that the copy did not
/// happen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("clipboard unavailable")]
pub struct ClipboardError;

/// Transient confirmation messages. A new one replaces any pending one, so
/// a stale clear can never fire after a more recent message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Saved,
    Copied,
}

#[derive(Debug, Clone)]
struct Notice {
    kind: NoticeKind,
    expires_at: Instant,
}

/// The live calculation captured when the user first navigates away from
/// it, so returning to live editing loses nothing.
#[derive(Debug, Clone)]
struct LiveState {
    rows: RowStore,
    mode: CountingMode,
    identifier: String,
}

/// Client-local session state: the working rows, the selected counting
/// mode, snapshot bookkeeping, and persistence. Single-threaded and
/// event-driven; every operation completes synchronously.
#[derive(Debug)]
pub struct Session<S: Storage> {
    rows: RowStore,
    mode: CountingMode,
    identifier: String,
    snapshots: SnapshotStore,
    active: Option<String>,
    live: Option<LiveState>,
    notice: Option<Notice>,
    save_error: Option<SaveError>,
    storage: S,
}

impl<S: Storage> Session<S> {
    /// Reconstructs the session from durable storage, falling back to
    /// defaults for anything missing or malformed. Always starts live.
    pub fn load(storage: S) -> Self {
        let state = storage::decode(storage.read().as_deref());
        Self {
            rows: RowStore::from_rows(state.rows),
            mode: state.mode,
            identifier: state.identifier,
            snapshots: SnapshotStore::from_saved(state.saved),
            active: None,
            live: None,
            notice: None,
            save_error: None,
            storage,
        }
    }

    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    pub const fn mode(&self) -> CountingMode {
        self.mode
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// Label of the snapshot currently being viewed, or `None` when the
    /// user is editing the live calculation.
    pub fn active_label(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_live(&self) -> bool {
        self.active.is_none()
    }

    /// The inline save-validation message, if one is showing.
    pub fn save_error(&self) -> Option<&SaveError> {
        self.save_error.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // --- edits ---

    pub fn add_row(&mut self) -> RowId {
        let id = self.rows.add_row();
        self.persist();
        id
    }

    pub fn remove_last_row(&mut self) {
        self.rows.remove_last_row();
        self.persist();
    }

    pub fn update_field(&mut self, id: RowId, field: Field, value: &str) {
        self.rows.update_field(id, field, value);
        self.persist();
    }

    pub fn normalize_field(&mut self, id: RowId, field: Field) {
        self.rows.normalize_field(id, field);
        self.persist();
    }

    pub fn advance_focus(&mut self, id: RowId, field: Field) -> Option<(RowId, Field)> {
        let target = self.rows.advance_focus(id, field);
        self.persist();
        target
    }

    pub fn set_mode(&mut self, mode: CountingMode) {
        self.mode = mode;
        self.persist();
    }

    /// Also clears any inline save error, since the user is addressing it.
    pub fn set_identifier(&mut self, identifier: &str) {
        self.identifier = identifier.to_owned();
        self.save_error = None;
        self.persist();
    }

    // --- results ---

    pub fn total(&self) -> i64 {
        total_days(self.rows.rows(), self.mode)
    }

    /// The combined expression: one `"(start - end)"` part per fully
    /// parsed row, joined with `" + "`, then the formatted total. Rows
    /// that fail to parse are silently excluded. Empty when nothing
    /// parses.
    pub fn expression(&self) -> String {
        let mut parts = Vec::new();
        for row in self.rows.rows() {
            if let (Ok(start), Ok(end)) = (
                row.start().parse::<ShortDate>(),
                row.end().parse::<ShortDate>(),
            ) {
                parts.push(format!("({start} - {end})"));
            }
        }
        if parts.is_empty() {
            return String::new();
        }
        format!("{} = {}", parts.join(" + "), format_days(self.total()))
    }

    // --- snapshots ---

    /// Saves the working calculation under the session identifier. On
    /// success the active selection is untouched and a transient
    /// confirmation is posted; failures become the inline save error.
    pub fn save_calculation(&mut self) -> Result<(), SaveError> {
        let label = self.identifier.clone();
        match self.snapshots.save(&label, self.rows.rows(), self.mode) {
            Ok(_) => {
                self.save_error = None;
                self.post_notice(NoticeKind::Saved, SAVE_NOTICE_DURATION);
                self.persist();
                Ok(())
            }
            Err(err) => {
                self.save_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Switches what the form shows. `Some(label)` views a saved snapshot
    /// (capturing the live state first if leaving it); `None` returns to
    /// live editing, restoring the captured state. Returns false when the
    /// label does not resolve.
    pub fn select_saved(&mut self, label: Option<&str>) -> bool {
        match label {
            Some(label) => {
                let Some(snapshot) = self.snapshots.select(label) else {
                    return false;
                };
                let rows = snapshot.rows().to_vec();
                let mode = snapshot.mode();
                let name = snapshot.label().to_owned();

                if self.active.is_none() {
                    self.live = Some(LiveState {
                        rows: self.rows.clone(),
                        mode: self.mode,
                        identifier: self.identifier.clone(),
                    });
                }
                self.rows = RowStore::from_rows(rows);
                self.mode = mode;
                self.identifier = name.clone();
                self.active = Some(name);
                self.persist();
                true
            }
            None => {
                if self.active.take().is_some() {
                    self.restore_live();
                    self.persist();
                }
                true
            }
        }
    }

    /// Deletes a saved snapshot. Deleting the one being viewed drops back
    /// to the live calculation; with no captured live state that becomes a
    /// full reset and the storage entry is removed.
    pub fn delete_saved(&mut self, label: &str) {
        let was_active = self
            .active
            .as_deref()
            .is_some_and(|active| labels_equal(active, label));
        self.snapshots.delete(label);

        if was_active {
            self.active = None;
            if self.live.is_some() {
                self.restore_live();
                self.persist();
            } else {
                self.reset();
                self.storage.remove();
            }
        } else {
            self.persist();
        }
    }

    /// Full reset: one blank row, default mode, cleared identifier,
    /// errors, notices, and selection tracking, and the durable entry
    /// erased. Hosts bind their global shortcut here.
    pub fn clear_all(&mut self) {
        self.reset();
        self.storage.remove();
    }

    // --- clipboard and notices ---

    /// Copies the combined expression. No-op when the expression is empty;
    /// clipboard failures are swallowed (the confirmation simply never
    /// appears). Returns whether a confirmation was posted.
    pub fn copy_expression(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        let expression = self.expression();
        if expression.is_empty() {
            return false;
        }
        match clipboard.write_text(&expression) {
            Ok(()) => {
                self.post_notice(NoticeKind::Copied, COPY_NOTICE_DURATION);
                true
            }
            Err(ClipboardError) => false,
        }
    }

    /// The confirmation visible at `now`, if any.
    pub fn notice_at(&self, now: Instant) -> Option<NoticeKind> {
        self.notice
            .as_ref()
            .filter(|notice| now < notice.expires_at)
            .map(|notice| notice.kind)
    }

    pub fn current_notice(&self) -> Option<NoticeKind> {
        self.notice_at(Instant::now())
    }

    // --- internals ---

    fn post_notice(&mut self, kind: NoticeKind, duration: Duration) {
        self.notice = Some(Notice {
            kind,
            expires_at: Instant::now() + duration,
        });
    }

    /// Restores the captured live state if one exists; otherwise leaves
    /// the working state as it is.
    fn restore_live(&mut self) {
        if let Some(live) = self.live.take() {
            self.rows = live.rows;
            self.mode = live.mode;
            self.identifier = live.identifier;
        }
    }

    fn reset(&mut self) {
        self.rows = RowStore::new();
        self.mode = CountingMode::default();
        self.identifier.clear();
        self.active = None;
        self.live = None;
        self.notice = None;
        self.save_error = None;
    }

    fn persist(&mut self) {
        if let Some(payload) = storage::encode(
            self.rows.rows(),
            self.mode,
            &self.identifier,
            self.snapshots.saved(),
        ) {
            self.storage.write(&payload);
        }
    }
}
