//! History Presenter: read-only view of the history for display surfaces.
//!
//! Builds rows from a `list()` snapshot. Mutations stay with the caller, which
//! routes them through `App` so every outcome is reported by the notifier.

use chrono::Local;
use serde::Serialize;

use crate::managers::history_store::HistoryStoreTrait;
use crate::services::url_validator::display_domain;
use crate::types::history::HistoryEntry;

/// Shown in place of the list when there is nothing to display.
pub const EMPTY_HISTORY_MESSAGE: &str = "No entries in history";

/// Question asked before the whole history is cleared.
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear the entire history?";

/// Asks the user to confirm a destructive action.
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirmation for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// One displayed history item.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryRow {
    /// Display position, as accepted by `remove_at` and history downloads.
    pub position: usize,
    pub domain: String,
    /// Creation time in the local timezone.
    pub date: String,
    pub link: String,
    pub image_data: String,
}

/// Snapshot of the history in display order.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct HistoryView {
    pub rows: Vec<HistoryRow>,
}

impl HistoryView {
    /// `entries` must already be in display order.
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        let rows = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| HistoryRow {
                position,
                domain: display_domain(&entry.link),
                date: entry
                    .created_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
                link: entry.link.clone(),
                image_data: entry.image_data.clone(),
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Plain-text listing, one line per row, or the empty message.
    pub fn render_text(&self) -> String {
        if self.rows.is_empty() {
            return EMPTY_HISTORY_MESSAGE.to_string();
        }
        self.rows
            .iter()
            .map(|row| format!("[{}] {}  {}  {}", row.position, row.date, row.domain, row.link))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Builds a view of `store` without touching it.
pub fn present(store: &dyn HistoryStoreTrait) -> HistoryView {
    HistoryView::from_entries(&store.list())
}
