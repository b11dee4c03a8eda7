//! Unit tests for the History Presenter: rows, text rendering and confirmation.

use chrono::{TimeZone, Utc};

use qr_history::managers::history_store::HistoryStore;
use qr_history::services::history_presenter::{
    present, Confirmation, HistoryView, CLEAR_PROMPT, EMPTY_HISTORY_MESSAGE,
};
use qr_history::storage::MemoryStorage;
use qr_history::types::history::HistoryEntry;

fn entry_at(link: &str, secs: i64) -> HistoryEntry {
    let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + chrono::Duration::seconds(secs);
    HistoryEntry::with_timestamp(link, "data:image/png;base64,AA==", ts)
}

fn store_with(entries: Vec<HistoryEntry>) -> HistoryStore {
    let mut store = HistoryStore::new(Box::new(MemoryStorage::new()));
    for entry in entries {
        store.push_entry(entry).unwrap();
    }
    store
}

#[test]
fn test_empty_store_renders_empty_message() {
    let view = present(&store_with(Vec::new()));
    assert!(view.is_empty());
    assert_eq!(view.render_text(), EMPTY_HISTORY_MESSAGE);
    assert_eq!(EMPTY_HISTORY_MESSAGE, "No entries in history");
}

#[test]
fn test_rows_are_numbered_newest_first() {
    let store = store_with(vec![
        entry_at("https://old.com", 0),
        entry_at("https://new.com", 20),
        entry_at("https://mid.com", 10),
    ]);
    let view = present(&store);

    let links: Vec<&str> = view.rows.iter().map(|r| r.link.as_str()).collect();
    assert_eq!(links, ["https://new.com", "https://mid.com", "https://old.com"]);
    let positions: Vec<usize> = view.rows.iter().map(|r| r.position).collect();
    assert_eq!(positions, [0, 1, 2]);
}

#[test]
fn test_domain_drops_www_prefix() {
    let view = HistoryView::from_entries(&[
        entry_at("https://www.example.com/page", 0),
        entry_at("https://docs.rs/qrcode", 0),
    ]);
    assert_eq!(view.rows[0].domain, "example.com");
    assert_eq!(view.rows[1].domain, "docs.rs");
}

#[test]
fn test_render_text_lists_each_row() {
    let store = store_with(vec![entry_at("https://a.com", 0), entry_at("https://www.b.com", 5)]);
    let text = present(&store).render_text();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("[0] "));
    assert!(lines[0].ends_with("  b.com  https://www.b.com"));
    assert!(lines[1].starts_with("[1] "));
    assert!(lines[1].ends_with("  a.com  https://a.com"));
}

#[test]
fn test_row_date_uses_local_time_format() {
    let view = HistoryView::from_entries(&[entry_at("https://a.com", 0)]);
    let date = &view.rows[0].date;
    // YYYY-MM-DD HH:MM:SS
    assert_eq!(date.len(), 19);
    assert_eq!(&date[4..5], "-");
    assert_eq!(&date[10..11], " ");
}

#[test]
fn test_closure_confirmation_receives_prompt() {
    let asked = std::cell::RefCell::new(String::new());
    let confirm = |prompt: &str| {
        *asked.borrow_mut() = prompt.to_string();
        true
    };
    assert!(confirm.confirm(CLEAR_PROMPT));
    assert_eq!(*asked.borrow(), CLEAR_PROMPT);
}
