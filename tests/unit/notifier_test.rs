//! Unit tests for transient notifications.

use std::time::{Duration, Instant};

use qr_history::services::notifier::{Notifier, DEFAULT_DISPLAY_DURATION};
use qr_history::types::notification::NotificationKind;

#[test]
fn test_default_duration_is_three_seconds() {
    assert_eq!(Notifier::default().display_duration(), Duration::from_secs(3));
    assert_eq!(DEFAULT_DISPLAY_DURATION, Duration::from_secs(3));
}

#[test]
fn test_notifications_expire_after_display_duration() {
    let mut notifier = Notifier::default();
    notifier.success("QR generated successfully!");
    let start = Instant::now();

    assert_eq!(notifier.active_at(start).len(), 1);
    assert_eq!(notifier.active_at(start + Duration::from_secs(4)).len(), 0);
    // Expired entries are gone for good
    assert_eq!(notifier.active_at(start).len(), 0);
}

#[test]
fn test_set_display_duration_extends_queued_notifications() {
    let mut notifier = Notifier::default();
    notifier.success("kept");
    let start = Instant::now();

    notifier.set_display_duration(Duration::from_secs(60));
    assert_eq!(notifier.display_duration(), Duration::from_secs(60));
    assert_eq!(notifier.active_at(start + Duration::from_secs(30)).len(), 1);
}

#[test]
fn test_kinds_and_order() {
    let mut notifier = Notifier::new(Duration::from_secs(60));
    notifier.success("first");
    notifier.error("second");

    let active = notifier.active();
    assert_eq!(active.len(), 2);
    assert_eq!(active[0].kind, NotificationKind::Success);
    assert_eq!(active[1].kind, NotificationKind::Error);
    assert_eq!(active[1].message, "second");
    assert_eq!(notifier.latest().unwrap().message, "second");
}

#[test]
fn test_dismiss() {
    let mut notifier = Notifier::new(Duration::from_secs(60));
    let id = notifier.error("oops");

    assert!(notifier.dismiss(id));
    assert!(!notifier.dismiss(id));
    assert!(notifier.active().is_empty());
}
