use super::*;
use crate::test_helpers::{
    FixedClock, RecordingBadge, RecordingTarget, Shown, local_wish, remote_wish, remote_wishes,
};
use crate::wish::WishId;

struct Fixture {
    main: RecordingTarget,
    sidebar: RecordingTarget,
    badge: RecordingBadge,
    feed: FeedController,
}

fn fixture() -> Fixture {
    let main = RecordingTarget::default();
    let sidebar = RecordingTarget::default();
    let badge = RecordingBadge::default();
    let feed = FeedController::new(main.boxed(), FixedClock::at(0), FeedSettings::default())
        .with_sidebar(sidebar.boxed())
        .with_badge(badge.boxed());
    Fixture { main, sidebar, badge, feed }
}

fn remote_id(id: &str) -> WishId {
    WishId::Remote(id.to_owned())
}

// =============================================================
// badge_label
// =============================================================

#[test]
fn badge_label_is_exact_up_to_overflow() {
    assert_eq!(badge_label(0, 99), "0");
    assert_eq!(badge_label(7, 99), "7");
    assert_eq!(badge_label(99, 99), "99");
}

#[test]
fn badge_label_caps_past_overflow() {
    assert_eq!(badge_label(100, 99), "99+");
    assert_eq!(badge_label(12_345, 99), "99+");
}

// =============================================================
// Full refresh
// =============================================================

#[test]
fn empty_refresh_shows_both_placeholders() {
    let mut f = fixture();
    f.feed.on_full_refresh(Vec::new());

    let main = f.main.placeholder().expect("main placeholder");
    assert!(main.contains("Hãy là người đầu tiên gửi lời chúc!"));
    let sidebar = f.sidebar.placeholder().expect("sidebar placeholder");
    assert!(sidebar.contains("Chưa có lời chúc nào."));
    assert_eq!(f.main.card_count(), 0);
    assert_eq!(f.badge.text(), "0");
}

#[test]
fn refresh_keeps_store_order() {
    let mut f = fixture();
    f.feed.on_full_refresh(vec![remote_wish("b", "B", 2), remote_wish("a", "A", 1)]);
    assert_eq!(f.main.card_ids(), vec![remote_id("b"), remote_id("a")]);
    assert_eq!(f.sidebar.card_ids(), vec![remote_id("b"), remote_id("a")]);
}

#[test]
fn main_feed_is_capped_and_sidebar_is_not() {
    let mut f = fixture();
    f.feed.on_full_refresh(remote_wishes(25));
    assert_eq!(f.main.card_count(), 10);
    assert_eq!(f.sidebar.card_count(), 25);
    assert_eq!(f.main.card_ids()[0], remote_id("w24"));
    assert_eq!(f.main.card_ids()[9], remote_id("w15"));
    assert_eq!(f.feed.wishes().len(), 25);
}

#[test]
fn refresh_replaces_instead_of_merging() {
    let mut f = fixture();
    f.feed.on_full_refresh(remote_wishes(3));
    f.feed.on_full_refresh(vec![remote_wish("x", "X", 9)]);
    assert_eq!(f.main.card_ids(), vec![remote_id("x")]);
    assert_eq!(f.sidebar.card_ids(), vec![remote_id("x")]);
    assert_eq!(f.feed.wishes().len(), 1);
    assert_eq!(f.main.clears(), 2);
}

#[test]
fn first_item_removes_placeholders_in_both_targets() {
    let mut f = fixture();
    f.feed.on_full_refresh(Vec::new());
    f.feed.on_full_refresh(vec![remote_wish("a", "A", 1)]);
    assert!(f.main.placeholder().is_none());
    assert!(f.sidebar.placeholder().is_none());
}

#[test]
fn refresh_updates_and_pulses_badge() {
    let mut f = fixture();
    f.feed.on_full_refresh(remote_wishes(150));
    assert_eq!(f.badge.text(), "99+");
    f.feed.on_full_refresh(remote_wishes(42));
    assert_eq!(f.badge.text(), "42");
    assert_eq!(f.badge.pulses(), 2);
}

#[test]
fn controller_without_sidebar_or_badge_still_renders() {
    let main = RecordingTarget::default();
    let mut feed = FeedController::new(main.boxed(), FixedClock::at(0), FeedSettings::default());
    feed.on_full_refresh(remote_wishes(2));
    assert_eq!(main.card_count(), 2);
}

// =============================================================
// Incremental insert
// =============================================================

#[test]
fn insert_prepends_single_card_with_entrance() {
    let mut f = fixture();
    f.feed.on_full_refresh(vec![local_wish(1, "Old")]);
    f.feed.on_incremental_insert(local_wish(2, "New"), true);

    assert_eq!(f.main.card_ids(), vec![WishId::Local(2), WishId::Local(1)]);
    assert!(matches!(&f.main.items()[0], Shown::Card { entrance: true, .. }));
    assert_eq!(f.feed.wishes()[0].id, WishId::Local(2));
}

#[test]
fn insert_leaves_sidebar_untouched() {
    let mut f = fixture();
    f.feed.on_full_refresh(vec![local_wish(1, "Old")]);
    f.feed.on_incremental_insert(local_wish(2, "New"), false);
    assert_eq!(f.sidebar.card_ids(), vec![WishId::Local(1)]);
}

#[test]
fn insert_removes_main_placeholder() {
    let mut f = fixture();
    f.feed.on_full_refresh(Vec::new());
    f.feed.on_incremental_insert(local_wish(1, "First"), true);
    assert!(f.main.placeholder().is_none());
    assert_eq!(f.main.card_count(), 1);
}

#[test]
fn insert_trims_main_feed_to_cap() {
    let mut f = fixture();
    let initial: Vec<_> = (1..=10).rev().map(|id| local_wish(id, "guest")).collect();
    f.feed.on_full_refresh(initial);
    f.feed.on_incremental_insert(local_wish(11, "late"), true);

    let ids = f.main.card_ids();
    assert_eq!(ids.len(), 10);
    assert_eq!(ids[0], WishId::Local(11));
    assert!(!ids.contains(&WishId::Local(1)));
    assert_eq!(f.feed.wishes().len(), 11);
}

#[test]
fn insert_updates_badge_without_pulse() {
    let mut f = fixture();
    f.feed.on_full_refresh(Vec::new());
    f.feed.on_incremental_insert(local_wish(1, "First"), true);
    assert_eq!(f.badge.text(), "1");
    assert_eq!(f.badge.pulses(), 1);
}

// =============================================================
// Event channel
// =============================================================

#[test]
fn drain_applies_queued_events_in_order() {
    let mut f = fixture();
    let (tx, mut rx) = feed_channel();
    tx.unbounded_send(FeedEvent::Replaced(vec![local_wish(1, "A")])).expect("send");
    tx.unbounded_send(FeedEvent::Inserted(local_wish(2, "B"))).expect("send");

    assert_eq!(f.feed.drain(&mut rx), 2);
    assert_eq!(f.main.card_ids(), vec![WishId::Local(2), WishId::Local(1)]);
    assert_eq!(f.feed.drain(&mut rx), 0);
}

#[tokio::test]
async fn run_consumes_until_senders_drop() {
    let main = RecordingTarget::default();
    let feed = FeedController::new(main.boxed(), FixedClock::at(0), FeedSettings::default());
    let (tx, rx) = feed_channel();
    tx.unbounded_send(FeedEvent::Replaced(remote_wishes(3))).expect("send");
    drop(tx);

    feed.run(rx).await;
    assert_eq!(main.card_count(), 3);
}
