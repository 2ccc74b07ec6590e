//! Feed controller: the in-memory wish collection and its two display targets.
//!
//! DESIGN
//! ======
//! The controller is the only writer of displayed state. Storage backends
//! never touch a target directly; they emit [`FeedEvent`]s on a channel and
//! the controller applies them in order. A `Replaced` event is an
//! authoritative snapshot and fully replaces the collection. An `Inserted`
//! event (local backend only) prepends one wish and renders just that card.
//!
//! The main feed is capped at `feed_limit` cards; the sidebar is not.

use std::rc::Rc;

use futures::StreamExt;
use futures::channel::mpsc;
use tracing::debug;

use crate::clock::Clock;
use crate::config::FeedSettings;
use crate::render::{Placeholder, WishCard, render_placeholder, render_wish};
use crate::wish::WishRecord;

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

// =============================================================================
// EVENTS
// =============================================================================

/// A change pushed from a storage backend to the feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedEvent {
    /// Full ordered snapshot, newest first.
    Replaced(Vec<WishRecord>),
    /// One freshly written wish to show at the top.
    Inserted(WishRecord),
}

pub type FeedSender = mpsc::UnboundedSender<FeedEvent>;
pub type FeedReceiver = mpsc::UnboundedReceiver<FeedEvent>;

/// Create the single-consumer channel between a backend and the feed.
#[must_use]
pub fn feed_channel() -> (FeedSender, FeedReceiver) {
    mpsc::unbounded()
}

// =============================================================================
// SURFACES
// =============================================================================

/// A container that shows wish cards, or a placeholder when there are none.
pub trait DisplayTarget {
    /// Remove every card and placeholder.
    fn clear(&mut self);

    /// Add a card after the existing ones.
    fn append_card(&mut self, card: &WishCard);

    /// Add a card before the existing ones, optionally with an entrance animation.
    fn prepend_card(&mut self, card: &WishCard, entrance: bool);

    /// Remove the bottom-most card, if any.
    fn remove_last_card(&mut self);

    /// Number of cards currently shown.
    fn card_count(&self) -> usize;

    /// Show placeholder markup.
    fn show_placeholder(&mut self, markup: &str);

    /// Remove the placeholder if one is shown.
    fn remove_placeholder(&mut self);
}

/// Numeric badge showing how many wishes exist.
pub trait CountBadge {
    fn set_text(&mut self, text: &str);

    /// Short scale emphasis after the count changes.
    fn pulse(&mut self);
}

/// Badge text for `count`: the exact number, or `"{overflow}+"` past the overflow.
#[must_use]
pub fn badge_label(count: usize, overflow: usize) -> String {
    if count > overflow { format!("{overflow}+") } else { count.to_string() }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Owns the displayed collection and keeps both targets in step with it.
pub struct FeedController {
    wishes: Vec<WishRecord>,
    main: Box<dyn DisplayTarget>,
    sidebar: Option<Box<dyn DisplayTarget>>,
    badge: Option<Box<dyn CountBadge>>,
    clock: Rc<dyn Clock>,
    settings: FeedSettings,
}

impl FeedController {
    #[must_use]
    pub fn new(main: Box<dyn DisplayTarget>, clock: Rc<dyn Clock>, settings: FeedSettings) -> Self {
        Self { wishes: Vec::new(), main, sidebar: None, badge: None, clock, settings }
    }

    #[must_use]
    pub fn with_sidebar(mut self, sidebar: Box<dyn DisplayTarget>) -> Self {
        self.sidebar = Some(sidebar);
        self
    }

    #[must_use]
    pub fn with_badge(mut self, badge: Box<dyn CountBadge>) -> Self {
        self.badge = Some(badge);
        self
    }

    /// The current collection, newest first.
    #[must_use]
    pub fn wishes(&self) -> &[WishRecord] {
        &self.wishes
    }

    pub fn apply(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Replaced(wishes) => self.on_full_refresh(wishes),
            FeedEvent::Inserted(wish) => self.on_incremental_insert(wish, true),
        }
    }

    /// Replace the collection and rebuild both targets from scratch.
    pub fn on_full_refresh(&mut self, wishes: Vec<WishRecord>) {
        debug!(count = wishes.len(), "wishes feed refreshed");
        self.wishes = wishes;

        let limit = self.settings.feed_limit;
        let cards: Vec<WishCard> = self.wishes.iter().map(|w| render_wish(w, self.clock.as_ref())).collect();

        fill(&mut *self.main, &cards[..cards.len().min(limit)], Placeholder::Feed, &self.settings.empty_feed);
        if let Some(sidebar) = self.sidebar.as_deref_mut() {
            fill(sidebar, &cards, Placeholder::Sidebar, &self.settings.empty_sidebar);
        }
        self.refresh_badge(true);
    }

    /// Put one new wish at the top of the main feed without re-rendering the rest.
    pub fn on_incremental_insert(&mut self, wish: WishRecord, entrance: bool) {
        debug!(id = %wish.id, "wish inserted into feed");
        let card = render_wish(&wish, self.clock.as_ref());
        self.wishes.insert(0, wish);

        self.main.remove_placeholder();
        self.main.prepend_card(&card, entrance);
        let excess = self.main.card_count().saturating_sub(self.settings.feed_limit);
        for _ in 0..excess {
            self.main.remove_last_card();
        }
        self.refresh_badge(false);
    }

    /// Apply events until every sender is dropped.
    pub async fn run(mut self, mut events: FeedReceiver) {
        while let Some(event) = events.next().await {
            self.apply(event);
        }
        debug!("wishes feed channel closed");
    }

    /// Apply every event already queued without waiting. Returns how many were applied.
    pub fn drain(&mut self, events: &mut FeedReceiver) -> usize {
        let mut applied = 0;
        while let Ok(event) = events.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    fn refresh_badge(&mut self, pulse: bool) {
        let label = badge_label(self.wishes.len(), self.settings.badge_overflow);
        if let Some(badge) = self.badge.as_deref_mut() {
            badge.set_text(&label);
            if pulse {
                badge.pulse();
            }
        }
    }
}

fn fill(target: &mut dyn DisplayTarget, cards: &[WishCard], placeholder: Placeholder, empty_text: &str) {
    target.clear();
    if cards.is_empty() {
        target.show_placeholder(&render_placeholder(placeholder, empty_text));
        return;
    }
    for card in cards {
        target.append_card(card);
    }
}
