//! Recording doubles for the page surfaces, shared by unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::clock::Clock;
use crate::feed::{CountBadge, DisplayTarget};
use crate::render::WishCard;
use crate::submit::{Notifier, WishForm};
use crate::wish::{CreatedAt, ServerTimestamp, WishId, WishRecord};

// =============================================================================
// CLOCK
// =============================================================================

/// Manually advanced clock with recognizable display strings.
pub struct FixedClock {
    millis: Cell<u64>,
}

impl FixedClock {
    pub fn at(millis: u64) -> Rc<Self> {
        Rc::new(Self { millis: Cell::new(millis) })
    }

    pub fn advance(&self, millis: u64) {
        self.millis.set(self.millis.get() + millis);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.millis.get()
    }

    fn now_display(&self) -> String {
        format!("now@{}", self.millis.get())
    }

    fn format(&self, ts: ServerTimestamp) -> String {
        format!("server@{}", ts.seconds)
    }
}

// =============================================================================
// RECORDS
// =============================================================================

pub fn remote_wish(id: &str, name: &str, seconds: i64) -> WishRecord {
    WishRecord {
        id: WishId::Remote(id.to_owned()),
        name: name.to_owned(),
        message: format!("message from {name}"),
        created_at: CreatedAt::Server(ServerTimestamp::new(seconds, 0)),
    }
}

pub fn local_wish(id: u64, name: &str) -> WishRecord {
    WishRecord {
        id: WishId::Local(id),
        name: name.to_owned(),
        message: format!("message from {name}"),
        created_at: CreatedAt::Local(format!("time-{id}")),
    }
}

/// `count` remote wishes, newest first, ids `w{n}`.
pub fn remote_wishes(count: usize) -> Vec<WishRecord> {
    (0..count)
        .rev()
        .map(|n| remote_wish(&format!("w{n}"), &format!("guest {n}"), i64::try_from(n).unwrap_or_default()))
        .collect()
}

// =============================================================================
// DISPLAY TARGET
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shown {
    Card { id: WishId, html: String, entrance: bool },
    Placeholder(String),
}

/// Display target that records what it shows. Clones share state.
#[derive(Clone, Default)]
pub struct RecordingTarget {
    shown: Rc<RefCell<Vec<Shown>>>,
    clears: Rc<Cell<usize>>,
}

impl RecordingTarget {
    pub fn boxed(&self) -> Box<dyn DisplayTarget> {
        Box::new(self.clone())
    }

    pub fn card_ids(&self) -> Vec<WishId> {
        self.shown
            .borrow()
            .iter()
            .filter_map(|item| match item {
                Shown::Card { id, .. } => Some(id.clone()),
                Shown::Placeholder(_) => None,
            })
            .collect()
    }

    pub fn placeholder(&self) -> Option<String> {
        self.shown.borrow().iter().find_map(|item| match item {
            Shown::Placeholder(markup) => Some(markup.clone()),
            Shown::Card { .. } => None,
        })
    }

    pub fn items(&self) -> Vec<Shown> {
        self.shown.borrow().clone()
    }

    pub fn clears(&self) -> usize {
        self.clears.get()
    }
}

impl DisplayTarget for RecordingTarget {
    fn clear(&mut self) {
        self.shown.borrow_mut().clear();
        self.clears.set(self.clears.get() + 1);
    }

    fn append_card(&mut self, card: &WishCard) {
        self.shown
            .borrow_mut()
            .push(Shown::Card { id: card.id.clone(), html: card.html.clone(), entrance: false });
    }

    fn prepend_card(&mut self, card: &WishCard, entrance: bool) {
        self.shown
            .borrow_mut()
            .insert(0, Shown::Card { id: card.id.clone(), html: card.html.clone(), entrance });
    }

    fn remove_last_card(&mut self) {
        let mut shown = self.shown.borrow_mut();
        if let Some(index) = shown.iter().rposition(|item| matches!(item, Shown::Card { .. })) {
            shown.remove(index);
        }
    }

    fn card_count(&self) -> usize {
        self.shown
            .borrow()
            .iter()
            .filter(|item| matches!(item, Shown::Card { .. }))
            .count()
    }

    fn show_placeholder(&mut self, markup: &str) {
        self.shown.borrow_mut().push(Shown::Placeholder(markup.to_owned()));
    }

    fn remove_placeholder(&mut self) {
        self.shown
            .borrow_mut()
            .retain(|item| !matches!(item, Shown::Placeholder(_)));
    }
}

// =============================================================================
// BADGE, FORM, NOTIFIER
// =============================================================================

#[derive(Clone, Default)]
pub struct RecordingBadge {
    text: Rc<RefCell<String>>,
    pulses: Rc<Cell<usize>>,
}

impl RecordingBadge {
    pub fn boxed(&self) -> Box<dyn CountBadge> {
        Box::new(self.clone())
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn pulses(&self) -> usize {
        self.pulses.get()
    }
}

impl CountBadge for RecordingBadge {
    fn set_text(&mut self, text: &str) {
        *self.text.borrow_mut() = text.to_owned();
    }

    fn pulse(&mut self) {
        self.pulses.set(self.pulses.get() + 1);
    }
}

#[derive(Default)]
pub struct RecordingForm {
    pub resets: Cell<usize>,
    pub pending: RefCell<Vec<bool>>,
}

impl RecordingForm {
    pub fn is_pending(&self) -> bool {
        self.pending.borrow().last().copied().unwrap_or(false)
    }
}

impl WishForm for RecordingForm {
    fn reset(&self) {
        self.resets.set(self.resets.get() + 1);
    }

    fn set_pending(&self, pending: bool) {
        self.pending.borrow_mut().push(pending);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub toasts: RefCell<Vec<String>>,
    pub alerts: RefCell<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn toast(&self, message: &str) {
        self.toasts.borrow_mut().push(message.to_owned());
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_owned());
    }
}
