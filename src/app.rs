//! Startup context.
//!
//! DESIGN
//! ======
//! Everything the page needs is built once here and handed out explicitly:
//! the feed controller with its event receiver, and a shared submission
//! handler. The store talks to the feed only through the channel created
//! here, so either backend can sit behind the same wiring.

use std::rc::Rc;

use tracing::{error, info};

use crate::clock::Clock;
use crate::config::WishesConfig;
use crate::feed::{CountBadge, DisplayTarget, FeedController, FeedReceiver, feed_channel};
use crate::store::WishStore;
use crate::submit::{Notifier, SubmissionHandler, WishForm};

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

/// Page surfaces the feature draws on.
pub struct Surfaces {
    pub main: Box<dyn DisplayTarget>,
    pub sidebar: Option<Box<dyn DisplayTarget>>,
    pub badge: Option<Box<dyn CountBadge>>,
    pub form: Rc<dyn WishForm>,
    pub notifier: Rc<dyn Notifier>,
}

/// A started wishes feature.
pub struct WishesApp {
    pub feed: FeedController,
    /// Feed events from the store. Drive with [`FeedController::run`].
    pub events: FeedReceiver,
    pub submissions: Rc<SubmissionHandler>,
}

impl WishesApp {
    /// Wire surfaces to `store` and start the store's event flow.
    ///
    /// A store that cannot start is logged and left without a feed; the
    /// submission handler is still built so the form keeps writing.
    pub fn start(
        config: &WishesConfig,
        store: Rc<dyn WishStore>,
        clock: Rc<dyn Clock>,
        surfaces: Surfaces,
    ) -> Self {
        let (sender, events) = feed_channel();

        let mut feed = FeedController::new(surfaces.main, clock, config.feed_settings());
        if let Some(sidebar) = surfaces.sidebar {
            feed = feed.with_sidebar(sidebar);
        }
        if let Some(badge) = surfaces.badge {
            feed = feed.with_badge(badge);
        }

        match store.start(sender) {
            Ok(()) => info!(backend = ?store.kind(), "wishes feature started"),
            Err(err) => error!(backend = ?store.kind(), error = %err, "wishes feed not started; updates disabled"),
        }

        let submissions = Rc::new(SubmissionHandler::new(
            store,
            surfaces.form,
            surfaces.notifier,
            config.texts.clone(),
        ));
        Self { feed, events, submissions }
    }
}
