//! Page bootstrap.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once when the module loads. Installs console logging, reads the
//! embedded config, wires the sidebar, then (asynchronously, because the
//! remote backend may have to wait for Firestore) builds the selected store,
//! starts the feature, drives the feed from its event channel, and attaches
//! the form's submit handler.
//!
//! ERROR HANDLING
//! ==============
//! Boot failures are logged to the console. The rest of the page keeps
//! working without the wishes feature.

use std::rc::Rc;

use tracing::{error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, Window};
use wishes::app::{Surfaces, WishesApp};
use wishes::clock::Clock;
use wishes::config::{BackendKind, WishesConfig};
use wishes::feed::{CountBadge, DisplayTarget};
use wishes::store::{LocalSnapshotStore, RemoteLiveStore, WishStore};
use wishes::submit::SubmissionHandler;

use crate::clock::JsClock;
use crate::config::{CONFIG_ELEMENT_ID, parse_page_config};
use crate::dom::{DomBadge, DomFeed, DomForm, element_by_id, html_element_by_id};
use crate::error::SiteError;
use crate::firestore::{FirestoreDocuments, wait_for_db};
use crate::js::js_err;
use crate::notify::DomNotifier;
use crate::{sidebar, storage};

pub(crate) fn run() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("console logging unavailable: {err}").into());
    }

    let Some(window) = web_sys::window() else {
        error!(error = %SiteError::NoWindow, "wishes feature not started");
        return;
    };
    let Some(document) = window.document() else {
        error!("wishes feature not started: no document");
        return;
    };

    let config = parse_page_config(
        document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
            .as_deref(),
    );
    sidebar::install(&document, &config.elements);

    spawn_local(async move {
        if let Err(err) = start(window, document, config).await {
            error!(error = %err, "wishes feature not started");
        }
    });
}

async fn start(window: Window, document: Document, config: WishesConfig) -> Result<(), SiteError> {
    let clock: Rc<dyn Clock> = Rc::new(JsClock::new(config.locale.clone()));
    let store: Rc<dyn WishStore> = match config.backend {
        BackendKind::Remote => {
            let db = wait_for_db(&window).await?;
            Rc::new(RemoteLiveStore::from_config(&config, Rc::new(FirestoreDocuments::new(db))))
        }
        BackendKind::Local => Rc::new(LocalSnapshotStore::from_config(
            &config,
            storage::browser_kv(&window),
            Rc::clone(&clock),
        )),
    };
    info!(backend = ?config.backend, "wishes backend selected");

    let ids = &config.elements;
    let form = Rc::new(DomForm::from_ids(&document, ids, config.texts.clone())?);
    let surfaces = Surfaces {
        main: Box::new(DomFeed::new(element_by_id(&document, &ids.main_feed)?)),
        sidebar: optional(element_by_id(&document, &ids.sidebar_feed).map(|el| {
            Box::new(DomFeed::new(el)) as Box<dyn DisplayTarget>
        })),
        badge: optional(html_element_by_id(&document, &ids.badge).map(|el| {
            Box::new(DomBadge::new(el, config.badge_pulse_ms)) as Box<dyn CountBadge>
        })),
        form: form.clone(),
        notifier: Rc::new(DomNotifier::new(window, document, config.toast_ms)),
    };

    let WishesApp { feed, events, submissions } = WishesApp::start(&config, store, clock, surfaces);
    spawn_local(feed.run(events));
    attach_submit(&form, submissions)
}

/// Present the element if found; log and skip it otherwise.
fn optional<T>(found: Result<T, SiteError>) -> Option<T> {
    match found {
        Ok(found) => Some(found),
        Err(err) => {
            info!(error = %err, "optional wishes surface absent");
            None
        }
    }
}

fn attach_submit(form: &Rc<DomForm>, submissions: Rc<SubmissionHandler>) -> Result<(), SiteError> {
    let fields = Rc::clone(form);
    let on_submit = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        let (name, message) = fields.values();
        let submissions = Rc::clone(&submissions);
        spawn_local(async move {
            submissions.on_submit(&name, &message).await;
        });
    }) as Box<dyn FnMut(Event)>);

    form.element()
        .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        .map_err(js_err)?;
    on_submit.forget();
    Ok(())
}
