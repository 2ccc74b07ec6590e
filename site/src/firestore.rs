//! Firestore as the remote document store.
//!
//! DESIGN
//! ======
//! The page loads the Firebase compat SDK itself and publishes the Firestore
//! handle as `window.firebaseDB`, dispatching `firebaseReady` on `window`
//! once it is set. Only the handful of calls the feed needs are bound:
//! `collection().add()`, `orderBy().onSnapshot()`, and
//! `FieldValue.serverTimestamp()`.
//!
//! Snapshot documents are read field by field through `Reflect`. A document
//! whose `createdAt` is still `null` (the local echo of a pending write) maps
//! to a pending timestamp.
//!
//! ERROR HANDLING
//! ==============
//! Rejected `add()` promises become `WishError::Write` carrying the JS error
//! message. `onSnapshot` error callbacks become `WishError::Read` and are
//! delivered to the listener once; Firestore ends the listener after that.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use tracing::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;
use wishes::error::WishError;
use wishes::store::{DocumentStore, SnapshotListener};
use wishes::store::remote::ORDER_FIELD;
use wishes::wish::{NewWish, ServerTimestamp, StoredWish, WishDocument};

use crate::error::SiteError;
use crate::js::{js_err, js_message};

/// Window property holding the Firestore handle.
const DB_PROPERTY: &str = "firebaseDB";

/// Window event fired once the handle is set.
const READY_EVENT: &str = "firebaseReady";

// =============================================================================
// BINDINGS
// =============================================================================

#[wasm_bindgen]
extern "C" {
    /// `firebase.firestore.Firestore`
    pub type Firestore;

    #[wasm_bindgen(method)]
    fn collection(this: &Firestore, path: &str) -> CollectionReference;

    /// `firebase.firestore.CollectionReference`
    pub type CollectionReference;

    #[wasm_bindgen(method, catch)]
    fn add(this: &CollectionReference, data: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, js_name = "orderBy")]
    fn order_by(this: &CollectionReference, field: &str, direction: &str) -> Query;

    /// `firebase.firestore.Query`
    pub type Query;

    #[wasm_bindgen(method, catch, js_name = "onSnapshot")]
    fn on_snapshot(
        this: &Query,
        next: &Closure<dyn FnMut(QuerySnapshot)>,
        error: &Closure<dyn FnMut(JsValue)>,
    ) -> Result<js_sys::Function, JsValue>;

    /// `firebase.firestore.QuerySnapshot`
    pub type QuerySnapshot;

    #[wasm_bindgen(method, getter)]
    fn docs(this: &QuerySnapshot) -> js_sys::Array;

    /// `firebase.firestore.QueryDocumentSnapshot`
    pub type DocumentSnapshot;

    #[wasm_bindgen(method, getter)]
    fn id(this: &DocumentSnapshot) -> String;

    #[wasm_bindgen(method)]
    fn data(this: &DocumentSnapshot) -> JsValue;

    #[wasm_bindgen(js_namespace = ["firebase", "firestore", "FieldValue"], js_name = "serverTimestamp")]
    fn server_timestamp() -> JsValue;
}

// =============================================================================
// READINESS
// =============================================================================

fn published_db(window: &Window) -> Option<Firestore> {
    match js_sys::Reflect::get(window, &JsValue::from_str(DB_PROPERTY)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => Some(value.unchecked_into()),
        Ok(_) => None,
        Err(err) => {
            warn!(error = %js_message(&err), "could not read window.firebaseDB");
            None
        }
    }
}

/// The Firestore handle, waiting for `firebaseReady` if the page has not
/// published it yet.
pub(crate) async fn wait_for_db(window: &Window) -> Result<Firestore, SiteError> {
    if let Some(db) = published_db(window) {
        info!("firestore already ready");
        return Ok(db);
    }

    info!("waiting for firestore");
    let (ready_tx, ready_rx) = oneshot::channel::<()>();
    let on_ready: Closure<dyn FnMut()> = Closure::once(move || {
        if ready_tx.send(()).is_err() {
            debug!("firestore readiness observed after boot gave up");
        }
    });
    window
        .add_event_listener_with_callback(READY_EVENT, on_ready.as_ref().unchecked_ref())
        .map_err(js_err)?;
    on_ready.forget();

    ready_rx
        .await
        .map_err(|_| SiteError::Js("firebaseReady listener dropped".to_owned()))?;
    published_db(window).ok_or_else(|| SiteError::Js("firebaseReady fired without window.firebaseDB".to_owned()))
}

// =============================================================================
// DOCUMENT STORE
// =============================================================================

/// [`DocumentStore`] over the page's Firestore handle.
pub(crate) struct FirestoreDocuments {
    db: Firestore,
}

impl FirestoreDocuments {
    pub(crate) fn new(db: Firestore) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait(?Send)]
impl DocumentStore for FirestoreDocuments {
    async fn insert(&self, collection: &str, wish: &NewWish) -> Result<String, WishError> {
        let data = js_sys::Object::new();
        set_field(&data, "name", &JsValue::from_str(wish.name()))?;
        set_field(&data, "message", &JsValue::from_str(wish.message()))?;
        set_field(&data, ORDER_FIELD, &server_timestamp())?;

        let promise = self
            .db
            .collection(collection)
            .add(&data)
            .map_err(|err| WishError::write(js_message(&err)))?;
        let reference = JsFuture::from(promise)
            .await
            .map_err(|err| WishError::write(js_message(&err)))?;
        Ok(string_field(&reference, "id"))
    }

    fn subscribe_ordered(&self, collection: &str, listener: SnapshotListener) -> Result<(), WishError> {
        let listener = Rc::new(RefCell::new(listener));

        let on_next = {
            let listener = Rc::clone(&listener);
            Closure::wrap(Box::new(move |snapshot: QuerySnapshot| {
                deliver(&listener, Ok(parse_snapshot(&snapshot)));
            }) as Box<dyn FnMut(QuerySnapshot)>)
        };
        let on_error = Closure::wrap(Box::new(move |err: JsValue| {
            deliver(&listener, Err(WishError::read(js_message(&err))));
        }) as Box<dyn FnMut(JsValue)>);

        self.db
            .collection(collection)
            .order_by(ORDER_FIELD, "desc")
            .on_snapshot(&on_next, &on_error)
            .map_err(|err| WishError::read(js_message(&err)))?;
        on_next.forget();
        on_error.forget();
        Ok(())
    }
}

fn deliver(listener: &RefCell<SnapshotListener>, snapshot: Result<Vec<StoredWish>, WishError>) {
    match listener.try_borrow_mut() {
        Ok(mut listener) => listener(snapshot),
        Err(_) => warn!("snapshot arrived while the previous one was still being applied; dropped"),
    }
}

// =============================================================================
// DECODING
// =============================================================================

fn set_field(target: &js_sys::Object, name: &str, value: &JsValue) -> Result<(), WishError> {
    js_sys::Reflect::set(target, &JsValue::from_str(name), value)
        .map(drop)
        .map_err(|err| WishError::write(js_message(&err)))
}

fn field(source: &JsValue, name: &str) -> JsValue {
    js_sys::Reflect::get(source, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED)
}

fn string_field(source: &JsValue, name: &str) -> String {
    field(source, name).as_string().unwrap_or_default()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn timestamp_field(source: &JsValue, name: &str) -> Option<ServerTimestamp> {
    let value = field(source, name);
    if value.is_null() || value.is_undefined() {
        return None;
    }
    let seconds = field(&value, "seconds").as_f64()?;
    let nanoseconds = field(&value, "nanoseconds").as_f64().unwrap_or(0.0);
    Some(ServerTimestamp::new(seconds as i64, nanoseconds as u32))
}

fn parse_snapshot(snapshot: &QuerySnapshot) -> Vec<StoredWish> {
    snapshot
        .docs()
        .iter()
        .map(|doc| {
            let doc: DocumentSnapshot = doc.unchecked_into();
            let data = doc.data();
            StoredWish {
                id: doc.id(),
                document: WishDocument {
                    name: string_field(&data, "name"),
                    message: string_field(&data, "message"),
                    created_at: timestamp_field(&data, ORDER_FIELD),
                },
            }
        })
        .collect()
}
