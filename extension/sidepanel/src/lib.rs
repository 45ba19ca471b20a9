//! Side panel and permission page entry points.

mod controls;
mod frames;
mod notices;
mod permission;

use std::rc::Rc;

use futures::lock::Mutex;
use omnipanel::panel::{IframePool, PersistentPool, SingleSlotPool};
use omnipanel::protocol::CONFIG_KEY;
use omnipanel::{KeyValueStorage, LogLevel, PanelConfig, PanelController, PoolKind, SessionStore};
use omnipanel_browser::{js, logging, runtime, ChromeStorage};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Window};

use crate::frames::DomFrameHost;
use crate::notices::ToastNotices;

type Panel = PanelController<ChromeStorage, Box<dyn IframePool>, ToastNotices>;

/// The controller, serialized across UI events and runtime messages.
pub(crate) type SharedPanel = Rc<Mutex<Panel>>;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub async fn start_sidepanel() {
    if let Err(err) = init().await {
        tracing::error!(error = %js::stringify_js_error(err), "side panel init failed");
    }
}

#[wasm_bindgen]
pub fn start_permission_page() {
    logging::init_logging(LogLevel::Info);
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = permission::bind_request_page(window) {
        tracing::error!(error = %js::stringify_js_error(err), "permission page init failed");
    }
}

async fn load_config(storage: &ChromeStorage) -> PanelConfig {
    match storage.get(&[CONFIG_KEY]).await {
        Ok(items) => PanelConfig::from_stored(items.get(CONFIG_KEY)),
        Err(err) => {
            web_sys::console::warn_1(&JsValue::from_str(&format!("OmniPanel: config unreadable: {err}")));
            PanelConfig::default()
        }
    }
}

fn build_pool(kind: PoolKind, document: &Document) -> Result<Box<dyn IframePool>, JsValue> {
    let container = document
        .query_selector("main")?
        .ok_or_else(|| JsValue::from_str("missing <main> frame container"))?;
    let host = DomFrameHost::new(document.clone(), container, document.get_element_by_id("toast"));
    Ok(match kind {
        PoolKind::Persistent => Box::new(PersistentPool::new(host)),
        PoolKind::SingleSlot => Box::new(SingleSlotPool::new(host)),
    })
}

async fn init() -> Result<(), JsValue> {
    let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let storage = ChromeStorage;
    let config = load_config(&storage).await;
    logging::init_logging(config.log_level);
    tracing::debug!(?config, "panel config");

    let pool = build_pool(config.pool, &document)?;
    let notices = ToastNotices::new(
        window.clone(),
        document.get_element_by_id("toast"),
        document.get_element_by_id("mic-status"),
    );
    let controller = PanelController::start(SessionStore::new(storage), pool, notices, config)
        .await
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let active = controller.active();
    let panel: SharedPanel = Rc::new(Mutex::new(controller));

    controls::bind(&document, &panel, active)?;

    runtime::on_message({
        let panel = panel.clone();
        move |message| {
            let panel = panel.clone();
            spawn_local(async move {
                panel.lock().await.handle_message(&message).await;
            });
        }
    });

    spawn_local(async move {
        if let Err(err) = permission::watch_microphone(&window, panel).await {
            tracing::debug!(error = %js::stringify_js_error(err), "microphone permission unavailable");
        }
    });

    Ok(())
}
