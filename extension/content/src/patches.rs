//! Applies a [`CompatPlan`] to the live document.
//!
//! Every patch checks for its marker (element id or [`HANDLED_ATTR`]) first,
//! so running it again after page mutations is harmless.

use omnipanel::compat::layout::{
    compat_css, HIDDEN_CLASS, RECENTS_BUTTON_ID, RECENTS_PATH, SIDEBAR_SELECTORS, STYLE_ID, VIEWPORT_CONTENT,
    VIEWPORT_META_ID,
};
use omnipanel::compat::voice::{
    mentions_voice_error, ALERT_SELECTOR, NOTICE_BANNER_ID, NOTICE_BANNER_MS, VOICE_CONTROL_TITLE, VOICE_ERROR_TEXT,
    VOICE_NOTICE_TEXT,
};
use omnipanel::compat::{CompatPlan, ControlTraits, DocumentQuery, HANDLED_ATTR};
use omnipanel_browser::js::stringify_js_error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, MutationObserver, MutationObserverInit, MutationRecord, Node};

use crate::banner;
use crate::inject::DomDocument;

const RECENTS_BUTTON_STYLE: &str = "position: fixed; bottom: 90px; left: 12px; width: 42px; height: 42px; \
    border-radius: 50%; border: 1px solid #3a3a3a; background: #1e1e1e; color: #e5e5e5; font-size: 20px; \
    cursor: pointer; z-index: 999999; box-shadow: 0 4px 12px rgba(0,0,0,0.4); display: flex; \
    align-items: center; justify-content: center; transition: all 0.2s ease; \
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;";

const REWRITTEN_ALERT_STYLE: &str =
    "background:#1e1e2e !important; color:#ffa500 !important; border-radius:8px !important; padding:12px !important;";

/// Applies `plan` once the document has a body.
pub fn apply(document: &Document, plan: CompatPlan) -> Result<(), JsValue> {
    if document.body().is_some() {
        return apply_now(document, plan);
    }
    let ready = Closure::once_into_js({
        let document = document.clone();
        move || {
            if let Err(err) = apply_now(&document, plan) {
                tracing::warn!(error = %stringify_js_error(err), "compat patches failed");
            }
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())
}

fn apply_now(document: &Document, plan: CompatPlan) -> Result<(), JsValue> {
    tracing::debug!(?plan, "applying compat patches");
    if plan.pin_viewport {
        pin_viewport(document)?;
    }
    if plan.inject_styles {
        inject_styles(document, plan)?;
    }
    if plan.recents_button {
        add_recents_button(document)?;
    }
    if plan.suppress_voice {
        intercept_voice_controls(document, plan);
        observe_mutations(document, plan)?;
    }
    Ok(())
}

fn head_or_root(document: &Document) -> Option<Element> {
    document
        .head()
        .map(Element::from)
        .or_else(|| document.document_element())
}

fn pin_viewport(document: &Document) -> Result<(), JsValue> {
    if let Some(meta) = document.query_selector("meta[name=\"viewport\"]")? {
        return meta.set_attribute("content", VIEWPORT_CONTENT);
    }
    let Some(parent) = head_or_root(document) else {
        return Ok(());
    };
    let meta = document.create_element("meta")?;
    meta.set_id(VIEWPORT_META_ID);
    meta.set_attribute("name", "viewport")?;
    meta.set_attribute("content", VIEWPORT_CONTENT)?;
    parent.append_child(&meta)?;
    Ok(())
}

fn inject_styles(document: &Document, plan: CompatPlan) -> Result<(), JsValue> {
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let Some(parent) = head_or_root(document) else {
        return Ok(());
    };
    let style = document.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(&compat_css(plan.provider)));
    parent.append_child(&style)?;
    Ok(())
}

fn toggle_sidebar_or_open_recents(document: &Document) {
    let doc = DomDocument(document);
    let sidebar = SIDEBAR_SELECTORS.iter().find_map(|selector| doc.query(selector));
    match sidebar {
        Some(sidebar) => {
            let _ = sidebar.class_list().toggle(HIDDEN_CLASS);
        }
        None => {
            if let Some(location) = document.location() {
                let _ = location.set_href(RECENTS_PATH);
            }
        }
    }
}

fn add_recents_button(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(RECENTS_BUTTON_ID).is_some() {
        return Ok(());
    }
    let Some(body) = document.body() else {
        return Ok(());
    };
    let button = document.create_element("button")?;
    button.set_id(RECENTS_BUTTON_ID);
    button.set_text_content(Some("☰"));
    button.set_attribute("title", "View recent chats")?;
    button.set_attribute("style", RECENTS_BUTTON_STYLE)?;

    let onclick = Closure::<dyn FnMut()>::new({
        let document = document.clone();
        move || toggle_sidebar_or_open_recents(&document)
    });
    button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
    onclick.forget();

    body.append_child(&button)?;
    Ok(())
}

fn control_traits(button: &Element) -> ControlTraits {
    let attr = |name: &str| button.get_attribute(name).unwrap_or_default();
    let mut svg_paths = Vec::new();
    if let Ok(paths) = button.query_selector_all("svg path") {
        for index in 0..paths.length() {
            if let Some(path) = paths.item(index).and_then(|node| node.dyn_into::<Element>().ok()) {
                svg_paths.push(path.get_attribute("d").unwrap_or_default());
            }
        }
    }
    ControlTraits {
        aria_label: attr("aria-label"),
        title: attr("title"),
        text: button.text_content().unwrap_or_default(),
        test_id: attr("data-testid"),
        svg_paths,
    }
}

/// Blocks the button's own click handlers and shows the notice banner instead.
fn intercept(document: &Document, button: &Element) -> Result<(), JsValue> {
    button.set_attribute(HANDLED_ATTR, "true")?;
    button.set_attribute("title", VOICE_CONTROL_TITLE)?;

    let onclick = Closure::<dyn FnMut(Event)>::new({
        let document = document.clone();
        move |event: Event| {
            event.prevent_default();
            event.stop_propagation();
            event.stop_immediate_propagation();
            if let Err(err) = banner::show(&document, NOTICE_BANNER_ID, VOICE_NOTICE_TEXT, NOTICE_BANNER_MS) {
                tracing::debug!(error = %stringify_js_error(err), "banner failed");
            }
        }
    });
    button.add_event_listener_with_callback_and_bool("click", onclick.as_ref().unchecked_ref(), true)?;
    onclick.forget();
    Ok(())
}

fn intercept_voice_controls(document: &Document, plan: CompatPlan) {
    let mut candidates = Vec::new();
    if let Ok(buttons) = document.query_selector_all(&format!("button:not([{HANDLED_ATTR}])")) {
        for index in 0..buttons.length() {
            if let Some(button) = buttons.item(index).and_then(|node| node.dyn_into::<Element>().ok()) {
                if control_traits(&button).is_voice_control() {
                    candidates.push(button);
                }
            }
        }
    }
    if let Some(control) = plan.probe().find_voice_control(&DomDocument(document)) {
        if !control.has_attribute(HANDLED_ATTR) {
            candidates.push(control);
        }
    }

    for button in candidates {
        if button.has_attribute(HANDLED_ATTR) {
            continue;
        }
        match intercept(document, &button) {
            Ok(()) => tracing::debug!("voice control intercepted"),
            Err(err) => tracing::warn!(error = %stringify_js_error(err), "failed to intercept voice control"),
        }
    }
}

/// Replaces the page's voice-mode failure message inside `node`.
fn rewrite_voice_error(node: &Element) {
    let text = node.text_content().unwrap_or_default();
    if !mentions_voice_error(&text) {
        return;
    }
    let target = node.query_selector(ALERT_SELECTOR).ok().flatten().unwrap_or_else(|| node.clone());
    if !target.text_content().unwrap_or_default().contains(VOICE_ERROR_TEXT) {
        return;
    }
    target.set_text_content(Some(VOICE_NOTICE_TEXT));
    let style = target.get_attribute("style").unwrap_or_default();
    let _ = target.set_attribute("style", &format!("{style}{REWRITTEN_ALERT_STYLE}"));
    tracing::debug!("voice error rewritten");
}

fn observe_mutations(document: &Document, plan: CompatPlan) -> Result<(), JsValue> {
    let Some(root) = document
        .body()
        .map(Node::from)
        .or_else(|| document.document_element().map(Node::from))
    else {
        return Ok(());
    };

    let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new({
        let document = document.clone();
        move |records: js_sys::Array, _observer: MutationObserver| {
            for record in records.iter() {
                let Ok(record) = record.dyn_into::<MutationRecord>() else {
                    continue;
                };
                let added = record.added_nodes();
                for index in 0..added.length() {
                    if let Some(element) = added.item(index).and_then(|node| node.dyn_into::<Element>().ok()) {
                        rewrite_voice_error(&element);
                    }
                }
            }
            intercept_voice_controls(&document, plan);
        }
    });
    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);
    observer.observe_with_options(&root, &options)?;
    callback.forget();
    Ok(())
}
