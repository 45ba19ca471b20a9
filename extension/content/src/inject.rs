//! `INJECT_TEXT`: write text into the page's composer.

use omnipanel::compat::input::{INJECT_BANNER_ID, INPUT_NOT_FOUND};
use omnipanel::compat::probe::FALLBACK_INPUT_SELECTORS;
use omnipanel::compat::{DocumentQuery, EditableKind, PageProbe};
use omnipanel_browser::js::stringify_js_error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Event, EventInit, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::banner;

const BANNER_MS: u32 = 3000;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["navigator", "clipboard"], js_name = writeText, catch)]
    fn clipboard_write_text(text: &str) -> Result<js_sys::Promise, JsValue>;
}

pub struct DomDocument<'a>(pub &'a Document);

impl DocumentQuery for DomDocument<'_> {
    type Element = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.0.query_selector(selector).ok().flatten()
    }
}

fn editable(element: Element) -> Option<(Element, EditableKind)> {
    let kind = EditableKind::classify(&element.tag_name(), element.get_attribute("contenteditable").as_deref())?;
    Some((element, kind))
}

/// The focused editable element, else the page's composer.
fn find_target(document: &Document, probe: Option<PageProbe>) -> Option<(Element, EditableKind)> {
    if let Some(target) = document.active_element().and_then(editable) {
        return Some(target);
    }
    let doc = DomDocument(document);
    match probe {
        Some(probe) => probe.find_primary_input(&doc, editable),
        None => FALLBACK_INPUT_SELECTORS
            .iter()
            .find_map(|selector| doc.query(selector).and_then(editable)),
    }
}

fn write(element: &Element, kind: EditableKind, text: &str) -> Result<(), JsValue> {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        element.focus()?;
    }
    match kind {
        EditableKind::TextField => {
            if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
                area.set_value(text);
            } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                input.set_value(text);
            }
        }
        EditableKind::ContentEditable => {
            if let Some(element) = element.dyn_ref::<HtmlElement>() {
                element.set_inner_text(text);
            }
        }
    }

    let init = EventInit::new();
    init.set_bubbles(true);
    for name in kind.events() {
        element.dispatch_event(&Event::new_with_event_init_dict(name, &init)?)?;
    }
    Ok(())
}

/// Writes `text` into the composer, or copies it to the clipboard when the
/// page has none.
pub fn inject_text(document: &Document, probe: Option<PageProbe>, text: &str) {
    if let Some((element, kind)) = find_target(document, probe) {
        match write(&element, kind, text) {
            Ok(()) => tracing::debug!(?kind, chars = text.chars().count(), "text injected"),
            Err(err) => tracing::warn!(?kind, error = %stringify_js_error(err), "text injection failed"),
        }
        return;
    }

    tracing::warn!("no suitable input field found");
    match clipboard_write_text(text) {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                tracing::warn!(error = %stringify_js_error(err), "clipboard write failed");
            }
        }),
        Err(err) => tracing::warn!(error = %stringify_js_error(err), "clipboard unavailable"),
    }
    if let Err(err) = banner::show(document, INJECT_BANNER_ID, INPUT_NOT_FOUND, BANNER_MS) {
        tracing::debug!(error = %stringify_js_error(err), "banner failed");
    }
}
