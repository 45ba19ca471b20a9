//! Provider buttons, zoom buttons, and zoom shortcuts.

use std::rc::Rc;

use omnipanel::Provider;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, KeyboardEvent};

use crate::SharedPanel;

#[derive(Debug, Clone, Copy)]
enum ZoomAction {
    In,
    Out,
    Reset,
}

impl ZoomAction {
    /// `Ctrl`/`Cmd` with `+`/`=`, `-`, or `0`.
    fn from_key(event: &KeyboardEvent) -> Option<Self> {
        if !(event.ctrl_key() || event.meta_key()) {
            return None;
        }
        match event.key().as_str() {
            "=" | "+" => Some(Self::In),
            "-" => Some(Self::Out),
            "0" => Some(Self::Reset),
            _ => None,
        }
    }

    fn run(self, panel: &SharedPanel) {
        let panel = panel.clone();
        spawn_local(async move {
            let mut panel = panel.lock().await;
            let zoom = match self {
                Self::In => panel.zoom_in().await,
                Self::Out => panel.zoom_out().await,
                Self::Reset => panel.reset_zoom().await,
            };
            tracing::debug!(action = ?self, %zoom, "zoom changed");
        });
    }
}

/// Marks the button of `active` and clears the others.
pub fn highlight(buttons: &[(Provider, Element)], active: Provider) {
    for (provider, button) in buttons {
        let _ = button.class_list().toggle_with_force("active", *provider == active);
    }
}

fn provider_buttons(document: &Document) -> Result<Vec<(Provider, Element)>, JsValue> {
    let nodes = document.query_selector_all("#ai-nav .ai-btn")?;
    let mut buttons = Vec::with_capacity(nodes.length() as usize);
    for index in 0..nodes.length() {
        let Some(button) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let name = button.get_attribute("data-provider").unwrap_or_default();
        match Provider::from_name(&name) {
            Some(provider) => buttons.push((provider, button)),
            None => tracing::warn!(name = %name, "button for unknown provider"),
        }
    }
    Ok(buttons)
}

fn on_click(target: &Element, handler: impl FnMut() + 'static) -> Result<(), JsValue> {
    let handler = Closure::<dyn FnMut()>::new(handler);
    target.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

/// Wires every panel control to `panel`.
pub fn bind(document: &Document, panel: &SharedPanel, active: Provider) -> Result<(), JsValue> {
    let buttons = Rc::new(provider_buttons(document)?);
    highlight(&buttons, active);

    for (provider, button) in buttons.iter() {
        let provider = *provider;
        let panel = panel.clone();
        let buttons = Rc::clone(&buttons);
        on_click(button, move || {
            let panel = panel.clone();
            let buttons = Rc::clone(&buttons);
            spawn_local(async move {
                let mut panel = panel.lock().await;
                if let Err(err) = panel.switch_to(provider).await {
                    tracing::warn!(%provider, error = %err, "provider switch failed");
                }
                highlight(&buttons, panel.active());
            });
        })?;
    }

    for (id, action) in [("zoom-in", ZoomAction::In), ("zoom-out", ZoomAction::Out)] {
        let Some(button) = document.get_element_by_id(id) else {
            tracing::debug!(id, "zoom button missing");
            continue;
        };
        let panel = panel.clone();
        on_click(&button, move || action.run(&panel))?;
    }

    let keydown = Closure::<dyn FnMut(KeyboardEvent)>::new({
        let panel = panel.clone();
        move |event: KeyboardEvent| {
            if let Some(action) = ZoomAction::from_key(&event) {
                event.prevent_default();
                action.run(&panel);
            }
        }
    });
    document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
    keydown.forget();

    Ok(())
}
