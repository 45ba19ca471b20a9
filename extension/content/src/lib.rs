//! Content script for hosted provider pages.
//!
//! Reports navigation to the panel, patches the page for the embedded
//! context, and accepts `INJECT_TEXT`.

mod banner;
mod inject;
mod navigation;
mod patches;

use omnipanel::compat::CompatPlan;
use omnipanel::protocol::Message;
use omnipanel::LogLevel;
use omnipanel_browser::{js, logging, runtime};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init_logging(LogLevel::Info);

    if let Err(err) = init() {
        tracing::error!(error = %js::stringify_js_error(err), "content script init failed");
    }
}

fn init() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    navigation::watch(&window)?;

    let plan = CompatPlan::for_hostname(&window.location().hostname()?);
    match plan {
        Some(plan) => {
            if let Err(err) = patches::apply(&document, plan) {
                tracing::warn!(error = %js::stringify_js_error(err), "compat patches failed");
            }
        }
        None => tracing::debug!("no compat patches for this site"),
    }

    let probe = plan.map(|plan| plan.probe());
    runtime::on_message(move |message| {
        if let Message::InjectText { text } = message {
            inject::inject_text(&document, probe, &text);
        }
    });

    Ok(())
}
