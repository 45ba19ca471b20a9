use omnipanel::protocol::Message;
use omnipanel::LogLevel;
use omnipanel_browser::{chrome, js, logging, runtime};
use serde_json::json;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen(start)]
pub async fn start() {
    console_error_panic_hook::set_once();
    logging::init_logging(LogLevel::Info);

    // Must precede the first await.
    register_listeners();

    if let Err(err) = open_panel_on_action_click().await {
        tracing::error!(error = %js::stringify_js_error(err), "setPanelBehavior failed");
    }
}

fn register_listeners() {
    let on_installed = Closure::<dyn FnMut(JsValue)>::new(|_details: JsValue| {
        tracing::info!("OmniPanel extension installed");
    });
    chrome::runtime_on_installed_add_listener(&on_installed);
    on_installed.forget();

    runtime::on_message(|message| {
        if let Message::InjectText { .. } = message {
            wasm_bindgen_futures::spawn_local(relay_to_tabs(message));
        }
    });
}

/// Toolbar click opens the side panel.
async fn open_panel_on_action_click() -> Result<(), JsValue> {
    let behavior = js::to_js(&json!({ "openPanelOnActionClick": true }))?;
    JsFuture::from(chrome::side_panel_set_panel_behavior(&behavior)).await?;
    Ok(())
}

/// Broadcasts to every tab; tabs without the content script drop it.
async fn relay_to_tabs(message: Message) {
    let tab_ids = match runtime::all_tab_ids().await {
        Ok(ids) => ids,
        Err(err) => {
            tracing::warn!(error = %err, "tab query failed");
            return;
        }
    };
    tracing::debug!(action = message.action(), tabs = tab_ids.len(), "relaying message");
    for tab_id in tab_ids {
        runtime::send_to_tab(tab_id, &message);
    }
}
