//! Microphone permission: live status in the panel and the request page.

use omnipanel::panel::MicPermission;
use omnipanel_browser::js;
use serde_json::json;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Element, MediaStream, MediaStreamConstraints, MediaStreamTrack, PermissionState, PermissionStatus, Window,
};

use crate::SharedPanel;

const GRANTED_TEXT: &str = "Permission Granted! You can close this tab and reload the side panel.";
const DENIED_TEXT: &str = "Permission Denied. Please try again and click 'Allow'.";
const CLOSE_DELAY_MS: i32 = 2000;

fn mic_permission(state: PermissionState) -> MicPermission {
    match state {
        PermissionState::Granted => MicPermission::Granted,
        PermissionState::Denied => MicPermission::Denied,
        _ => MicPermission::Prompt,
    }
}

/// Reports the current microphone permission to the panel and follows changes.
pub async fn watch_microphone(window: &Window, panel: SharedPanel) -> Result<(), JsValue> {
    let descriptor: js_sys::Object = js::to_js(&json!({ "name": "microphone" }))?.dyn_into()?;
    let query = window.navigator().permissions()?.query(&descriptor)?;
    let status: PermissionStatus = JsFuture::from(query).await?.dyn_into()?;

    panel.lock().await.on_permission_change(mic_permission(status.state()));

    let onchange = Closure::<dyn FnMut()>::new({
        let status = status.clone();
        move || {
            let panel = panel.clone();
            let permission = mic_permission(status.state());
            spawn_local(async move {
                panel.lock().await.on_permission_change(permission);
            });
        }
    });
    status.set_onchange(Some(onchange.as_ref().unchecked_ref()));
    onchange.forget();
    Ok(())
}

/// Prompts for microphone access and immediately releases the stream.
async fn request_microphone(window: &Window) -> Result<(), JsValue> {
    let constraints = MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    let request = window
        .navigator()
        .media_devices()?
        .get_user_media_with_constraints(&constraints)?;
    let stream: MediaStream = JsFuture::from(request).await?.dyn_into()?;
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
    Ok(())
}

fn show_outcome(status: Option<&Element>, text: &str, color: &str) {
    let Some(status) = status else {
        return;
    };
    status.set_text_content(Some(text));
    if let Some(status) = status.dyn_ref::<web_sys::HtmlElement>() {
        let _ = status.style().set_property("color", color);
    }
}

/// Wires the request button of the permission page.
pub fn bind_request_page(window: Window) -> Result<(), JsValue> {
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let button = document
        .get_element_by_id("request-btn")
        .ok_or_else(|| JsValue::from_str("missing #request-btn"))?;
    let status = document.get_element_by_id("status");

    let onclick = Closure::<dyn FnMut()>::new(move || {
        let window = window.clone();
        let status = status.clone();
        spawn_local(async move {
            match request_microphone(&window).await {
                Ok(()) => {
                    tracing::info!("microphone permission granted");
                    show_outcome(status.as_ref(), GRANTED_TEXT, "#4caf50");
                    let close = Closure::once_into_js({
                        let window = window.clone();
                        move || {
                            let _ = window.close();
                        }
                    });
                    let _ = window
                        .set_timeout_with_callback_and_timeout_and_arguments_0(close.unchecked_ref(), CLOSE_DELAY_MS);
                }
                Err(err) => {
                    tracing::warn!(error = %js::stringify_js_error(err), "microphone permission denied");
                    show_outcome(status.as_ref(), DENIED_TEXT, "#f44336");
                }
            }
        });
    });
    button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
    onclick.forget();
    Ok(())
}
