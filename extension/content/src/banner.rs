use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

const BANNER_STYLE: &str = "position: fixed; top: 16px; left: 50%; transform: translateX(-50%); \
    background: #1e1e1e; color: #ffa500; padding: 12px 20px; border-radius: 8px; font-size: 13px; \
    z-index: 999999; box-shadow: 0 4px 20px rgba(0,0,0,0.4); border: 1px solid #333; \
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; cursor: pointer; \
    text-align: center; max-width: 90%;";

/// Shows a dismissible banner at the top of the page for `duration_ms`,
/// replacing any banner with the same `id`.
pub fn show(document: &Document, id: &str, text: &str, duration_ms: u32) -> Result<(), JsValue> {
    if let Some(existing) = document.get_element_by_id(id) {
        existing.remove();
    }
    let Some(body) = document.body() else {
        return Ok(());
    };

    let banner = document.create_element("div")?;
    banner.set_id(id);
    banner.set_attribute("style", BANNER_STYLE)?;
    banner.set_text_content(Some(text));
    body.append_child(&banner)?;

    let dismiss = Closure::<dyn FnMut()>::new({
        let banner = banner.clone();
        move || banner.remove()
    });
    banner.add_event_listener_with_callback("click", dismiss.as_ref().unchecked_ref())?;
    dismiss.forget();

    if let Some(window) = web_sys::window() {
        let expire = Closure::once_into_js(move || banner.remove());
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            expire.unchecked_ref(),
            i32::try_from(duration_ms).unwrap_or(i32::MAX),
        )?;
    }
    Ok(())
}
