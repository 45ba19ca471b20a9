//! [`FrameHost`] over real `<iframe>` elements inside the panel's `<main>`.

use omnipanel::panel::FrameHost;
use omnipanel::{Error, Provider, Result, ZoomLevel};
use omnipanel_browser::js::stringify_js_error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlIFrameElement};

const FRAME_CLASS: &str = "ai-frame";
const FRAME_ALLOW: &str = "microphone; camera; clipboard-write; clipboard-read; fullscreen; display-capture";

pub struct DomFrameHost {
    document: Document,
    container: Element,
    /// Frames are inserted before this node so the toast stays on top.
    anchor: Option<Element>,
}

impl DomFrameHost {
    pub fn new(document: Document, container: Element, anchor: Option<Element>) -> Self {
        Self {
            document,
            container,
            anchor,
        }
    }

    fn build(&self, provider: Provider, url: &str) -> std::result::Result<HtmlIFrameElement, JsValue> {
        let frame: HtmlIFrameElement = self
            .document
            .create_element("iframe")?
            .dyn_into()
            .map_err(|_| JsValue::from_str("created element is not an iframe"))?;
        frame.set_class_name(FRAME_CLASS);
        frame.set_attribute("data-provider", provider.name())?;
        frame.set_attribute("frameborder", "0")?;
        frame.set_attribute("allow", FRAME_ALLOW)?;
        frame.style().set_property("display", "none")?;
        frame.set_src(url);
        self.container.insert_before(&frame, self.anchor.as_deref())?;
        Ok(frame)
    }
}

impl FrameHost for DomFrameHost {
    type Frame = HtmlIFrameElement;

    fn create(&mut self, provider: Provider, url: &str) -> Result<HtmlIFrameElement> {
        self.build(provider, url)
            .map_err(|err| Error::frame(provider, stringify_js_error(err)))
    }

    fn set_visible(&mut self, frame: &HtmlIFrameElement, visible: bool) {
        let display = if visible { "block" } else { "none" };
        if let Err(err) = frame.style().set_property("display", display) {
            tracing::warn!(error = %stringify_js_error(err), "failed to toggle frame");
        }
    }

    fn apply_zoom(&mut self, frame: &HtmlIFrameElement, zoom: ZoomLevel) {
        let extent = format!("{}%", zoom.inverse_extent());
        let scale = format!("scale({})", zoom.get());
        let style = frame.style();
        let applied = style
            .set_property("width", &extent)
            .and_then(|()| style.set_property("height", &extent))
            .and_then(|()| style.set_property("transform", &scale))
            .and_then(|()| style.set_property("transform-origin", "top left"));
        if let Err(err) = applied {
            tracing::warn!(%zoom, error = %stringify_js_error(err), "failed to zoom frame");
        }
    }

    fn destroy(&mut self, frame: HtmlIFrameElement) {
        frame.remove();
    }
}
