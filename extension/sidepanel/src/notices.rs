//! Toast and status line rendering.

use std::cell::Cell;
use std::rc::Rc;

use omnipanel::panel::Notices;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Window};

/// Delay between fading a toast out and hiding it.
const FADE_MS: i32 = 300;

pub struct ToastNotices {
    window: Window,
    toast: Option<Element>,
    status: Option<Element>,
    /// Bumped per toast so a stale timer never hides a newer one.
    generation: Rc<Cell<u32>>,
}

impl ToastNotices {
    pub fn new(window: Window, toast: Option<Element>, status: Option<Element>) -> Self {
        Self {
            window,
            toast,
            status,
            generation: Rc::new(Cell::new(0)),
        }
    }
}

fn schedule(window: &Window, delay_ms: i32, callback: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(callback);
    if let Err(err) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay_ms)
    {
        tracing::debug!(error = ?err, "setTimeout failed");
    }
}

impl Notices for ToastNotices {
    fn transient(&self, text: &str, duration_ms: u32) {
        let Some(toast) = self.toast.clone() else {
            tracing::info!(text, "toast");
            return;
        };
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        toast.set_text_content(Some(text));
        let classes = toast.class_list();
        let _ = classes.add_1("show");
        let _ = classes.remove_1("hidden");

        let current = Rc::clone(&self.generation);
        let window = self.window.clone();
        let duration = i32::try_from(duration_ms).unwrap_or(i32::MAX);
        schedule(&self.window, duration, move || {
            if current.get() != generation {
                return;
            }
            let _ = toast.class_list().remove_1("show");
            schedule(&window, FADE_MS, move || {
                if current.get() == generation {
                    let _ = toast.class_list().add_1("hidden");
                }
            });
        });
    }

    fn set_status(&self, text: Option<&str>) {
        let Some(status) = &self.status else {
            return;
        };
        status.set_text_content(text);
        let classes = status.class_list();
        let _ = match text {
            Some(_) => classes.remove_1("hidden"),
            None => classes.add_1("hidden"),
        };
    }
}
