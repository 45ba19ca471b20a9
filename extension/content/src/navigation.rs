//! Wires the page's timer and history events to a [`UrlChangeNotifier`].

use std::cell::RefCell;
use std::rc::Rc;

use omnipanel::notifier::{Trigger, UrlChangeNotifier, POLL_INTERVAL};
use omnipanel_browser::RuntimeSender;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Reports the current URL now and on every later change.
pub fn watch(window: &Window) -> Result<(), JsValue> {
    let location = window.location();
    let notifier = Rc::new(RefCell::new(UrlChangeNotifier::start(RuntimeSender, &location.href()?)));

    let check = move |trigger: Trigger| {
        let Ok(href) = location.href() else {
            return;
        };
        notifier.borrow_mut().check(&href, trigger);
    };
    let check = Rc::new(check);

    let poll = Closure::<dyn FnMut()>::new({
        let check = Rc::clone(&check);
        move || check(Trigger::Poll)
    });
    window.set_interval_with_callback_and_timeout_and_arguments_0(
        poll.as_ref().unchecked_ref(),
        POLL_INTERVAL.as_millis() as i32,
    )?;
    poll.forget();

    for (event, trigger) in [("popstate", Trigger::PopState), ("hashchange", Trigger::HashChange)] {
        let listener = Closure::<dyn FnMut()>::new({
            let check = Rc::clone(&check);
            move || check(trigger)
        });
        window.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
        listener.forget();
    }
    Ok(())
}
