use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlFormElement};

use crate::dom;
use crate::modal::ModalHandle;

const GUARD_ATTR: &str = "data-confirm";
const BYPASS_ATTR: &str = "data-confirming";
const MODAL_ID: &str = "confirm-modal";
const MESSAGE_SELECTOR: &str = "[data-confirm-message]";
const ACCEPT_SELECTOR: &str = "[data-confirm-accept]";

pub const DEFAULT_MESSAGE: &str = "Are you sure you want to continue?";

/// How a submission arrived at the guard. `BypassOnce` is the programmatic
/// resubmission triggered after the user confirmed; its marker is consumed
/// during classification so it can never let a second submission through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitIntent {
    Normal,
    BypassOnce,
}

impl SubmitIntent {
    fn classify(form: &HtmlFormElement) -> Self {
        if form.has_attribute(BYPASS_ATTR) {
            let _ = form.remove_attribute(BYPASS_ATTR);
            Self::BypassOnce
        } else {
            Self::Normal
        }
    }
}

/// Single-slot pending-confirmation state. At most one form waits for the
/// user at any time; arming the slot for a second form replaces the first.
/// The slot is cleared on confirm and on dismiss, so a dismissed dialog can
/// never resubmit a stale form later.
#[derive(Debug)]
pub struct ConfirmGuard<T> {
    pending: Option<T>,
}

impl<T> Default for ConfirmGuard<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> ConfirmGuard<T> {
    /// Arms the slot and returns the message to display, falling back to the
    /// generic prompt when the form carries none.
    pub fn intercept(&mut self, form: T, message: Option<String>) -> String {
        self.pending = Some(form);
        message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MESSAGE.to_string())
    }

    pub fn confirm(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Wires the page-wide guard: a document-level submit interceptor plus the
/// confirm and dismiss handlers on the shared confirmation modal.
pub fn bind(document: &Document) {
    let guard: Rc<RefCell<ConfirmGuard<HtmlFormElement>>> = Rc::default();

    let submit_doc = document.clone();
    let submit_guard = Rc::clone(&guard);
    EventListener::new_with_options(
        document,
        "submit",
        EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        },
        move |event| on_submit(&submit_doc, &submit_guard, event),
    )
    .forget();

    let Some(modal_el) = document.get_element_by_id(MODAL_ID) else {
        return;
    };

    if let Some(accept) = dom::query(&modal_el, ACCEPT_SELECTOR) {
        let confirm_guard = Rc::clone(&guard);
        let confirm_modal = modal_el.clone();
        EventListener::new(&accept, "click", move |_event| {
            // Take the form before resubmitting: requestSubmit dispatches the
            // submit event synchronously and the interceptor must not find
            // the guard still borrowed.
            let pending = confirm_guard.borrow_mut().confirm();
            let Some(form) = pending else {
                return;
            };
            if let Some(modal) = ModalHandle::attach(&confirm_modal) {
                modal.hide();
            }
            let _ = form.set_attribute(BYPASS_ATTR, "");
            let _ = form.request_submit();
        })
        .forget();
    }

    // Closing the dialog without confirming drops the pending form.
    let dismiss_guard = Rc::clone(&guard);
    EventListener::new(&modal_el, "hidden.bs.modal", move |_event| {
        dismiss_guard.borrow_mut().dismiss();
    })
    .forget();
}

fn on_submit(
    document: &Document,
    guard: &Rc<RefCell<ConfirmGuard<HtmlFormElement>>>,
    event: &Event,
) {
    let Some(form) = event
        .target()
        .and_then(|target| target.dyn_into::<HtmlFormElement>().ok())
    else {
        return;
    };
    if !form.has_attribute(GUARD_ATTR) {
        return;
    }
    if SubmitIntent::classify(&form) == SubmitIntent::BypassOnce {
        return;
    }
    // Without the modal (or Bootstrap) there is no way to ask, so the native
    // submission proceeds untouched.
    let Some(modal_el) = document.get_element_by_id(MODAL_ID) else {
        return;
    };
    let Some(modal) = ModalHandle::attach(&modal_el) else {
        return;
    };
    event.prevent_default();
    let message = guard
        .borrow_mut()
        .intercept(form.clone(), form.get_attribute(GUARD_ATTR));
    if let Some(message_el) = dom::query(&modal_el, MESSAGE_SELECTOR) {
        message_el.set_text_content(Some(&message));
    }
    modal.show();
}
