use gloo::events::EventListener;
use web_sys::{Document, Event};

use crate::dom;
use crate::modal::ModalHandle;

const CARD_SELECTOR: &str = ".cp-card-clickable";
const STOP_SELECTOR: &str = ".cp-stop";
const MODAL_ID_ATTR: &str = "data-modal-id";

/// Document-level click delegation: a click anywhere inside a clickable card
/// opens the modal the card points at. Every missing piece of the contract is
/// a silent no-op so the server-rendered page keeps working on its own.
pub fn bind(document: &Document) {
    let doc = document.clone();
    EventListener::new(document, "click", move |event| on_click(&doc, event)).forget();
}

fn on_click(document: &Document, event: &Event) {
    let Some(target) = dom::event_element(event) else {
        return;
    };
    // Nested interactive controls opt out of the card behavior.
    if dom::closest(&target, STOP_SELECTOR).is_some() {
        return;
    }
    let Some(card) = dom::closest(&target, CARD_SELECTOR) else {
        return;
    };
    let Some(modal_id) = card.get_attribute(MODAL_ID_ATTR) else {
        return;
    };
    let Some(modal_el) = document.get_element_by_id(&modal_id) else {
        return;
    };
    if let Some(modal) = ModalHandle::attach(&modal_el) {
        modal.show();
    }
}
