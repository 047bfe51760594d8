//! Progressive enhancement for the server-rendered catalog pages: card detail
//! modals, the purchase-link editor, and confirm-before-submit interception.
//! Every controller reads the markup contract described in the README and
//! degrades to a no-op when its markup is absent.

pub mod cards;
pub mod confirm;
pub mod dom;
pub mod link_editor;
pub mod links;
pub mod modal;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = gloo::utils::document();
    cards::bind(&document);
    let editors = link_editor::bind_all(&document);
    confirm::bind(&document);

    gloo::console::debug!("catalog-ui ready,", editors as u32, "link editor(s) bound");
    Ok(())
}
