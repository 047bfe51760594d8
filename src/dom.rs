use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

pub fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

pub fn closest(target: &Element, selector: &str) -> Option<Element> {
    target.closest(selector).ok().flatten()
}

/// Like [`closest`], but rejects matches that sit outside `root`, keeping
/// delegated handlers from reacting to a sibling widget's controls.
pub fn closest_within(target: &Element, selector: &str, root: &Element) -> Option<Element> {
    let found = closest(target, selector)?;
    root.contains(Some(&found)).then_some(found)
}

pub fn query(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}
