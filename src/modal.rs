use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use web_sys::Element;

// Bootstrap ships with the server-rendered pages; the bindings below resolve
// `bootstrap.Modal` lazily at call time, so they are only entered after the
// global has been checked.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    type Modal;

    #[wasm_bindgen(static_method_of = Modal, js_namespace = bootstrap, js_name = getOrCreateInstance)]
    fn get_or_create_instance(element: &Element) -> Modal;

    #[wasm_bindgen(method)]
    fn show(this: &Modal);

    #[wasm_bindgen(method)]
    fn hide(this: &Modal);
}

/// Singleton toggle controller for one modal element. `attach` returns `None`
/// when the Bootstrap global is absent, which callers treat as a no-op.
pub struct ModalHandle {
    inner: Modal,
}

impl ModalHandle {
    pub fn attach(element: &Element) -> Option<Self> {
        if !library_loaded() {
            return None;
        }
        Some(Self {
            inner: Modal::get_or_create_instance(element),
        })
    }

    pub fn show(&self) {
        self.inner.show();
    }

    pub fn hide(&self) {
        self.inner.hide();
    }
}

fn library_loaded() -> bool {
    let window = gloo::utils::window();
    Reflect::get(&window, &JsValue::from_str("bootstrap"))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false)
}
