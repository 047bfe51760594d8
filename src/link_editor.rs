use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::dom;
use crate::links::{LinkList, Mode, Submit};

const EDITOR_ATTR: &str = "data-link-editor";
const INPUT_SELECTOR: &str = "[data-link-input]";
const ADD_SELECTOR: &str = "[data-link-add]";
const CANCEL_SELECTOR: &str = "[data-link-cancel]";
const LIST_SELECTOR: &str = "[data-link-list]";
const ACTION_ATTR: &str = "data-link-action";
const INDEX_ATTR: &str = "data-index";

/// Rendering target for one editor instance. The DOM implementation lives in
/// [`DomSurface`]; tests drive the controller through a recording mock.
pub trait EditorSurface {
    fn field_value(&self) -> String;
    fn set_field_value(&self, value: &str);
    fn input_value(&self) -> String;
    fn set_input_value(&self, value: &str);
    fn focus_input(&self);
    fn render_rows(&self, entries: &[String]);
    fn set_editing(&self, editing: bool);
}

/// Drives a [`LinkList`] against a surface: every mutation re-serializes into
/// the backing field and re-renders the row list, so the submitted value is
/// always consistent with what is on screen.
pub struct LinkEditor<S: EditorSurface> {
    list: LinkList,
    surface: S,
}

impl<S: EditorSurface> LinkEditor<S> {
    pub fn mount(surface: S) -> Self {
        let list = LinkList::parse(&surface.field_value());
        let editor = Self { list, surface };
        editor.refresh();
        editor
    }

    pub fn submit(&mut self) {
        if self.list.submit(&self.surface.input_value()) == Submit::Ignored {
            return;
        }
        self.surface.set_input_value("");
        self.sync();
        self.refresh();
    }

    pub fn edit(&mut self, index: usize) {
        let Some(text) = self.list.begin_edit(index) else {
            return;
        };
        let text = text.to_string();
        self.surface.set_input_value(&text);
        self.surface.focus_input();
        self.surface.set_editing(true);
    }

    pub fn delete(&mut self, index: usize) {
        let was_edited = self.list.mode() == Mode::Editing(index);
        if !self.list.delete(index) {
            return;
        }
        if was_edited {
            self.surface.set_input_value("");
        }
        self.sync();
        self.refresh();
    }

    pub fn cancel(&mut self) {
        self.list.cancel_edit();
        self.surface.set_input_value("");
        self.surface.set_editing(false);
    }

    pub fn entries(&self) -> &[String] {
        self.list.entries()
    }

    fn sync(&self) {
        self.surface.set_field_value(&self.list.serialize());
    }

    fn refresh(&self) {
        self.surface.render_rows(self.list.entries());
        self.surface.set_editing(self.list.is_editing());
    }
}

/// The hidden field the host form actually submits. The server renders it as
/// a `d-none` textarea, but a hidden input works the same.
enum BackingField {
    Input(HtmlInputElement),
    Area(HtmlTextAreaElement),
}

impl BackingField {
    fn from_element(element: Element) -> Option<Self> {
        match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(area) => Some(Self::Area(area)),
            Err(element) => element.dyn_into::<HtmlInputElement>().ok().map(Self::Input),
        }
    }

    fn value(&self) -> String {
        match self {
            Self::Input(input) => input.value(),
            Self::Area(area) => area.value(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            Self::Input(input) => input.set_value(value),
            Self::Area(area) => area.set_value(value),
        }
    }
}

pub struct DomSurface {
    document: Document,
    field: BackingField,
    input: HtmlInputElement,
    add: HtmlElement,
    cancel: Option<HtmlElement>,
    list: Element,
}

impl DomSurface {
    fn attach(document: &Document, root: &Element) -> Option<Self> {
        let field_id = root.get_attribute(EDITOR_ATTR)?;
        let field = document
            .get_element_by_id(&field_id)
            .and_then(BackingField::from_element)?;
        let input = dom::query(root, INPUT_SELECTOR)?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        let add = dom::query(root, ADD_SELECTOR)?.dyn_into::<HtmlElement>().ok()?;
        let cancel = dom::query(root, CANCEL_SELECTOR).and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let list = dom::query(root, LIST_SELECTOR)?;
        Some(Self {
            document: document.clone(),
            field,
            input,
            add,
            cancel,
            list,
        })
    }

    fn row_control(&self, action: &str, index: usize, label: &str, classes: &str) -> Option<Element> {
        let button = self.document.create_element("button").ok()?;
        button.set_class_name(classes);
        let _ = button.set_attribute("type", "button");
        let _ = button.set_attribute(ACTION_ATTR, action);
        let _ = button.set_attribute(INDEX_ATTR, &index.to_string());
        let _ = button.set_attribute("aria-label", &format!("{label} link {}", index + 1));
        button.set_text_content(Some(label));
        Some(button)
    }
}

impl EditorSurface for DomSurface {
    fn field_value(&self) -> String {
        self.field.value()
    }

    fn set_field_value(&self, value: &str) {
        self.field.set_value(value);
    }

    fn input_value(&self) -> String {
        self.input.value()
    }

    fn set_input_value(&self, value: &str) {
        self.input.set_value(value);
    }

    fn focus_input(&self) {
        let _ = self.input.focus();
    }

    fn render_rows(&self, entries: &[String]) {
        self.list.set_inner_html("");
        if entries.is_empty() {
            if let Ok(row) = self.document.create_element("div") {
                row.set_class_name("cp-link-row cp-link-empty text-muted");
                row.set_text_content(Some("No links added yet."));
                let _ = self.list.append_child(&row);
            }
            return;
        }
        for (index, entry) in entries.iter().enumerate() {
            let Ok(row) = self.document.create_element("div") else {
                continue;
            };
            row.set_class_name("cp-link-row d-flex align-items-center gap-2");
            if let Ok(text) = self.document.create_element("span") {
                text.set_class_name("cp-link-text flex-grow-1 text-truncate");
                text.set_text_content(Some(entry));
                let _ = row.append_child(&text);
            }
            if let Some(edit) = self.row_control("edit", index, "Edit", "btn btn-sm btn-outline-secondary") {
                let _ = row.append_child(&edit);
            }
            if let Some(delete) = self.row_control("delete", index, "Remove", "btn btn-sm btn-outline-danger") {
                let _ = row.append_child(&delete);
            }
            let _ = self.list.append_child(&row);
        }
    }

    fn set_editing(&self, editing: bool) {
        self.add.set_inner_html(if editing {
            "<i class=\"bi bi-check-lg\"></i> Save"
        } else {
            "<i class=\"bi bi-plus-lg\"></i> Add"
        });
        if let Some(cancel) = &self.cancel {
            let _ = cancel.class_list().toggle_with_force("d-none", !editing);
        }
    }
}

/// Mounts an editor on every `[data-link-editor]` container in the document.
/// Instances are fully isolated; a container missing any required piece of
/// markup is skipped. Returns how many editors were bound.
pub fn bind_all(document: &Document) -> usize {
    let Ok(roots) = document.query_selector_all(&format!("[{EDITOR_ATTR}]")) else {
        return 0;
    };
    let mut bound = 0;
    for i in 0..roots.length() {
        let Some(root) = roots.item(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        if bind_editor(document, &root).is_some() {
            bound += 1;
        }
    }
    bound
}

fn bind_editor(document: &Document, root: &Element) -> Option<()> {
    let surface = DomSurface::attach(document, root)?;
    let input = surface.input.clone();
    let editor = Rc::new(RefCell::new(LinkEditor::mount(surface)));

    // One delegated listener per editor covers the add/cancel controls and
    // the rendered row buttons, so re-rendering never orphans a handler.
    let click_root = root.clone();
    let click_editor = Rc::clone(&editor);
    EventListener::new_with_options(
        root,
        "click",
        EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        },
        move |event| on_editor_click(&click_root, &click_editor, event),
    )
    .forget();

    // Enter runs the add/save path instead of submitting the host form.
    let key_editor = Rc::clone(&editor);
    EventListener::new_with_options(
        &input,
        "keydown",
        EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        },
        move |event| {
            let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            if event.key() == "Enter" {
                event.prevent_default();
                key_editor.borrow_mut().submit();
            }
        },
    )
    .forget();

    Some(())
}

fn on_editor_click(root: &Element, editor: &Rc<RefCell<LinkEditor<DomSurface>>>, event: &Event) {
    let Some(target) = dom::event_element(event) else {
        return;
    };
    if let Some(control) = dom::closest_within(&target, &format!("[{ACTION_ATTR}]"), root) {
        event.prevent_default();
        let action = control.get_attribute(ACTION_ATTR).unwrap_or_default();
        let index = control
            .get_attribute(INDEX_ATTR)
            .and_then(|raw| raw.parse::<usize>().ok());
        match (action.as_str(), index) {
            ("edit", Some(index)) => editor.borrow_mut().edit(index),
            ("delete", Some(index)) => editor.borrow_mut().delete(index),
            _ => {}
        }
    } else if dom::closest_within(&target, ADD_SELECTOR, root).is_some() {
        event.prevent_default();
        editor.borrow_mut().submit();
    } else if dom::closest_within(&target, CANCEL_SELECTOR, root).is_some() {
        event.prevent_default();
        editor.borrow_mut().cancel();
    }
}
