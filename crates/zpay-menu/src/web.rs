//! Browser binding: `web_sys` document adapter and the delegated click listener.

use gloo::console;
use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, Node};

use crate::controller::MenuController;
use crate::dom::MenuDom;
use crate::markup::MenuMarkup;

/// Optional JSON override for markup conventions, read from `<body>`.
pub const MARKUP_ATTRIBUTE: &str = "data-menu-markup";

/// [`MenuDom`] over a live browser document.
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    /// Wrap a browser document.
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }
}

impl MenuDom for WebDom {
    type Element = Element;

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_selector(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_selector_all(&self, scope: Option<&Element>, selector: &str) -> Vec<Element> {
        let list = match scope {
            Some(element) => element.query_selector_all(selector),
            None => self.document.query_selector_all(selector),
        };
        let Ok(list) = list else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn closest(&self, element: &Element, selector: &str) -> Option<Element> {
        element.closest(selector).ok().flatten()
    }

    fn next_element_sibling(&self, element: &Element) -> Option<Element> {
        element.next_element_sibling()
    }

    fn contains(&self, ancestor: &Element, element: &Element) -> bool {
        let node: &Node = element.as_ref();
        ancestor.contains(Some(node))
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&mut self, element: &Element, name: &str, value: &str) {
        if let Err(err) = element.set_attribute(name, value) {
            console::warn!("menu attribute update failed", name, err);
        }
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn set_class(&mut self, element: &Element, class: &str, present: bool) {
        if let Err(err) = element.class_list().toggle_with_force(class, present) {
            console::warn!("menu class update failed", class, err);
        }
    }
}

/// Document-level click listener driving a [`MenuController`].
///
/// Dropping the binding removes the listener.
pub struct MenuBinding {
    listener: EventListener,
}

impl MenuBinding {
    /// Register one delegated `click` listener on `document`.
    #[must_use]
    pub fn install(document: &Document, controller: MenuController) -> Self {
        let mut dom = WebDom::new(document.clone());
        let listener = EventListener::new_with_options(
            document,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(target) = event_element(event) else {
                    return;
                };
                if controller.handle_click(&mut dom, &target).prevent_default() {
                    event.prevent_default();
                }
            },
        );
        Self { listener }
    }

    /// Keep the listener registered for the rest of the page session.
    pub fn persist(self) {
        self.listener.forget();
    }
}

/// Wasm entry point: install the menu listener for this page.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let document = gloo::utils::document();
    match MenuController::new(load_markup(&document)) {
        Ok(controller) => MenuBinding::install(&document, controller).persist(),
        Err(err) => console::error!("menu markup rejected", err.to_string()),
    }
}

/// Inline handler: `onclick="toggleMenu('reports', this)"`.
#[wasm_bindgen(js_name = toggleMenu)]
pub fn toggle_menu(id: &str, button: &Element) {
    let document = gloo::utils::document();
    let controller = match MenuController::new(load_markup(&document)) {
        Ok(controller) => controller,
        Err(err) => {
            console::error!("menu markup rejected", err.to_string());
            return;
        }
    };
    let mut dom = WebDom::new(document);
    controller.toggle_menu(&mut dom, id, button);
}

fn load_markup(document: &Document) -> MenuMarkup {
    let Some(raw) = document
        .body()
        .and_then(|body| body.get_attribute(MARKUP_ATTRIBUTE))
    else {
        return MenuMarkup::default();
    };
    MenuMarkup::from_json(&raw).unwrap_or_else(|err| {
        console::warn!("ignoring invalid menu markup override", err.to_string());
        MenuMarkup::default()
    })
}

fn event_element(event: &Event) -> Option<Element> {
    match event.target()?.dyn_into::<Element>() {
        Ok(element) => Some(element),
        Err(target) => target.dyn_into::<Node>().ok()?.parent_element(),
    }
}
