//! Seam between the menu controller and a concrete document.
//!
//! The browser binding implements this over `web_sys`; tests and the replay
//! tool use [`crate::memory::MemoryDocument`]. Every lookup is optional and a
//! selector the implementation cannot evaluate resolves to nothing, so the
//! controller can treat all failures as "no such element".

/// Minimal DOM surface needed to drive menu toggles.
pub trait MenuDom {
    /// Handle to an element. Equality must mean "same node".
    type Element: Clone + PartialEq;

    /// The document body, if present.
    fn body(&self) -> Option<Self::Element>;

    /// Element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// First element in document order matching `selector`.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// Every element matching `selector`, within `scope` when given and the
    /// whole document otherwise. The scope element itself is excluded.
    fn query_selector_all(&self, scope: Option<&Self::Element>, selector: &str)
    -> Vec<Self::Element>;

    /// Nearest inclusive ancestor of `element` matching `selector`.
    fn closest(&self, element: &Self::Element, selector: &str) -> Option<Self::Element>;

    /// Next sibling that is an element.
    fn next_element_sibling(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Whether `element` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Element, element: &Self::Element) -> bool;

    /// Attribute value, if set.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Set an attribute value.
    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    /// Whether the class list contains `class`.
    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Add (`present == true`) or remove a class.
    fn set_class(&mut self, element: &Self::Element, class: &str, present: bool);

    /// Flip a class and return whether it is now present.
    fn toggle_class(&mut self, element: &Self::Element, class: &str) -> bool {
        let present = !self.has_class(element, class);
        self.set_class(element, class, present);
        present
    }
}
