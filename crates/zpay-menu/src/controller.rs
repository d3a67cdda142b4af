//! Menu toggle controller: click dispatch for sidebar menus and submenus.
//!
//! # Design
//! - One controller serves a whole page; clicks are delegated to it from a
//!   single document-level listener, so elements added later need no setup.
//! - Each handler resolves everything it needs before mutating anything; an
//!   unresolved control leaves the document untouched.
//! - The three delegated handlers are independent, as separate listeners
//!   would be. The simple toggle is invoked directly by inline handlers.

use tracing::debug;

use crate::dom::MenuDom;
use crate::error::MarkupError;
use crate::markup::{ARIA_EXPANDED, MenuMarkup};

/// What a single handler did with a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Target was not inside a control this handler recognises.
    Ignored,
    /// A control was found but its panel did not resolve.
    Unresolved,
    /// An independent nested panel was toggled.
    Nested {
        /// Panel state after the click.
        open: bool,
    },
    /// A grouped panel was toggled.
    Grouped {
        /// Panel state after the click.
        open: bool,
        /// Sibling panels in the group that were open and are now closed.
        closed_siblings: usize,
    },
    /// The sidebar collapse class was flipped on the body.
    Sidebar {
        /// Whether the sidebar is now collapsed.
        collapsed: bool,
    },
}

impl ClickOutcome {
    /// Whether the handler changed the document.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        !matches!(self, Self::Ignored | Self::Unresolved)
    }
}

/// Combined result of delegated click dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickReport {
    /// Independent nested toggle handler.
    pub nested: ClickOutcome,
    /// Grouped exclusive toggle handler.
    pub grouped: ClickOutcome,
    /// Sidebar collapse handler.
    pub sidebar: ClickOutcome,
}

impl ClickReport {
    /// Whether the browser's default click action must be suppressed.
    ///
    /// Nested buttons are often anchors; any click inside one is claimed,
    /// even when its panel is missing.
    #[must_use]
    pub const fn prevent_default(&self) -> bool {
        !matches!(self.nested, ClickOutcome::Ignored)
    }

    /// Whether no handler changed the document.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        !self.nested.is_applied() && !self.grouped.is_applied() && !self.sidebar.is_applied()
    }
}

/// Dispatcher for menu toggles, created once per page.
#[derive(Debug, Clone)]
pub struct MenuController {
    markup: MenuMarkup,
    group_toggle_selector: String,
}

impl MenuController {
    /// Build a controller from validated markup conventions.
    ///
    /// # Errors
    ///
    /// Returns a [`MarkupError`] when the conventions fail validation.
    pub fn new(markup: MenuMarkup) -> Result<Self, MarkupError> {
        markup.validate()?;
        let group_toggle_selector = markup.group_toggle_selector();
        Ok(Self {
            markup,
            group_toggle_selector,
        })
    }

    /// Conventions this controller was built with.
    #[must_use]
    pub const fn markup(&self) -> &MenuMarkup {
        &self.markup
    }

    /// Flip the panel with id `panel_id` and the `aria-expanded` state of
    /// `button`, using the `show` marker.
    ///
    /// Returns the new expanded state, or `None` when the panel is missing.
    pub fn toggle_menu<D: MenuDom>(
        &self,
        dom: &mut D,
        panel_id: &str,
        button: &D::Element,
    ) -> Option<bool> {
        let Some(panel) = dom.element_by_id(panel_id) else {
            debug!(panel_id, "menu panel not found; ignoring toggle");
            return None;
        };
        let expanded = dom.attribute(button, ARIA_EXPANDED).as_deref() == Some("true");
        let expanded = !expanded;
        dom.set_attribute(button, ARIA_EXPANDED, aria_value(expanded));
        dom.set_class(&panel, &self.markup.show_class, expanded);
        debug!(panel_id, expanded, "menu toggled");
        Some(expanded)
    }

    /// Run every delegated handler against a click on `target`.
    pub fn handle_click<D: MenuDom>(&self, dom: &mut D, target: &D::Element) -> ClickReport {
        let report = ClickReport {
            nested: self.toggle_nested(dom, target),
            grouped: self.toggle_grouped(dom, target),
            sidebar: self.toggle_sidebar(dom, target),
        };
        if !report.is_noop() {
            debug!(?report, "click handled");
        }
        report
    }

    /// Toggle an independent nested submenu. Other panels are left alone.
    pub fn toggle_nested<D: MenuDom>(&self, dom: &mut D, target: &D::Element) -> ClickOutcome {
        let Some(button) = dom.closest(target, &self.markup.nested_button_selector) else {
            return ClickOutcome::Ignored;
        };
        let panel = match dom.attribute(&button, &self.markup.target_attribute) {
            Some(selector) if !selector.is_empty() => dom.query_selector(&selector),
            _ => dom.next_element_sibling(&button),
        };
        let Some(panel) = panel else {
            debug!("nested menu button has no panel; ignoring click");
            return ClickOutcome::Unresolved;
        };

        let open = !dom.has_class(&panel, &self.markup.open_class);
        dom.set_class(&panel, &self.markup.open_class, open);
        dom.set_attribute(&button, ARIA_EXPANDED, aria_value(open));
        ClickOutcome::Nested { open }
    }

    /// Toggle a grouped submenu, closing every other panel in its group
    /// first.
    ///
    /// The group is the nearest ancestor matching the group selector, or the
    /// whole document. Toggles that belong to a nested group and panels
    /// containing the clicked button are not touched. Other toggles for the
    /// clicked panel follow its new state.
    pub fn toggle_grouped<D: MenuDom>(&self, dom: &mut D, target: &D::Element) -> ClickOutcome {
        let Some(button) = dom.closest(target, &self.group_toggle_selector) else {
            return ClickOutcome::Ignored;
        };
        let Some(panel) = self.grouped_panel(dom, &button) else {
            debug!("grouped toggle has no panel; ignoring click");
            return ClickOutcome::Unresolved;
        };
        let group = dom.closest(&button, &self.markup.group_selector);
        let open = !dom.has_class(&panel, &self.markup.open_class);

        let mut closed_siblings = 0;
        for other in dom.query_selector_all(group.as_ref(), &self.group_toggle_selector) {
            if other == button || dom.closest(&other, &self.markup.group_selector) != group {
                continue;
            }
            let other_panel = self.grouped_panel(dom, &other);
            match &other_panel {
                Some(shared) if *shared == panel => {
                    dom.set_attribute(&other, ARIA_EXPANDED, aria_value(open));
                    continue;
                }
                Some(enclosing) if dom.contains(enclosing, &button) => continue,
                _ => {}
            }
            dom.set_attribute(&other, ARIA_EXPANDED, aria_value(false));
            if let Some(other_panel) = other_panel
                && dom.has_class(&other_panel, &self.markup.open_class)
            {
                dom.set_class(&other_panel, &self.markup.open_class, false);
                closed_siblings += 1;
            }
        }

        dom.set_class(&panel, &self.markup.open_class, open);
        dom.set_attribute(&button, ARIA_EXPANDED, aria_value(open));
        ClickOutcome::Grouped {
            open,
            closed_siblings,
        }
    }

    /// Flip the collapsed marker on the body when the collapse button is
    /// clicked.
    pub fn toggle_sidebar<D: MenuDom>(&self, dom: &mut D, target: &D::Element) -> ClickOutcome {
        if dom
            .closest(target, &self.markup.collapse_button_selector)
            .is_none()
        {
            return ClickOutcome::Ignored;
        }
        let Some(body) = dom.body() else {
            debug!("document has no body; ignoring sidebar collapse");
            return ClickOutcome::Unresolved;
        };
        let collapsed = dom.toggle_class(&body, &self.markup.collapsed_class);
        ClickOutcome::Sidebar { collapsed }
    }

    fn grouped_panel<D: MenuDom>(&self, dom: &D, button: &D::Element) -> Option<D::Element> {
        let selector = dom.attribute(button, &self.markup.group_toggle_attribute)?;
        if selector.is_empty() {
            return None;
        }
        dom.query_selector(&selector)
    }
}

const fn aria_value(expanded: bool) -> &'static str {
    if expanded { "true" } else { "false" }
}
