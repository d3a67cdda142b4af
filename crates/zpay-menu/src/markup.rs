//! Markup conventions shared between the dashboard templates and the controller.
//!
//! # Design
//! - One struct names every class, attribute, and selector the controller reads.
//! - Defaults match the dashboard templates; JSON overrides are partial.

use serde::{Deserialize, Serialize};

use crate::error::{MarkupError, MenuError, MenuResult};
use crate::selector;

/// Accessibility attribute kept in sync with panel state.
pub const ARIA_EXPANDED: &str = "aria-expanded";

/// Class names, attribute names, and selectors recognised by the controller.
///
/// Selector fields are validated against the same subset the in-memory
/// document evaluates: type, `*`, `#id`, `.class`, `[attr]` and
/// `[attr=value]` steps joined by descendant or child combinators, in
/// comma-separated groups. Pseudo-classes, sibling combinators and other
/// attribute operators are rejected even though a browser would accept
/// them, so a `data-menu-markup` override such as
/// `.sb__btn:not(.disabled)` fails validation and the page keeps the
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuMarkup {
    /// Selector for independent nested-menu buttons.
    pub nested_button_selector: String,
    /// Attribute holding a nested button's panel selector.
    pub target_attribute: String,
    /// Attribute marking grouped toggles; its value is the panel selector.
    pub group_toggle_attribute: String,
    /// Selector for group containers that scope exclusivity.
    pub group_selector: String,
    /// Open marker for nested and grouped panels.
    pub open_class: String,
    /// Open marker for panels driven by the simple toggle.
    pub show_class: String,
    /// Selector for the sidebar collapse button.
    pub collapse_button_selector: String,
    /// Body class marking the sidebar as collapsed.
    pub collapsed_class: String,
}

impl Default for MenuMarkup {
    fn default() -> Self {
        Self {
            nested_button_selector: ".sb__btn".to_string(),
            target_attribute: "data-target".to_string(),
            group_toggle_attribute: "data-sb-toggle".to_string(),
            group_selector: ".sb-group".to_string(),
            open_class: "open".to_string(),
            show_class: "show".to_string(),
            collapse_button_selector: "[data-sb-collapse]".to_string(),
            collapsed_class: "sb-collapsed".to_string(),
        }
    }
}

impl MenuMarkup {
    /// Decode conventions from JSON; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::MarkupDecode`] for malformed JSON or unknown
    /// fields, and [`MenuError::Markup`] when a field fails validation.
    pub fn from_json(input: &str) -> MenuResult<Self> {
        let markup: Self =
            serde_json::from_str(input).map_err(|source| MenuError::MarkupDecode { source })?;
        markup.validate()?;
        Ok(markup)
    }

    /// Check every field for a usable value.
    ///
    /// # Errors
    ///
    /// Returns the first [`MarkupError`] encountered, in field order.
    pub fn validate(&self) -> Result<(), MarkupError> {
        check_selector("nested_button_selector", &self.nested_button_selector)?;
        check_name("target_attribute", &self.target_attribute)?;
        check_name("group_toggle_attribute", &self.group_toggle_attribute)?;
        check_selector("group_selector", &self.group_selector)?;
        check_name("open_class", &self.open_class)?;
        check_name("show_class", &self.show_class)?;
        check_selector("collapse_button_selector", &self.collapse_button_selector)?;
        check_name("collapsed_class", &self.collapsed_class)?;
        Ok(())
    }

    /// Selector matching every grouped toggle.
    #[must_use]
    pub fn group_toggle_selector(&self) -> String {
        format!("[{}]", self.group_toggle_attribute)
    }
}

fn check_name(field: &'static str, value: &str) -> Result<(), MarkupError> {
    if value.trim().is_empty() {
        return Err(MarkupError::Empty { field });
    }
    let valid = value
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(MarkupError::InvalidName {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn check_selector(field: &'static str, value: &str) -> Result<(), MarkupError> {
    if value.trim().is_empty() {
        return Err(MarkupError::Empty { field });
    }
    selector::parse(value)
        .map(|_| ())
        .map_err(|source| MarkupError::InvalidSelector { field, source })
}
