//! Assertions over menu state in a [`MemoryDocument`].

use zpay_menu::{ARIA_EXPANDED, MemoryDocument, MenuDom, NodeId};

/// Assert a toggle reports `aria-expanded` matching `expanded`.
///
/// # Panics
///
/// Panics when the attribute is missing or holds the other value.
#[track_caller]
pub fn assert_expanded(document: &MemoryDocument, toggle: NodeId, expanded: bool) {
    let expected = if expanded { "true" } else { "false" };
    assert_eq!(
        document.attr(toggle, ARIA_EXPANDED),
        Some(expected),
        "aria-expanded of {toggle:?}"
    );
}

/// Assert a panel carries (or lacks) the `class` open marker.
///
/// # Panics
///
/// Panics when the marker presence differs from `open`.
#[track_caller]
pub fn assert_open(document: &MemoryDocument, panel: NodeId, class: &str, open: bool) {
    assert_eq!(
        document.has_class(&panel, class),
        open,
        "class '{class}' on {panel:?} (classes: {:?})",
        document.class_names(panel)
    );
}

/// Assert toggle and panel agree and match `open`.
///
/// # Panics
///
/// Panics when either side disagrees with `open`.
#[track_caller]
pub fn assert_pair(
    document: &MemoryDocument,
    toggle: NodeId,
    panel: NodeId,
    class: &str,
    open: bool,
) {
    assert_expanded(document, toggle, open);
    assert_open(document, panel, class, open);
}

#[cfg(test)]
mod tests {
    use super::*;
    use zpay_menu::ElementSpec;

    #[test]
    fn assertions_accept_matching_state() {
        let mut doc = MemoryDocument::new();
        let button = doc.append(doc.root(), ElementSpec::new("button").attr(ARIA_EXPANDED, "true"));
        let panel = doc.append(doc.root(), ElementSpec::new("ul").class("open"));
        assert_pair(&doc, button, panel, "open", true);
    }

    #[test]
    #[should_panic(expected = "aria-expanded")]
    fn assert_expanded_rejects_mismatch() {
        let mut doc = MemoryDocument::new();
        let button = doc.append(doc.root(), ElementSpec::new("button").attr(ARIA_EXPANDED, "false"));
        assert_expanded(&doc, button, true);
    }
}
