//! End-to-end click behaviour against the dashboard sidebar fixture.

use zpay_menu::{ClickOutcome, ElementSpec, MenuController, MenuDom, MenuMarkup};
use zpay_test_support::assert::{assert_expanded, assert_open, assert_pair};
use zpay_test_support::fixtures::Sidebar;

fn controller() -> MenuController {
    MenuController::new(MenuMarkup::default()).expect("default markup is valid")
}

#[test]
fn nested_menus_open_independently_at_any_depth() {
    let mut sidebar = Sidebar::build();
    let controller = controller();
    let doc = &mut sidebar.document;

    let report = controller.handle_click(doc, &sidebar.payments_button);
    assert_eq!(report.nested, ClickOutcome::Nested { open: true });
    assert!(report.prevent_default());

    controller.handle_click(doc, &sidebar.payouts_button);
    controller.handle_click(doc, &sidebar.reports_label);

    assert_pair(doc, sidebar.payments_button, sidebar.payments_panel, "open", true);
    assert_pair(doc, sidebar.payouts_button, sidebar.payouts_panel, "open", true);
    assert_pair(doc, sidebar.reports_button, sidebar.reports_panel, "open", true);

    controller.handle_click(doc, &sidebar.payments_button);
    assert_pair(doc, sidebar.payments_button, sidebar.payments_panel, "open", false);
    assert_pair(doc, sidebar.payouts_button, sidebar.payouts_panel, "open", true);
    assert_pair(doc, sidebar.reports_button, sidebar.reports_panel, "open", true);
}

#[test]
fn even_click_counts_restore_every_toggle_kind() {
    let mut sidebar = Sidebar::build();
    let controller = controller();
    let before = sidebar.document.snapshot();
    let doc = &mut sidebar.document;

    for target in [
        sidebar.payments_button,
        sidebar.reports_label,
        sidebar.settings_toggle,
        sidebar.collapse_icon,
    ] {
        controller.handle_click(doc, &target);
        controller.handle_click(doc, &target);
    }
    for _ in 0..4 {
        controller.toggle_menu(doc, "merchant-menu", &sidebar.merchants_button);
    }

    assert_eq!(doc.snapshot(), before);
}

#[test]
fn nested_button_without_panel_changes_nothing() {
    let mut sidebar = Sidebar::build();
    let controller = controller();
    let before = sidebar.document.snapshot();

    let report = controller.handle_click(&mut sidebar.document, &sidebar.broken_button);

    assert_eq!(report.nested, ClickOutcome::Unresolved);
    assert!(report.prevent_default());
    assert!(report.is_noop());
    assert_eq!(sidebar.document.snapshot(), before);
}

#[test]
fn grouped_toggle_closes_open_sibling() {
    let mut sidebar = Sidebar::build();
    let controller = controller();
    let doc = &mut sidebar.document;

    let report = controller.handle_click(doc, &sidebar.settings_toggle);
    assert_eq!(
        report.grouped,
        ClickOutcome::Grouped {
            open: true,
            closed_siblings: 0
        }
    );
    assert!(!report.prevent_default());
    assert_pair(doc, sidebar.settings_toggle, sidebar.settings_panel, "open", true);
    assert_pair(doc, sidebar.accounts_toggle, sidebar.accounts_panel, "open", false);

    let report = controller.handle_click(doc, &sidebar.accounts_toggle);
    assert_eq!(
        report.grouped,
        ClickOutcome::Grouped {
            open: true,
            closed_siblings: 1
        }
    );
    assert_pair(doc, sidebar.accounts_toggle, sidebar.accounts_panel, "open", true);
    assert_pair(doc, sidebar.settings_toggle, sidebar.settings_panel, "open", false);
}

#[test]
fn closing_the_open_grouped_toggle_only_closes_it() {
    let mut sidebar = Sidebar::build();
    let controller = controller();
    let doc = &mut sidebar.document;

    controller.handle_click(doc, &sidebar.settings_toggle);
    let report = controller.handle_click(doc, &sidebar.settings_toggle);

    assert_eq!(
        report.grouped,
        ClickOutcome::Grouped {
            open: false,
            closed_siblings: 0
        }
    );
    assert_pair(doc, sidebar.settings_toggle, sidebar.settings_panel, "open", false);
    assert_pair(doc, sidebar.accounts_toggle, sidebar.accounts_panel, "open", false);
}

#[test]
fn grouped_toggle_inside_open_panel_keeps_enclosing_panel_open() {
    let mut sidebar = Sidebar::build();
    let controller = controller();
    let doc = &mut sidebar.document;

    controller.handle_click(doc, &sidebar.accounts_toggle);
    controller.handle_click(doc, &sidebar.team_toggle);

    assert_pair(doc, sidebar.accounts_toggle, sidebar.accounts_panel, "open", true);
    assert_pair(doc, sidebar.team_toggle, sidebar.team_panel, "open", true);

    let report = controller.handle_click(doc, &sidebar.settings_toggle);
    assert_eq!(
        report.grouped,
        ClickOutcome::Grouped {
            open: true,
            closed_siblings: 2
        }
    );
    assert_pair(doc, sidebar.settings_toggle, sidebar.settings_panel, "open", true);
    assert_pair(doc, sidebar.accounts_toggle, sidebar.accounts_panel, "open", false);
    assert_pair(doc, sidebar.team_toggle, sidebar.team_panel, "open", false);
}

#[test]
fn groups_do_not_affect_each_other() {
    let mut sidebar = Sidebar::build();
    let controller = controller();
    let doc = &mut sidebar.document;

    controller.handle_click(doc, &sidebar.help_toggle);
    controller.handle_click(doc, &sidebar.inner_toggle);
    controller.handle_click(doc, &sidebar.settings_toggle);

    assert_pair(doc, sidebar.help_toggle, sidebar.help_panel, "open", true);
    assert_pair(doc, sidebar.inner_toggle, sidebar.inner_panel, "open", true);
    assert_pair(doc, sidebar.settings_toggle, sidebar.settings_panel, "open", true);

    let report = controller.handle_click(doc, &sidebar.inner_toggle);
    assert_eq!(
        report.grouped,
        ClickOutcome::Grouped {
            open: false,
            closed_siblings: 0
        }
    );
    assert_pair(doc, sidebar.settings_toggle, sidebar.settings_panel, "open", true);
}

#[test]
fn grouped_toggle_without_panel_changes_nothing() {
    let mut sidebar = Sidebar::build();
    let controller = controller();
    controller.handle_click(&mut sidebar.document, &sidebar.settings_toggle);
    let before = sidebar.document.snapshot();

    let report = controller.handle_click(&mut sidebar.document, &sidebar.ghost_toggle);

    assert_eq!(report.grouped, ClickOutcome::Unresolved);
    assert!(report.is_noop());
    assert_eq!(sidebar.document.snapshot(), before);
}

#[test]
fn toggles_sharing_a_panel_report_its_state() {
    let mut sidebar = Sidebar::build();
    let controller = controller();
    let second = sidebar.document.append(
        sidebar.primary_group,
        ElementSpec::new("button")
            .attr("data-sb-toggle", "#settings-menu")
            .attr("aria-expanded", "false"),
    );
    let doc = &mut sidebar.document;

    controller.handle_click(doc, &sidebar.settings_toggle);
    assert_pair(doc, sidebar.settings_toggle, sidebar.settings_panel, "open", true);
    assert_expanded(doc, second, true);

    let report = controller.handle_click(doc, &second);
    assert_eq!(
        report.grouped,
        ClickOutcome::Grouped {
            open: false,
            closed_siblings: 0
        }
    );
    assert_pair(doc, second, sidebar.settings_panel, "open", false);
    assert_expanded(doc, sidebar.settings_toggle, false);
}

#[test]
fn grouped_click_resets_toggle_without_panel() {
    let mut sidebar = Sidebar::build();
    let controller = controller();
    let doc = &mut sidebar.document;
    doc.set_attribute(&sidebar.ghost_toggle, "aria-expanded", "true");

    controller.handle_click(doc, &sidebar.accounts_toggle);

    assert_expanded(doc, sidebar.ghost_toggle, false);
    assert_pair(doc, sidebar.accounts_toggle, sidebar.accounts_panel, "open", true);
}

#[test]
fn sidebar_collapse_alternates_on_each_click() {
    let mut sidebar = Sidebar::build();
    let controller = controller();
    let doc = &mut sidebar.document;

    let expected = [true, false, true];
    for (click, collapsed) in expected.into_iter().enumerate() {
        let target = if click % 2 == 0 {
            sidebar.collapse_icon
        } else {
            sidebar.collapse_button
        };
        let report = controller.handle_click(doc, &target);
        assert_eq!(report.sidebar, ClickOutcome::Sidebar { collapsed });
        assert_open(doc, sidebar.body, "sb-collapsed", collapsed);
    }
    assert!(doc.attr(sidebar.collapse_button, "aria-expanded").is_none());
}

#[test]
fn clicks_outside_controls_change_nothing() {
    let mut sidebar = Sidebar::build();
    let controller = controller();
    let before = sidebar.document.snapshot();

    for target in [sidebar.content, sidebar.body, sidebar.primary_group, sidebar.payments_panel] {
        let report = controller.handle_click(&mut sidebar.document, &target);
        assert!(report.is_noop());
        assert!(!report.prevent_default());
        assert_eq!(report.nested, ClickOutcome::Ignored);
        assert_eq!(report.grouped, ClickOutcome::Ignored);
        assert_eq!(report.sidebar, ClickOutcome::Ignored);
    }

    assert_eq!(sidebar.document.snapshot(), before);
}

#[test]
fn simple_toggle_tracks_aria_expanded() {
    let mut sidebar = Sidebar::build();
    let controller = controller();
    let doc = &mut sidebar.document;

    assert_eq!(
        controller.toggle_menu(doc, "merchant-menu", &sidebar.merchants_button),
        Some(true)
    );
    assert_pair(doc, sidebar.merchants_button, sidebar.merchants_panel, "show", true);
    assert_open(doc, sidebar.merchants_panel, "open", false);

    assert_eq!(
        controller.toggle_menu(doc, "merchant-menu", &sidebar.merchants_button),
        Some(false)
    );
    assert_pair(doc, sidebar.merchants_button, sidebar.merchants_panel, "show", false);
}

#[test]
fn simple_toggle_without_panel_changes_nothing() {
    let mut sidebar = Sidebar::build();
    let controller = controller();
    let before = sidebar.document.snapshot();

    let result = controller.toggle_menu(
        &mut sidebar.document,
        "no-such-menu",
        &sidebar.merchants_button,
    );

    assert_eq!(result, None);
    assert_expanded(&sidebar.document, sidebar.merchants_button, false);
    assert_eq!(sidebar.document.snapshot(), before);
}

#[test]
fn toggles_added_after_setup_are_handled() {
    let mut sidebar = Sidebar::build();
    let controller = controller();
    let nav = sidebar
        .document
        .parent(sidebar.payments_button)
        .expect("payments button has a parent");

    let button = sidebar.document.append(
        nav,
        ElementSpec::new("a")
            .class("sb__btn")
            .attr("aria-expanded", "false"),
    );
    let panel = sidebar
        .document
        .append(nav, ElementSpec::new("ul").class("sb__panel"));
    let toggle = sidebar.document.append(
        sidebar.primary_group,
        ElementSpec::new("button").attr("data-sb-toggle", "#late-menu"),
    );
    let late_panel = sidebar
        .document
        .append(sidebar.primary_group, ElementSpec::new("ul").id("late-menu"));

    let doc = &mut sidebar.document;
    controller.handle_click(doc, &sidebar.settings_toggle);
    controller.handle_click(doc, &button);
    controller.handle_click(doc, &toggle);

    assert_pair(doc, button, panel, "open", true);
    assert_pair(doc, toggle, late_panel, "open", true);
    assert_pair(doc, sidebar.settings_toggle, sidebar.settings_panel, "open", false);
}

#[test]
fn custom_markup_drives_the_same_behaviour() {
    let markup = MenuMarkup::from_json(
        r#"{
            "nested_button_selector": "[data-submenu]",
            "target_attribute": "data-submenu",
            "open_class": "is-open"
        }"#,
    )
    .expect("valid markup");
    let controller = MenuController::new(markup).expect("valid markup");

    let mut doc = zpay_menu::MemoryDocument::new();
    let body = doc.append(doc.root(), ElementSpec::new("body"));
    let button = doc.append(body, ElementSpec::new("button").attr("data-submenu", "#m"));
    let panel = doc.append(body, ElementSpec::new("ul").id("m"));

    let report = controller.handle_click(&mut doc, &button);
    assert_eq!(report.nested, ClickOutcome::Nested { open: true });
    assert!(doc.has_class(&panel, "is-open"));
    assert!(!doc.has_class(&panel, "open"));
    assert_eq!(doc.attribute(&button, "aria-expanded").as_deref(), Some("true"));
}
