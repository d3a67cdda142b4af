//! Document fixtures modelled on the dashboard sidebar templates.

use zpay_menu::{ARIA_EXPANDED, ElementSpec, MemoryDocument, NodeId};

/// Dashboard page with every kind of menu control the templates use.
///
/// Layout (classes abbreviated):
///
/// ```text
/// body
/// ├── aside.sidebar
/// │   ├── button[data-sb-collapse] > span.icon
/// │   ├── nav                                   (ungrouped nested menus)
/// │   │   ├── a.sb__btn  "Payments"
/// │   │   ├── ul.sb__panel
/// │   │   │   ├── a.sb__btn "Payouts"
/// │   │   │   └── ul.sb__panel
/// │   │   ├── a.sb__btn[data-target=#reports-menu] > span.label
/// │   │   ├── ul.sb__panel#reports-menu
/// │   │   └── a.sb__btn[data-target=#missing-menu]
/// │   ├── nav.sb-group#primary-group           (grouped menus)
/// │   │   ├── button[data-sb-toggle=#settings-menu]
/// │   │   ├── ul#settings-menu
/// │   │   ├── button[data-sb-toggle=#accounts-menu]
/// │   │   ├── ul#accounts-menu
/// │   │   │   ├── button[data-sb-toggle=#team-menu]
/// │   │   │   └── ul#team-menu
/// │   │   ├── button[data-sb-toggle=#ghost-menu]
/// │   │   └── div.sb-group#inner-group
/// │   │       ├── button[data-sb-toggle=#inner-menu]
/// │   │       └── ul#inner-menu
/// │   ├── nav.sb-group#secondary-group
/// │   │   ├── button[data-sb-toggle=#help-menu]
/// │   │   └── ul#help-menu
/// │   └── button[aria-expanded] "Merchants" + ul#merchant-menu
/// └── main > p
/// ```
#[derive(Debug, Clone)]
pub struct Sidebar {
    /// The document itself.
    pub document: MemoryDocument,
    /// `<body>`.
    pub body: NodeId,
    /// Sidebar collapse button.
    pub collapse_button: NodeId,
    /// Icon inside the collapse button.
    pub collapse_icon: NodeId,
    /// Ungrouped nested button resolving its panel by sibling.
    pub payments_button: NodeId,
    /// Panel of [`Self::payments_button`].
    pub payments_panel: NodeId,
    /// Nested button inside the payments panel.
    pub payouts_button: NodeId,
    /// Panel of [`Self::payouts_button`].
    pub payouts_panel: NodeId,
    /// Ungrouped nested button resolving its panel by `data-target`.
    pub reports_button: NodeId,
    /// Label span inside the reports button.
    pub reports_label: NodeId,
    /// Panel of [`Self::reports_button`].
    pub reports_panel: NodeId,
    /// Ungrouped nested button whose target does not exist.
    pub broken_button: NodeId,
    /// Primary group container.
    pub primary_group: NodeId,
    /// Grouped toggle for settings.
    pub settings_toggle: NodeId,
    /// Settings panel.
    pub settings_panel: NodeId,
    /// Grouped toggle for accounts.
    pub accounts_toggle: NodeId,
    /// Accounts panel.
    pub accounts_panel: NodeId,
    /// Grouped toggle nested inside the accounts panel.
    pub team_toggle: NodeId,
    /// Team panel.
    pub team_panel: NodeId,
    /// Grouped toggle whose panel does not exist.
    pub ghost_toggle: NodeId,
    /// Nested group container inside the primary group.
    pub inner_group: NodeId,
    /// Toggle belonging to the inner group.
    pub inner_toggle: NodeId,
    /// Inner group panel.
    pub inner_panel: NodeId,
    /// Secondary group toggle.
    pub help_toggle: NodeId,
    /// Secondary group panel.
    pub help_panel: NodeId,
    /// Button driven by the inline simple toggle.
    pub merchants_button: NodeId,
    /// Panel of [`Self::merchants_button`], id `merchant-menu`.
    pub merchants_panel: NodeId,
    /// Paragraph in the main content area, outside every control.
    pub content: NodeId,
}

impl Sidebar {
    /// Build the fixture with every panel closed and every toggle collapsed.
    #[must_use]
    pub fn build() -> Self {
        let mut document = MemoryDocument::new();
        let html = document.append(document.root(), ElementSpec::new("html"));
        let body = document.append(html, ElementSpec::new("body"));
        let aside = document.append(body, ElementSpec::new("aside").class("sidebar"));

        let collapse_button = document.append(
            aside,
            ElementSpec::new("button")
                .class("sb-collapse")
                .attr("data-sb-collapse", ""),
        );
        let collapse_icon = document.append(collapse_button, ElementSpec::new("span").class("icon"));

        let nav = document.append(aside, ElementSpec::new("nav").class("sb"));
        let payments_button = document.append(nav, nested_button());
        let payments_panel = document.append(nav, panel());
        let payouts_button = document.append(payments_panel, nested_button());
        let payouts_panel = document.append(payments_panel, panel());
        let reports_button = document.append(nav, nested_button().attr("data-target", "#reports-menu"));
        let reports_label = document.append(reports_button, ElementSpec::new("span").class("label"));
        let reports_panel = document.append(nav, panel().id("reports-menu"));
        let broken_button = document.append(nav, nested_button().attr("data-target", "#missing-menu"));

        let primary_group = document.append(
            aside,
            ElementSpec::new("nav").class("sb-group").id("primary-group"),
        );
        let settings_toggle = document.append(primary_group, group_toggle("#settings-menu"));
        let settings_panel = document.append(primary_group, panel().id("settings-menu"));
        let accounts_toggle = document.append(primary_group, group_toggle("#accounts-menu"));
        let accounts_panel = document.append(primary_group, panel().id("accounts-menu"));
        let team_toggle = document.append(accounts_panel, group_toggle("#team-menu"));
        let team_panel = document.append(accounts_panel, panel().id("team-menu"));
        let ghost_toggle = document.append(primary_group, group_toggle("#ghost-menu"));
        let inner_group = document.append(
            primary_group,
            ElementSpec::new("div").class("sb-group").id("inner-group"),
        );
        let inner_toggle = document.append(inner_group, group_toggle("#inner-menu"));
        let inner_panel = document.append(inner_group, panel().id("inner-menu"));

        let secondary_group = document.append(
            aside,
            ElementSpec::new("nav").class("sb-group").id("secondary-group"),
        );
        let help_toggle = document.append(secondary_group, group_toggle("#help-menu"));
        let help_panel = document.append(secondary_group, panel().id("help-menu"));

        let merchants_button = document.append(
            aside,
            ElementSpec::new("button")
                .class("menu-toggle")
                .attr(ARIA_EXPANDED, "false"),
        );
        let merchants_panel = document.append(
            aside,
            ElementSpec::new("ul").class("submenu").id("merchant-menu"),
        );

        let main = document.append(body, ElementSpec::new("main"));
        let content = document.append(main, ElementSpec::new("p").class("lead"));

        Self {
            document,
            body,
            collapse_button,
            collapse_icon,
            payments_button,
            payments_panel,
            payouts_button,
            payouts_panel,
            reports_button,
            reports_label,
            reports_panel,
            broken_button,
            primary_group,
            settings_toggle,
            settings_panel,
            accounts_toggle,
            accounts_panel,
            team_toggle,
            team_panel,
            ghost_toggle,
            inner_group,
            inner_toggle,
            inner_panel,
            help_toggle,
            help_panel,
            merchants_button,
            merchants_panel,
            content,
        }
    }
}

fn nested_button() -> ElementSpec {
    ElementSpec::new("a")
        .class("sb__btn")
        .attr("href", "#")
        .attr(ARIA_EXPANDED, "false")
}

fn group_toggle(target: &str) -> ElementSpec {
    ElementSpec::new("button")
        .class("sb__toggle")
        .attr("data-sb-toggle", target)
        .attr(ARIA_EXPANDED, "false")
}

fn panel() -> ElementSpec {
    ElementSpec::new("ul").class("sb__panel")
}

#[cfg(test)]
mod tests {
    use super::*;
    use zpay_menu::MenuDom;

    #[test]
    fn fixture_starts_fully_closed() {
        let sidebar = Sidebar::build();
        let doc = &sidebar.document;
        assert!(doc.query_selector(".open").is_none());
        assert!(doc.query_selector(".show").is_none());
        assert!(doc.query_selector("[aria-expanded=true]").is_none());
        assert_eq!(doc.body(), Some(sidebar.body));
    }

    #[test]
    fn fixture_wires_nested_panels_by_sibling() {
        let sidebar = Sidebar::build();
        let doc = &sidebar.document;
        assert_eq!(
            doc.next_element_sibling(&sidebar.payments_button),
            Some(sidebar.payments_panel)
        );
        assert_eq!(
            doc.next_element_sibling(&sidebar.payouts_button),
            Some(sidebar.payouts_panel)
        );
        assert_eq!(doc.element_by_id("reports-menu"), Some(sidebar.reports_panel));
    }
}
