//! Main navigation menu and its permission filter.

use crate::i18n::{self, Locale};
use crate::router::Access;

/// One menu entry. Groups have `items` and no route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label_key: &'static str,
    pub icon: Option<&'static str>,
    pub route: Option<&'static str>,
    pub items: Vec<MenuItem>,
}

impl MenuItem {
    fn link(label_key: &'static str, route: &'static str) -> Self {
        Self { label_key, icon: None, route: Some(route), items: Vec::new() }
    }

    fn with_icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    fn group(label_key: &'static str, icon: &'static str, items: Vec<Self>) -> Self {
        Self { label_key, icon: Some(icon), route: None, items }
    }

    /// Translated label.
    #[must_use]
    pub fn label(&self, locale: Locale) -> String {
        i18n::t(locale, self.label_key)
    }
}

#[must_use]
pub fn main_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::group(
            "navigation.organizations",
            "pi pi-building",
            vec![
                MenuItem::link("navigation.companies", "/companies"),
                MenuItem::link("navigation.branches", "/branches"),
                MenuItem::link("navigation.departments", "/departments"),
                MenuItem::link("navigation.divisions", "/divisions"),
                MenuItem::link("navigation.salesOrganizations", "/sales-organizations"),
            ],
        ),
        MenuItem::link("navigation.customers", "/customers").with_icon("pi pi-users"),
        MenuItem::link("navigation.users", "/users").with_icon("pi pi-user"),
        MenuItem::group(
            "navigation.accessControls",
            "pi pi-lock",
            vec![
                MenuItem::link("navigation.roles", "/roles"),
                MenuItem::link("navigation.permissions", "/permissions"),
            ],
        ),
        MenuItem::link("navigation.superset", "/superset").with_icon("pi pi-chart-line"),
    ]
}

/// The main menu restricted to routes `access` can read. Groups with no
/// readable children are dropped.
#[must_use]
pub fn visible_menu(access: &Access<'_>) -> Vec<MenuItem> {
    filter(main_menu(), access)
}

fn filter(items: Vec<MenuItem>, access: &Access<'_>) -> Vec<MenuItem> {
    items
        .into_iter()
        .filter_map(|mut item| match item.route {
            Some(route) => access.can_access_route(route).then_some(item),
            None => {
                item.items = filter(std::mem::take(&mut item.items), access);
                (!item.items.is_empty()).then_some(item)
            }
        })
        .collect()
}
