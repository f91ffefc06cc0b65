//! Navigation between the four screens of the web UI.
//!
//! The screen a user sees is a `Page`; buttons emit a `NavAction`. Only the
//! presentation layer reads or changes navigation state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Products,
    Customers,
    Orders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavAction {
    OpenProducts,
    OpenCustomers,
    OpenOrders,
    BackToHome,
}

impl Page {
    /// Every action is valid from every page.
    pub fn apply(self, action: NavAction) -> Page {
        match action {
            NavAction::OpenProducts => Page::Products,
            NavAction::OpenCustomers => Page::Customers,
            NavAction::OpenOrders => Page::Orders,
            NavAction::BackToHome => Page::Home,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Products => "/products",
            Page::Customers => "/customers",
            Page::Orders => "/orders",
        }
    }

    pub fn from_path(path: &str) -> Option<Page> {
        match path.trim_end_matches('/') {
            "" => Some(Page::Home),
            "/products" => Some(Page::Products),
            "/customers" => Some(Page::Customers),
            "/orders" => Some(Page::Orders),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "E-Store Management System",
            Page::Products => "Products - E-Store",
            Page::Customers => "Customers - E-Store",
            Page::Orders => "Orders - E-Store",
        }
    }
}
