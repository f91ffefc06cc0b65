use crate::types::page::{NavAction, Page};
use std::fmt::Write;

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn layout(page: Page, body: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title></head>\
         <body><h1>{title}</h1>{body}</body></html>",
        title = escape(page.title()),
    )
}

/// A one-button form that posts `action` to /navigate.
pub fn nav_button(from: Page, action: NavAction, label: &str) -> String {
    let action = match action {
        NavAction::OpenProducts => "open_products",
        NavAction::OpenCustomers => "open_customers",
        NavAction::OpenOrders => "open_orders",
        NavAction::BackToHome => "back_to_home",
    };
    format!(
        "<form method=\"post\" action=\"/navigate\">\
         <input type=\"hidden\" name=\"from\" value=\"{from}\">\
         <button name=\"action\" value=\"{action}\">{label}</button></form>",
        from = from.path(),
        label = escape(label),
    )
}

pub fn banners(notice: Option<&str>, error: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(n) = notice {
        let _ = write!(out, "<p class=\"notice\">{}</p>", escape(n));
    }
    if let Some(e) = error {
        let _ = write!(out, "<p class=\"error\">{}</p>", escape(e));
    }
    out
}

pub fn list<I>(heading: &str, items: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = format!("<h2>{}</h2><ul>", escape(heading));
    for item in items {
        let _ = write!(out, "<li>{}</li>", escape(&item));
    }
    out.push_str("</ul>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn list_escapes_items() {
        let html = list("Products", vec!["<script>".to_string()]);
        assert!(html.contains("<li>&lt;script&gt;</li>"));
    }
}
