//! Terminal rendering for command results

use console::style;
use realty_client::{
    Notifier, Pagination,
    model::{Category, CategoryNode, DashboardStats, Listing, Review, Slider, User},
};
use realty_table::PageItem;
use tabled::{builder::Builder, settings::Style};

/// Prints toasts to stderr
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify_error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red().bold(), message);
    }

    fn notify_success(&self, message: &str) {
        eprintln!("{} {}", style("✓").green().bold(), message);
    }
}

/// A resource that can be shown as one table row
pub trait DisplayRow {
    fn headers() -> &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn yes_no(value: Option<bool>) -> String {
    match value {
        Some(true) => "yes".to_string(),
        Some(false) => "no".to_string(),
        None => String::new(),
    }
}

impl DisplayRow for Listing {
    fn headers() -> &'static [&'static str] {
        &["ID", "Title", "Status", "Price", "Category", "Order", "Created"]
    }

    fn cells(&self) -> Vec<String> {
        let price = match (self.price, &self.currency) {
            (Some(price), Some(currency)) => format!("{:.2} {}", price, currency),
            (Some(price), None) => format!("{:.2}", price),
            _ => String::new(),
        };
        vec![
            self.id.to_string(),
            self.title.clone(),
            opt(&self.status),
            price,
            opt(&self.category_id),
            opt(&self.sort_order),
            self.created_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ]
    }
}

impl DisplayRow for Category {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Slug", "Parent", "Order"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            opt(&self.slug),
            opt(&self.parent_id),
            opt(&self.sort_order),
        ]
    }
}

impl DisplayRow for User {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Email", "Role", "Active"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            opt(&self.role),
            yes_no(self.is_active),
        ]
    }
}

impl DisplayRow for Slider {
    fn headers() -> &'static [&'static str] {
        &["ID", "Title", "Active", "Order", "Link"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            yes_no(self.is_active),
            opt(&self.sort_order),
            opt(&self.link),
        ]
    }
}

impl DisplayRow for Review {
    fn headers() -> &'static [&'static str] {
        &["ID", "Listing", "User", "Rating", "Approved", "Comment"]
    }

    fn cells(&self) -> Vec<String> {
        let comment = self
            .comment
            .as_deref()
            .map(|c| truncate(c, 40))
            .unwrap_or_default();
        vec![
            self.id.to_string(),
            opt(&self.listing_id),
            opt(&self.user_id),
            opt(&self.rating),
            yes_no(self.is_approved),
            comment,
        ]
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut)
}

pub fn render_table<R: DisplayRow>(rows: &[R]) -> String {
    if rows.is_empty() {
        return "No results.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(R::headers().iter().copied());
    for row in rows {
        builder.push_record(row.cells());
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Footer line, e.g. `Page 7 of 12 (120 total)  1 … 6 [7] 8 … 12`
pub fn render_pages(meta: &Pagination, pages: &[PageItem]) -> String {
    let window = pages
        .iter()
        .map(|item| match item {
            PageItem::Page(page) if *page == meta.current_page => format!("[{}]", page),
            PageItem::Page(page) => page.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "Page {} of {} ({} total)  {}",
        meta.current_page, meta.last_page, meta.total, window
    )
}

pub fn render_tree(nodes: &[CategoryNode]) -> String {
    let mut output = String::new();
    for node in nodes {
        for (depth, category) in node.flatten() {
            output.push_str(&"  ".repeat(depth));
            output.push_str(&format!(
                "{} {}\n",
                category.name,
                style(format!("#{}", category.id)).dim()
            ));
        }
    }
    output
}

pub fn render_dashboard(stats: &DashboardStats) -> String {
    let counts = &stats.counts;
    let mut builder = Builder::default();
    builder.push_record(["Metric", "Count"]);
    for (label, value) in [
        ("Listings", counts.listings),
        ("Published listings", counts.listings_published),
        ("Draft listings", counts.listings_draft),
        ("Users", counts.users),
        ("Categories", counts.categories),
        ("Reviews", counts.reviews),
        ("Sliders", counts.sliders),
    ] {
        builder.push_record([label.to_string(), value.to_string()]);
    }
    builder.build().with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use realty_client::model::build_category_tree;
    use serde_json::json;

    #[test]
    fn test_render_table() {
        let sliders: Vec<Slider> = serde_json::from_value(json!([
            {"id": 1, "title": "Summer sale", "is_active": true, "sort_order": 2}
        ]))
        .unwrap();

        let output = render_table(&sliders);
        assert!(output.contains("Summer sale"));
        assert!(output.contains("Active"));
        assert!(output.contains("yes"));

        assert_eq!(render_table::<Slider>(&[]), "No results.");
    }

    #[test]
    fn test_render_pages_marks_current() {
        let meta = Pagination {
            current_page: 7,
            last_page: 12,
            total: 120,
            ..Default::default()
        };
        let pages = realty_table::page_window(7, 12);
        assert_eq!(
            render_pages(&meta, &pages),
            "Page 7 of 12 (120 total)  1 … 6 [7] 8 … 12"
        );
    }

    #[test]
    fn test_render_tree_indents_children() {
        console::set_colors_enabled(false);
        let categories: Vec<Category> = serde_json::from_value(json!([
            {"id": 1, "name": "Residential"},
            {"id": 2, "name": "Apartments", "parent_id": 1}
        ]))
        .unwrap();

        let output = render_tree(&build_category_tree(categories));
        assert_eq!(output, "Residential #1\n  Apartments #2\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long comment", 6), "a lon…");
    }
}
