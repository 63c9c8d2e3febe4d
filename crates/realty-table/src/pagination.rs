// Visible page window for pagination controls

use serde::Serialize;

/// Pages are listed in full up to this many
const MAX_FULL_PAGES: u32 = 7;

/// One slot in the pagination control
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Compute visible page slots.
///
/// Up to 7 pages are listed in full. Beyond that the first and last pages are
/// always shown, with at most one ellipsis on each side of the current page.
pub fn page_window(current_page: u32, last_page: u32) -> Vec<PageItem> {
    if last_page == 0 {
        return vec![];
    }

    let current = current_page.clamp(1, last_page);

    if last_page <= MAX_FULL_PAGES {
        return (1..=last_page).map(PageItem::Page).collect();
    }

    let mut pages = Vec::with_capacity(MAX_FULL_PAGES as usize);

    if current <= 3 {
        pages.extend((1..=5).map(PageItem::Page));
        pages.push(PageItem::Ellipsis);
        pages.push(PageItem::Page(last_page));
    } else if current >= last_page - 2 {
        pages.push(PageItem::Page(1));
        pages.push(PageItem::Ellipsis);
        pages.extend((last_page - 4..=last_page).map(PageItem::Page));
    } else {
        pages.push(PageItem::Page(1));
        pages.push(PageItem::Ellipsis);
        pages.extend((current - 1..=current + 1).map(PageItem::Page));
        pages.push(PageItem::Ellipsis);
        pages.push(PageItem::Page(last_page));
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Ellipsis, Page};
    use super::*;

    #[test]
    fn test_middle_window() {
        assert_eq!(
            page_window(7, 12),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Ellipsis, Page(12)]
        );
    }

    #[test]
    fn test_small_totals_list_everything() {
        assert_eq!(page_window(1, 1), vec![Page(1)]);
        assert_eq!(page_window(4, 7).len(), 7);
        assert!(!page_window(4, 7).contains(&Ellipsis));
    }

    #[test]
    fn test_window_near_edges() {
        assert_eq!(
            page_window(2, 20),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(20)]
        );
        assert_eq!(
            page_window(19, 20),
            vec![Page(1), Ellipsis, Page(16), Page(17), Page(18), Page(19), Page(20)]
        );
    }

    #[test]
    fn test_boundary_transitions() {
        assert_eq!(page_window(3, 8)[5], Ellipsis);
        assert_eq!(
            page_window(4, 9),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Ellipsis, Page(9)]
        );
        assert_eq!(
            page_window(6, 8),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Page(7), Page(8)]
        );
    }

    #[test]
    fn test_out_of_range_current_is_clamped() {
        assert_eq!(page_window(0, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_window(50, 10)[6], Page(10));
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&vec![Page(1), Ellipsis]).unwrap();
        assert_eq!(json, r#"[{"page":1},"ellipsis"]"#);
    }
}
