//! Previous/next navigation links for the entry listing.

use serde::{Deserialize, Serialize};

/// Page size the listing uses when the client does not pass `limit`.
/// Links only carry `&limit=` when the page size differs from this.
pub const DEFAULT_PAGE_SIZE: i64 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLinks {
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl EntryLinks {
    pub fn for_page(current: i64, total_pages: i64, page_size: i64) -> Self {
        if total_pages <= 0 {
            return Self::default();
        }

        let next = (current.saturating_add(1) <= total_pages)
            .then(|| page_link(current + 1, page_size));
        let previous = (current.saturating_sub(1) >= 1).then(|| page_link(current - 1, page_size));

        Self { next, previous }
    }
}

fn page_link(page: i64, page_size: i64) -> String {
    let mut link = format!("/entries?page={}", page);
    if page_size != DEFAULT_PAGE_SIZE {
        link.push_str(&format!("&limit={}", page_size));
    }
    link
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page_has_no_links() {
        assert_eq!(EntryLinks::for_page(1, 1, 3), EntryLinks::default());
    }

    #[test]
    fn empty_listing_has_no_links() {
        assert_eq!(EntryLinks::for_page(1, 0, 3), EntryLinks::default());
        assert_eq!(EntryLinks::for_page(4, 0, 10), EntryLinks::default());
    }

    #[test]
    fn middle_page_links_carry_custom_limit() {
        let links = EntryLinks::for_page(2, 3, 2);
        assert_eq!(links.next.as_deref(), Some("/entries?page=3&limit=2"));
        assert_eq!(links.previous.as_deref(), Some("/entries?page=1&limit=2"));
    }

    #[test]
    fn default_limit_is_omitted() {
        let links = EntryLinks::for_page(1, 2, DEFAULT_PAGE_SIZE);
        assert_eq!(links.next.as_deref(), Some("/entries?page=2"));
        assert_eq!(links.previous, None);
    }

    #[test]
    fn past_the_end_only_links_back() {
        // Page 7 of 2 still points at page 6; the caller just gets an empty page.
        let links = EntryLinks::for_page(7, 2, 3);
        assert_eq!(links.next, None);
        assert_eq!(links.previous.as_deref(), Some("/entries?page=6"));
    }
}
