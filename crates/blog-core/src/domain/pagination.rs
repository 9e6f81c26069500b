//! Page selection for post listings.
//!
//! The requested page comes straight from the query string. A missing or
//! non-integer value selects the first page, an integer outside
//! `1..=num_pages` selects the last page. Neither case is an error.

use std::num::IntErrorKind;

use serde::Serialize;

/// Number of posts shown on one list page.
pub const POSTS_PER_PAGE: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Requested {
    First,
    Number(i64),
    /// An integer too large in either direction to hold.
    Overflow,
}

/// A page request as received from the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    requested: Requested,
    per_page: u64,
}

impl PageRequest {
    /// Interpret a raw `page` query value.
    pub fn parse(raw: Option<&str>, per_page: u64) -> Self {
        let requested = match raw.map(|s| s.trim().parse::<i64>()) {
            Some(Ok(n)) => Requested::Number(n),
            Some(Err(e))
                if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) =>
            {
                Requested::Overflow
            }
            Some(Err(_)) | None => Requested::First,
        };
        Self {
            requested,
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Number of pages needed for `total_items`. An empty listing still has one page.
    pub fn num_pages(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.per_page).max(1)
    }

    /// 1-based page number actually served when the listing has `num_pages` pages.
    pub fn resolve(&self, num_pages: u64) -> u64 {
        let last = num_pages.max(1);
        match self.requested {
            Requested::First => 1,
            Requested::Number(n) if n >= 1 && (n as u64) <= last => n as u64,
            Requested::Number(_) | Requested::Overflow => last,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub number: u64,
    pub num_pages: u64,
    pub total_items: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    /// Cut the requested page out of an already ordered, complete listing.
    pub fn from_items(items: Vec<T>, request: &PageRequest) -> Self {
        let total_items = items.len() as u64;
        let num_pages = request.num_pages(total_items);
        let number = request.resolve(num_pages);
        let offset = ((number - 1) * request.per_page()) as usize;

        let items = items
            .into_iter()
            .skip(offset)
            .take(request.per_page() as usize)
            .collect();

        Self {
            items,
            number,
            num_pages,
            total_items,
            per_page: request.per_page(),
        }
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Transform the items, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            total_items: self.total_items,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(raw: Option<&str>, total: u64) -> Page<u64> {
        let request = PageRequest::parse(raw, POSTS_PER_PAGE);
        Page::from_items((1..=total).collect(), &request)
    }

    #[test]
    fn missing_page_is_first() {
        let p = page(None, 7);
        assert_eq!(p.number, 1);
        assert_eq!(p.items, vec![1, 2, 3]);
        assert_eq!(p.num_pages, 3);
        assert!(p.has_next());
        assert!(!p.has_previous());
    }

    #[test]
    fn non_integer_page_is_first() {
        assert_eq!(page(Some("abc"), 7), page(Some("1"), 7));
        assert_eq!(page(Some("2.0"), 7).number, 1);
        assert_eq!(page(Some(""), 7).number, 1);
    }

    #[test]
    fn out_of_range_page_is_last() {
        let last = page(Some("99"), 7);
        assert_eq!(last, page(Some("3"), 7));
        assert_eq!(last.items, vec![7]);
        assert!(!last.has_next());
        assert!(last.has_previous());

        assert_eq!(page(Some("0"), 7).number, 3);
        assert_eq!(page(Some("-4"), 7).number, 3);
    }

    #[test]
    fn overflowing_page_is_last() {
        assert_eq!(page(Some("99999999999999999999"), 7).number, 3);
        assert_eq!(page(Some("-99999999999999999999"), 7).number, 3);
        assert_eq!(page(Some("99999999999999999999x"), 7).number, 1);
    }

    #[test]
    fn middle_page() {
        let p = page(Some(" 2 "), 7);
        assert_eq!(p.items, vec![4, 5, 6]);
    }

    #[test]
    fn empty_listing_has_one_empty_page() {
        let p = page(Some("5"), 0);
        assert_eq!(p.number, 1);
        assert_eq!(p.num_pages, 1);
        assert!(p.items.is_empty());
    }

    #[test]
    fn map_keeps_metadata() {
        let p = page(Some("2"), 7).map(|n| n * 10);
        assert_eq!(p.items, vec![40, 50, 60]);
        assert_eq!(p.number, 2);
        assert_eq!(p.total_items, 7);
    }
}
