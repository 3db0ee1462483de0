//! Generic filter / sort / paginate over in-memory record collections.
//!
//! The processor knows nothing about record shapes. Callers describe a view
//! with a [`TableQuery`]: a conjunction of predicates plus at most one
//! comparator. [`process`] applies it to a slice and returns one page of
//! borrowed items together with the totals a pager needs.

use std::cmp::Ordering;
use std::ops::RangeInclusive;

use crate::domain::error::MockstreetError;

pub type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;
pub type Comparator<'a, T> = Box<dyn Fn(&T, &T) -> Ordering + 'a>;

pub const DEFAULT_PAGE_SIZE: usize = 10;

pub struct TableQuery<'a, T> {
    predicates: Vec<Predicate<'a, T>>,
    comparator: Option<Comparator<'a, T>>,
}

impl<'a, T> TableQuery<'a, T> {
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
            comparator: None,
        }
    }

    /// Add a predicate; a record must satisfy all of them.
    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Set the ordering. Replaces any earlier comparator.
    pub fn sort_by(mut self, comparator: impl Fn(&T, &T) -> Ordering + 'a) -> Self {
        self.comparator = Some(Box::new(comparator));
        self
    }

    pub fn matches(&self, record: &T) -> bool {
        self.predicates.iter().all(|p| p(record))
    }

    /// Filter then stable-sort, without paginating.
    pub fn apply<'r>(&self, records: &'r [T]) -> Vec<&'r T> {
        let mut selected: Vec<&'r T> = records.iter().filter(|r| self.matches(r)).collect();
        if let Some(cmp) = &self.comparator {
            selected.sort_by(|a, b| cmp(*a, *b));
        }
        selected
    }
}

impl<T> Default for TableQuery<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One page of a processed collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'r, T> {
    pub items: Vec<&'r T>,
    /// 1-based page number that was requested.
    pub page: usize,
    pub page_size: usize,
    /// Number of records that passed the filters, across all pages.
    pub total_count: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based index of the first item shown, 0 when the page is empty.
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last item shown, 0 when the page is empty.
    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_index() + self.items.len() - 1
        }
    }
}

/// `ceil(total_count / page_size)`, never less than one page.
///
/// An empty result is reported as "page 1 of 1" so pagers always have a
/// page to show.
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_count.div_ceil(page_size).max(1)
}

/// Filter, stable-sort and paginate `records`.
///
/// `page` is 1-based. Page 0 or a page past the end yields no items but
/// still reports the totals. Fails only when `page_size` is zero.
pub fn process<'r, T>(
    records: &'r [T],
    query: &TableQuery<'_, T>,
    page: usize,
    page_size: usize,
) -> Result<Page<'r, T>, MockstreetError> {
    if page_size == 0 {
        return Err(MockstreetError::invalid_argument(
            "page_size must be positive",
        ));
    }

    let selected = query.apply(records);
    let total_count = selected.len();

    let items = match page.checked_sub(1).and_then(|p| p.checked_mul(page_size)) {
        Some(start) if start < total_count => {
            let end = start.saturating_add(page_size).min(total_count);
            selected[start..end].to_vec()
        }
        _ => Vec::new(),
    };

    Ok(Page {
        items,
        page,
        page_size,
        total_count,
        total_pages: total_pages(total_count, page_size),
    })
}

/// Page numbers for a pager showing at most `width` buttons, centred on
/// `current` where possible.
pub fn page_window(current: usize, total_pages: usize, width: usize) -> RangeInclusive<usize> {
    let total_pages = total_pages.max(1);
    let width = width.clamp(1, total_pages);
    let last_start = total_pages - width + 1;
    let start = current.saturating_sub(width / 2).clamp(1, last_start);
    start..=start + width - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        group: char,
        value: i32,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, group: 'a', value: 5 },
            Row { id: 2, group: 'b', value: 3 },
            Row { id: 3, group: 'a', value: 5 },
            Row { id: 4, group: 'b', value: 9 },
            Row { id: 5, group: 'a', value: 1 },
        ]
    }

    fn ids(page: &Page<'_, Row>) -> Vec<u32> {
        page.items.iter().map(|r| r.id).collect()
    }

    #[test]
    fn empty_query_keeps_input_order() {
        let data = rows();
        let page = process(&data, &TableQuery::new(), 1, 10).unwrap();
        assert_eq!(ids(&page), vec![1, 2, 3, 4, 5]);
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn predicates_are_conjunctive() {
        let data = rows();
        let query = TableQuery::new()
            .filter(|r: &Row| r.group == 'a')
            .filter(|r: &Row| r.value >= 5);
        let page = process(&data, &query, 1, 10).unwrap();
        assert_eq!(ids(&page), vec![1, 3]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let data = rows();
        let query = TableQuery::new().sort_by(|a: &Row, b: &Row| b.value.cmp(&a.value));
        let page = process(&data, &query, 1, 10).unwrap();
        // ids 1 and 3 share value 5 and keep their input order.
        assert_eq!(ids(&page), vec![4, 1, 3, 2, 5]);
    }

    #[test]
    fn later_sort_replaces_earlier() {
        let data = rows();
        let query = TableQuery::new()
            .sort_by(|a: &Row, b: &Row| b.id.cmp(&a.id))
            .sort_by(|a: &Row, b: &Row| a.value.cmp(&b.value));
        let page = process(&data, &query, 1, 10).unwrap();
        assert_eq!(ids(&page), vec![5, 2, 1, 3, 4]);
    }

    #[test]
    fn paginates_by_page_size() {
        let data = rows();
        let query = TableQuery::new();
        let first = process(&data, &query, 1, 2).unwrap();
        let second = process(&data, &query, 2, 2).unwrap();
        let third = process(&data, &query, 3, 2).unwrap();
        assert_eq!(ids(&first), vec![1, 2]);
        assert_eq!(ids(&second), vec![3, 4]);
        assert_eq!(ids(&third), vec![5]);
        assert_eq!(third.total_pages, 3);
        assert_eq!(third.first_index(), 5);
        assert_eq!(third.last_index(), 5);
    }

    #[test]
    fn page_past_end_is_empty_with_totals() {
        let data = rows();
        let page = process(&data, &TableQuery::new(), 4, 2).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.first_index(), 0);
    }

    #[test]
    fn page_zero_is_empty() {
        let data = rows();
        let page = process(&data, &TableQuery::new(), 0, 2).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_count, 5);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let data = rows();
        let page = process(&data, &TableQuery::new(), usize::MAX, usize::MAX).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn empty_input_reports_one_page() {
        let data: Vec<Row> = Vec::new();
        let page = process(&data, &TableQuery::new(), 1, 10).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn zero_page_size_is_invalid() {
        let data = rows();
        let err = process(&data, &TableQuery::new(), 1, 0).unwrap_err();
        assert!(matches!(err, MockstreetError::InvalidArgument { .. }));
    }

    #[test]
    fn input_is_untouched() {
        let data = rows();
        let before = data.clone();
        let query = TableQuery::new().sort_by(|a: &Row, b: &Row| b.id.cmp(&a.id));
        let _ = process(&data, &query, 1, 2).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn has_next_and_previous() {
        let data = rows();
        let page = process(&data, &TableQuery::new(), 2, 2).unwrap();
        assert!(page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(12, 5), 3);
    }

    #[test]
    fn page_window_centres_on_current() {
        assert_eq!(page_window(1, 10, 5), 1..=5);
        assert_eq!(page_window(5, 10, 5), 3..=7);
        assert_eq!(page_window(10, 10, 5), 6..=10);
        assert_eq!(page_window(9, 10, 5), 6..=10);
    }

    #[test]
    fn page_window_narrower_than_width() {
        assert_eq!(page_window(1, 2, 5), 1..=2);
        assert_eq!(page_window(1, 0, 5), 1..=1);
    }
}
