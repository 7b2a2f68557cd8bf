//! Listing state shared by the table views: search, sort, pagination, cursor
//!
//! The state only stores user intent. Each view applies it to its own
//! records through the free functions below, so the filtering rules stay
//! pure and testable without a terminal.

use chrono::{DateTime, Utc};

/// Default number of rows per page for paginated views
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort direction on a date column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

/// Per-view interaction state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    /// Search query string
    pub query: String,
    /// Whether search input mode is active
    pub search_mode: bool,
    /// Current page, 1-based
    pub page: usize,
    /// Rows per page; `None` shows everything on one page
    pub page_size: Option<usize>,
    /// Sort direction (ignored by views without a date column)
    pub sort: SortOrder,
    /// Highlighted row within the visible rows
    pub cursor: usize,
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ListingState {
    pub fn new(page_size: Option<usize>) -> Self {
        Self {
            query: String::new(),
            search_mode: false,
            page: 1,
            page_size: page_size.filter(|size| *size > 0),
            sort: SortOrder::default(),
            cursor: 0,
        }
    }

    pub fn paginated(page_size: usize) -> Self {
        Self::new(Some(page_size))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    /// Append to the query; the view returns to its first page
    pub fn search_input(&mut self, c: char) {
        self.query.push(c);
        self.page = 1;
        self.cursor = 0;
    }

    pub fn search_backspace(&mut self) {
        self.query.pop();
        self.page = 1;
        self.cursor = 0;
    }

    /// Case-insensitive substring match against any of `fields`
    pub fn matches(&self, fields: &[Option<&str>]) -> bool {
        matches_query(&self.query, fields)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sort
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.toggled();
        self.cursor = 0;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of pages for `count` rows (zero when there are no rows)
    pub fn total_pages(&self, count: usize) -> usize {
        match self.page_size {
            Some(size) => total_pages(count, size),
            None => usize::from(count > 0),
        }
    }

    /// Advance one page, never past the last
    pub fn next_page(&mut self, count: usize) {
        let last = self.total_pages(count).max(1);
        if self.page < last {
            self.page += 1;
            self.cursor = 0;
        }
    }

    /// Go back one page, never before the first
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
            self.cursor = 0;
        }
    }

    /// Rows on the current page
    pub fn page_slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        match self.page_size {
            Some(size) => page_slice(rows, self.page, size),
            None => rows,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cursor
    // ─────────────────────────────────────────────────────────────────────────

    pub fn cursor_down(&mut self, visible: usize) {
        if visible > 0 && self.cursor + 1 < visible {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Cursor clamped to the rows actually visible
    pub fn clamped_cursor(&self, visible: usize) -> Option<usize> {
        if visible == 0 {
            None
        } else {
            Some(self.cursor.min(visible - 1))
        }
    }

    /// `Page X of Y` footer text; an empty listing reports one page
    pub fn page_label(&self, count: usize) -> String {
        format!("Page {} of {}", self.page, self.total_pages(count).max(1))
    }
}

/// Case-insensitive substring match; an empty query matches everything
pub fn matches_query(query: &str, fields: &[Option<&str>]) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields
        .iter()
        .any(|field| field.unwrap_or_default().to_lowercase().contains(&needle))
}

/// `ceil(count / page_size)`
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Rows of a 1-based page; out-of-range pages are empty
pub fn page_slice<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= rows.len() {
        return &[];
    }
    let end = (start + page_size).min(rows.len());
    &rows[start..end]
}

/// Stable sort by an optional date; missing dates sort as the Unix epoch
pub fn sort_by_date<T>(rows: &mut [&T], order: SortOrder, date: impl Fn(&T) -> Option<DateTime<Utc>>) {
    let key = |row: &T| date(row).map(|d| d.timestamp_millis()).unwrap_or(0);
    match order {
        SortOrder::Asc => rows.sort_by_key(|row| key(*row)),
        SortOrder::Desc => rows.sort_by(|a, b| key(*b).cmp(&key(*a))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pagination_25_rows() {
        let rows: Vec<usize> = (0..25).collect();
        let mut state = ListingState::paginated(10);

        assert_eq!(state.total_pages(rows.len()), 3);
        assert_eq!(state.page_slice(&rows).len(), 10);

        state.next_page(rows.len());
        state.next_page(rows.len());
        assert_eq!(state.page, 3);
        assert_eq!(state.page_slice(&rows), &[20, 21, 22, 23, 24]);

        state.next_page(rows.len());
        assert_eq!(state.page, 3);
        assert_eq!(state.page_label(rows.len()), "Page 3 of 3");
    }

    #[test]
    fn test_prev_page_stops_at_first() {
        let mut state = ListingState::paginated(10);
        state.prev_page();
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_empty_listing_has_one_displayed_page() {
        let mut state = ListingState::paginated(10);
        state.next_page(0);
        assert_eq!(state.page, 1);
        assert_eq!(state.page_label(0), "Page 1 of 1");
        let empty: [u8; 0] = [];
        assert!(state.page_slice(&empty).is_empty());
    }

    #[test]
    fn test_search_resets_page() {
        let mut state = ListingState::paginated(10);
        state.next_page(30);
        assert_eq!(state.page, 2);
        state.search_input('a');
        assert_eq!(state.page, 1);
        assert_eq!(state.query, "a");
        state.search_backspace();
        assert_eq!(state.query, "");
    }

    #[test]
    fn test_matches_query_is_case_insensitive() {
        assert!(matches_query("s1", &[Some("A"), Some("S1")]));
        assert!(!matches_query("s1", &[Some("B"), Some("S2")]));
        assert!(matches_query("", &[None]));
        assert!(!matches_query("x", &[None]));
    }

    #[test]
    fn test_sort_toggle_reverses_rows() {
        let early = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).single();
        let late = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).single();
        let rows = vec![("early", early), ("late", late)];

        let mut view: Vec<&(&str, Option<DateTime<Utc>>)> = rows.iter().collect();
        sort_by_date(&mut view, SortOrder::Desc, |r| r.1);
        let desc: Vec<&str> = view.iter().map(|r| r.0).collect();
        assert_eq!(desc, vec!["late", "early"]);

        sort_by_date(&mut view, SortOrder::Desc.toggled(), |r| r.1);
        let asc: Vec<&str> = view.iter().map(|r| r.0).collect();
        assert_eq!(asc, vec!["early", "late"]);
        assert_eq!(view.len(), rows.len());
    }

    #[test]
    fn test_cursor_clamps_to_visible_rows() {
        let mut state = ListingState::default();
        state.cursor_down(2);
        state.cursor_down(2);
        assert_eq!(state.cursor, 1);
        assert_eq!(state.clamped_cursor(1), Some(0));
        assert_eq!(state.clamped_cursor(0), None);
        state.cursor_up();
        state.cursor_up();
        assert_eq!(state.cursor, 0);
    }
}
