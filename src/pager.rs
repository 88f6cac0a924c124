//! Fixed-size windows over a record set for raw-row browsing

use std::ops::Range;

/// Rows shown per window
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Cursor yielding consecutive row windows
///
/// # Examples
/// ```
/// use bikeshare::pager::RowPager;
///
/// let windows: Vec<_> = RowPager::new(12, 5).collect();
/// assert_eq!(windows, vec![0..5, 5..10, 10..12]);
/// ```
#[derive(Debug, Clone)]
pub struct RowPager {
    total: usize,
    page_size: usize,
    offset: usize,
}

impl RowPager {
    /// A page size of zero is treated as one.
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            total,
            page_size: page_size.max(1),
            offset: 0,
        }
    }

    /// Next window, or `None` once every row has been shown
    pub fn next_window(&mut self) -> Option<Range<usize>> {
        if self.is_exhausted() {
            return None;
        }
        let start = self.offset;
        let end = (start + self.page_size).min(self.total);
        self.offset = end;
        Some(start..end)
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.total
    }

    /// Index of the first row of the next window
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Iterator for RowPager {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_window()
    }
}
