//! Pagination cursor arithmetic
//!
//! The cursor (page, page size) is owned by the caller; this module only
//! derives view state from it and produces new cursors for the navigation
//! operations. Nothing here performs I/O - the resulting cursor is handed
//! back to the external fetch collaborator.

/// The externally owned (page, page_size) pair. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page: usize,
    pub page_size: usize,
}

impl PageCursor {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Fresh cursor on the first page.
    pub fn first_page(page_size: usize) -> Self {
        Self::new(1, page_size)
    }

    /// Density changes always reset to the first page.
    pub fn with_page_size(self, page_size: usize) -> Self {
        Self::new(1, page_size)
    }
}

/// Cursor plus everything derived from it for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView {
    pub cursor: PageCursor,
    pub page_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
    /// 1-based absolute offset of the first row on this page, for
    /// offset-based backends.
    pub first_row: usize,
}

impl PageView {
    /// Derive the full view state for a cursor against a total count.
    /// An empty result set still reports one page, never "page 1 of 0".
    pub fn derive(cursor: PageCursor, total_count: usize) -> Self {
        let page_size = cursor.page_size.max(1);
        let page_count = (total_count.div_ceil(page_size)).max(1);

        Self {
            cursor,
            page_count,
            can_previous: cursor.page > 1,
            can_next: cursor.page < page_count,
            first_row: (cursor.page - 1) * page_size + 1,
        }
    }

    pub fn first(&self) -> PageCursor {
        PageCursor {
            page: 1,
            ..self.cursor
        }
    }

    pub fn previous(&self) -> PageCursor {
        PageCursor {
            page: self.cursor.page.saturating_sub(1).max(1),
            ..self.cursor
        }
    }

    pub fn next(&self) -> PageCursor {
        PageCursor {
            page: (self.cursor.page + 1).min(self.page_count),
            ..self.cursor
        }
    }

    pub fn last(&self) -> PageCursor {
        PageCursor {
            page: self.page_count,
            ..self.cursor
        }
    }

    pub fn with_page_size(&self, page_size: usize) -> PageCursor {
        self.cursor.with_page_size(page_size)
    }
}
