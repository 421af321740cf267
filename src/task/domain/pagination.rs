//! Page requests and paginated query results.

use serde::Serialize;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Default page size used when the caller does not provide one.
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Largest page size a caller may request.
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Creates a page request.
    ///
    /// `page` is clamped to at least 1 and `page_size` into
    /// `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, Self::MAX_PAGE_SIZE),
        }
    }

    /// Returns the requested 1-based page.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the requested page size.
    #[must_use]
    pub const fn page_size(self) -> u32 {
        self.page_size
    }

    /// Returns the number of records preceding the requested page.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PAGE_SIZE)
    }
}

/// One page of query results together with navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedResult<T> {
    items: Vec<T>,
    total_count: u64,
    page: u32,
    page_size: u32,
}

impl<T> PaginatedResult<T> {
    /// Creates a paginated result for the given request.
    #[must_use]
    pub const fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_count,
            page: request.page,
            page_size: request.page_size,
        }
    }

    /// Returns the items on this page, in store order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the result and returns the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the number of matching records across all pages.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns the requested 1-based page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the requested page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the number of pages needed to hold every record.
    ///
    /// Zero when there are no records.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(self.page_size as u64)
    }

    /// Returns whether a page follows this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        (self.page as u64) < self.total_pages()
    }

    /// Returns whether a page precedes this one.
    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    /// Returns the serialisable navigation metadata for this page.
    #[must_use]
    pub const fn navigation(&self) -> PageNavigation {
        PageNavigation {
            current_page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages(),
            has_next_page: self.has_next_page(),
            has_previous_page: self.has_previous_page(),
        }
    }
}

/// Navigation metadata derived from a [`PaginatedResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageNavigation {
    /// Requested 1-based page.
    pub current_page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Records across all pages.
    pub total_count: u64,
    /// Pages needed to hold every record.
    pub total_pages: u64,
    /// Whether a page follows this one.
    pub has_next_page: bool,
    /// Whether a page precedes this one.
    pub has_previous_page: bool,
}
