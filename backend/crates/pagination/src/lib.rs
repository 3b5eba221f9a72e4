//! Page-number pagination primitives shared by listing endpoints.
//!
//! Listings accept a 1-based [`PageNumber`] and a bounded [`PageSize`],
//! combined into a [`PageRequest`] that the persistence layer turns into an
//! offset/limit pair. Results come back wrapped in a [`Page`] envelope
//! carrying the total item count so presentation code can derive page
//! counts and previous/next navigation without re-querying.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound accepted by [`PageSize::new`].
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validation failures raised by the pagination constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Page numbers are 1-based; zero never addresses a page.
    #[error("page numbers are 1-based; zero is not a valid page")]
    ZeroPageNumber,
    /// A page must hold at least one item.
    #[error("page size must be at least one item")]
    ZeroPageSize,
    /// Requested page size exceeds [`MAX_PAGE_SIZE`].
    #[error("page size must not exceed {max} items")]
    PageSizeTooLarge {
        /// The configured upper bound that was exceeded.
        max: u32,
    },
}

/// 1-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Validate and construct a page number.
    ///
    /// # Errors
    /// Returns [`PaginationError::ZeroPageNumber`] when `value` is zero.
    pub const fn new(value: u32) -> Result<Self, PaginationError> {
        if value == 0 {
            return Err(PaginationError::ZeroPageNumber);
        }
        Ok(Self(value))
    }

    /// The underlying 1-based index.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The page before this one, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self.0 {
            0 | 1 => None,
            n => Some(Self(n - 1)),
        }
    }

    /// The page after this one, unless the index space is exhausted.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }
}

impl std::fmt::Display for PageNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for PageNumber {
    type Error = PaginationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageNumber> for u32 {
    fn from(value: PageNumber) -> Self {
        value.0
    }
}

/// Number of items per page, bounded by [`MAX_PAGE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(u32);

impl PageSize {
    /// Validate and construct a page size.
    ///
    /// # Errors
    /// Returns [`PaginationError::ZeroPageSize`] for zero and
    /// [`PaginationError::PageSizeTooLarge`] above [`MAX_PAGE_SIZE`].
    pub const fn new(value: u32) -> Result<Self, PaginationError> {
        if value == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        if value > MAX_PAGE_SIZE {
            return Err(PaginationError::PageSizeTooLarge { max: MAX_PAGE_SIZE });
        }
        Ok(Self(value))
    }

    /// The underlying item count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for PageSize {
    type Error = PaginationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for u32 {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

/// A request for one slice of an ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    number: PageNumber,
    size: PageSize,
}

impl PageRequest {
    /// Combine a page number and size into a request.
    #[must_use]
    pub const fn new(number: PageNumber, size: PageSize) -> Self {
        Self { number, size }
    }

    /// The requested page number.
    #[must_use]
    pub const fn number(self) -> PageNumber {
        self.number
    }

    /// The requested page size.
    #[must_use]
    pub const fn size(self) -> PageSize {
        self.size
    }

    /// Number of items to skip before this page starts.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.number.get() - 1) * u64::from(self.size.get())
    }

    /// Maximum number of items on this page.
    #[must_use]
    pub fn limit(self) -> u64 {
        u64::from(self.size.get())
    }
}

/// One slice of an ordered collection plus the metadata needed to render
/// pagination controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    items: Vec<T>,
    number: PageNumber,
    size: PageSize,
    total_items: u64,
}

impl<T> Page<T> {
    /// Wrap a fetched slice together with the request that produced it and
    /// the total item count reported by the store.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            number: request.number(),
            size: request.size(),
            total_items,
        }
    }

    /// The items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the envelope, yielding the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The page number this slice corresponds to.
    #[must_use]
    pub const fn number(&self) -> PageNumber {
        self.number
    }

    /// The page size the slice was requested with.
    #[must_use]
    pub const fn size(&self) -> PageSize {
        self.size
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Total number of pages; an empty collection still has one page.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        let pages = self.total_items.div_ceil(u64::from(self.size.get()));
        u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number.get() > 1
    }

    /// Whether a page follows this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number.get() < self.total_pages()
    }

    /// The preceding page number, if any.
    #[must_use]
    pub const fn previous(&self) -> Option<PageNumber> {
        self.number.previous()
    }

    /// The following page number, if any.
    #[must_use]
    pub fn next(&self) -> Option<PageNumber> {
        if self.has_next() { self.number.next() } else { None }
    }

    /// Transform the items while preserving the pagination metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        let Self {
            items,
            number,
            size,
            total_items,
        } = self;
        Page {
            items: items.into_iter().map(f).collect(),
            number,
            size,
            total_items,
        }
    }
}
