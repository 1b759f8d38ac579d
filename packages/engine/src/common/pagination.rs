//! Offset-based pagination types.
//!
//! # Usage
//!
//! ```rust,ignore
//! // In a query action
//! let page = PageArgs::new(1, 10).validate()?;
//!
//! // In a model
//! let (items, total) = Post::find_paginated(&filters, &page, pool).await?;
//!
//! // Build the result
//! let result = Paginated::new(items, total, &page);
//! ```

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Largest allowed page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Input arguments for offset-based pagination.
///
/// Pages are 1-based. Out-of-range values are rejected at validation time,
/// before any data access happens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageArgs {
    /// 1-based page number.
    pub page: i64,
    /// Number of items per page (1-100).
    pub page_size: i64,
}

impl PageArgs {
    pub fn new(page: i64, page_size: i64) -> Self {
        PageArgs { page, page_size }
    }

    /// Validate pagination arguments.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Validation` when the page number is below 1 or
    /// the page size falls outside `[1, MAX_PAGE_SIZE]`.
    pub fn validate(self) -> Result<ValidatedPageArgs, EngineError> {
        if self.page < 1 {
            return Err(EngineError::validation(format!(
                "page must be >= 1, got {}",
                self.page
            )));
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(EngineError::validation(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        Ok(ValidatedPageArgs {
            page: self.page,
            page_size: self.page_size,
        })
    }
}

impl Default for PageArgs {
    fn default() -> Self {
        PageArgs {
            page: 1,
            page_size: 25,
        }
    }
}

/// Validated pagination arguments.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedPageArgs {
    page: i64,
    page_size: i64,
}

impl ValidatedPageArgs {
    /// 1-based page number.
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Items per page.
    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// One page of results plus totals computed against the fully filtered set.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Count of all rows matching the filters, not just this window.
    pub total_count: i64,
    pub page: i64,
    pub page_size: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl<T> Paginated<T> {
    /// Assemble a page from fetched items and the filtered total.
    pub fn new(items: Vec<T>, total_count: i64, args: &ValidatedPageArgs) -> Self {
        let has_next_page = args.offset() + (items.len() as i64) < total_count;
        Paginated {
            items,
            total_count,
            page: args.page(),
            page_size: args.page_size(),
            has_next_page,
            has_previous_page: args.page() > 1,
        }
    }

    /// Map the item type while keeping page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            page_size: self.page_size,
            has_next_page: self.has_next_page,
            has_previous_page: self.has_previous_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_bounds() {
        let args = PageArgs::new(1, 1).validate().unwrap();
        assert_eq!(args.offset(), 0);
        assert_eq!(args.limit(), 1);

        let args = PageArgs::new(3, 100).validate().unwrap();
        assert_eq!(args.offset(), 200);
        assert_eq!(args.limit(), 100);
    }

    #[test]
    fn test_validate_rejects_bad_page() {
        assert!(PageArgs::new(0, 10).validate().is_err());
        assert!(PageArgs::new(-1, 10).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_page_size() {
        assert!(PageArgs::new(1, 0).validate().is_err());
        assert!(PageArgs::new(1, 101).validate().is_err());
    }

    #[test]
    fn test_validate_default_args() {
        let args = PageArgs::default().validate().unwrap();
        assert_eq!(args.page(), 1);
        assert_eq!(args.page_size(), 25);
    }

    #[test]
    fn test_paginated_flags_middle_page() {
        let args = PageArgs::new(2, 10).validate().unwrap();
        let page = Paginated::new(vec![0u8; 10], 25, &args);
        assert!(page.has_next_page);
        assert!(page.has_previous_page);
    }

    #[test]
    fn test_paginated_flags_last_page() {
        let args = PageArgs::new(3, 10).validate().unwrap();
        let page = Paginated::new(vec![0u8; 5], 25, &args);
        assert!(!page.has_next_page);
        assert!(page.has_previous_page);
    }

    #[test]
    fn test_paginated_flags_first_and_only_page() {
        let args = PageArgs::new(1, 10).validate().unwrap();
        let page = Paginated::new(vec![0u8; 3], 3, &args);
        assert!(!page.has_next_page);
        assert!(!page.has_previous_page);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let args = PageArgs::new(1, 10).validate().unwrap();
        let page = Paginated::new(vec![1, 2, 3], 25, &args).map(|n| n * 2);
        assert_eq!(page.items, vec![2, 4, 6]);
        assert_eq!(page.total_count, 25);
        assert!(page.has_next_page);
    }
}
