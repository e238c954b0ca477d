//! Paginated response builder
//!
//! Every list endpoint fetches its full match list and hands it to
//! [`ResponsePage::from_full`], which cuts out the requested page.

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// One page of results plus what the caller needs to page further.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponsePage<T> {
    /// Rows on this page
    pub data: Vec<T>,
    /// Number of rows across all pages
    pub total: Option<u64>,
    /// Page size the page was cut with
    pub page_size: Option<i64>,
}

impl<T> ResponsePage<T> {
    pub fn new(data: Vec<T>, total: Option<u64>, page_size: Option<i64>) -> Self {
        Self {
            data,
            total,
            page_size,
        }
    }

    /// Cut page `page` (1-based) of `size` rows out of the full match list.
    ///
    /// A page outside the list yields empty data; `total` always reports the
    /// full list length.
    pub fn from_full(mut items: Vec<T>, page: i64, size: i64) -> Self {
        let total = items.len() as u64;
        let data = match page_bounds(page, size, items.len()) {
            Some((start, end)) => items.drain(start..end).collect(),
            None => Vec::new(),
        };
        Self::new(data, Some(total), Some(size))
    }

    /// `ceil(total / page_size)`, or 0 when either is missing or the size is not positive.
    pub fn total_pages(&self) -> u64 {
        match (self.total, self.page_size) {
            (Some(total), Some(size)) if size > 0 => total.div_ceil(size as u64),
            _ => 0,
        }
    }

    pub fn map<U, F>(self, f: F) -> ResponsePage<U>
    where
        F: FnMut(T) -> U,
    {
        ResponsePage {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page_size: self.page_size,
        }
    }
}

/// Index range of `page` within a list of `len` rows, if it has any rows.
fn page_bounds(page: i64, size: i64, len: usize) -> Option<(usize, usize)> {
    if page < 1 || size < 1 {
        return None;
    }
    let start = usize::try_from((page - 1).checked_mul(size)?).ok()?;
    if start >= len {
        return None;
    }
    let end = start.saturating_add(usize::try_from(size).ok()?).min(len);
    Some((start, end))
}

impl<T: Serialize> Serialize for ResponsePage<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResponsePage", 4)?;
        state.serialize_field("data", &self.data)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("pageSize", &self.page_size)?;
        state.serialize_field("totalPages", &self.total_pages())?;
        state.end()
    }
}
