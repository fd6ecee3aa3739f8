//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct, helpers to normalize inputs, and the
//! two listing shapes returned by repositories.

use serde::Serialize;

use crate::query::{query_flag, query_u64, QueryParams};

pub const PAGE: &str = "page";
pub const PER_PAGE: &str = "per_page";
pub const ITEMIZE: &str = "itemize";
pub const ITEMIZED: &str = "itemized";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Read `page`/`per_page`; anything absent or unparsable takes the default.
    pub fn from_query(params: Option<&QueryParams>, default_per_page: u32) -> Self {
        let to_u32 = |v: u64| u32::try_from(v).unwrap_or(u32::MAX);
        Self {
            page: to_u32(query_u64(params, PAGE, DEFAULT_PAGE as u64)),
            per_page: to_u32(query_u64(params, PER_PAGE, default_per_page as u64)),
        }
    }

    /// Clamp to sane defaults and convert to `u64`
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: DEFAULT_PAGE, per_page: DEFAULT_PER_PAGE } }
}

/// `itemize` or `itemized` set to true asks for every row without paging.
pub fn is_itemized(params: Option<&QueryParams>) -> bool {
    query_flag(params, ITEMIZED) || query_flag(params, ITEMIZE)
}

/// Result of a listing. Serialized without a tag so clients see either
/// `{total, page, per_page, items}` or just `{items}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page { total: u64, page: u64, per_page: u64, items: Vec<T> },
    Itemized { items: Vec<T> },
}

impl<T> Listing<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Listing::Page { items, .. } | Listing::Itemized { items } => items,
        }
    }

    /// Full filtered count; only pages carry it.
    pub fn total(&self) -> Option<u64> {
        match self {
            Listing::Page { total, .. } => Some(*total),
            Listing::Itemized { .. } => None,
        }
    }
}
