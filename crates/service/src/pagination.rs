//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct, the `Page` envelope every list endpoint returns,
//! and a helper that runs a SeaORM select through the paginator.

use sea_orm::{ConnectionTrait, EntityTrait, FromQueryResult, PaginatorTrait, Select};
use serde::Serialize;

use crate::errors::ServiceError;

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: Option<u32>, per_page: Option<u32>, default_per_page: u32) -> Self {
        Self { page: page.unwrap_or(1), per_page: per_page.unwrap_or(default_per_page) }
    }

    /// Clamp to sane defaults and convert to `u64`
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 10 } }
}

/// List envelope: `{items, total_items, total_pages, current_page}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
            total_pages: self.total_pages,
            current_page: self.current_page,
        }
    }
}

/// Run `select` through the paginator for the requested page.
pub async fn fetch_page<'db, C, E>(db: &'db C, select: Select<E>, p: Pagination) -> Result<Page<E::Model>, ServiceError>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: FromQueryResult + Sized + Send + Sync + 'db,
{
    let (idx, per_page) = p.normalize();
    let paginator = select.paginate(db, per_page);
    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(idx).await?;
    Ok(Page {
        items,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
        current_page: idx + 1,
    })
}
