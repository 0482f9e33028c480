//! Repository Layer - Core Traits
//!
//! Defines the abstract interface to a remote collection.
//! Implementations talk HTTP or keep rows in memory.

use async_trait::async_trait;

use super::error::ApiResult;
use super::query::{IndexAssignment, Page, PageQuery, Scope};
use crate::domain::Resource;

/// Server pass-through operations for one collection.
///
/// Generic over any Resource type. Futures are not `Send` so the same
/// trait serves the browser fetch client.
#[async_trait(?Send)]
pub trait CollectionApi<T: Resource> {
    /// Paginated read used for display and refreshes
    async fn list_page(&self, query: &PageQuery) -> ApiResult<Page<T>>;

    /// Total row count, optionally scoped to a parent
    async fn count(&self, scope: Option<Scope>) -> ApiResult<u64> {
        let page = self.list_page(&PageQuery::first_row(scope)).await?;
        Ok(page.pagination.total)
    }

    /// Every row in persisted order, fetched as a single page of `count` rows
    async fn list_all(&self, count: u64, scope: Option<Scope>) -> ApiResult<Vec<T>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let page = self.list_page(&PageQuery::all(count, scope)).await?;
        Ok(page.items)
    }

    /// Replace the index of every listed id in one request
    async fn reorder(
        &self,
        assignments: &[IndexAssignment<T::Id>],
        scope: Option<Scope>,
    ) -> ApiResult<()>;

    async fn get(&self, id: T::Id) -> ApiResult<T>;

    async fn create(&self, draft: &T::Draft) -> ApiResult<T>;

    async fn update(&self, id: T::Id, draft: &T::Draft) -> ApiResult<T>;

    async fn delete(&self, id: T::Id) -> ApiResult<()>;
}
