//! Repository Layer
//!
//! Remote collection access: the abstract API, its REST client and the
//! in-memory backend.

mod error;
mod query;
mod traits;
mod http_repo;
mod memory_repo;

#[cfg(test)]
mod tests;

pub use error::{ApiError, ApiResult};
pub use query::{IndexAssignment, Page, PageQuery, Pagination, Scope, SortDirection, INDEX_FIELD};
pub use traits::CollectionApi;
pub use http_repo::HttpCollectionClient;
pub use memory_repo::{MemoryBackend, Operation};
