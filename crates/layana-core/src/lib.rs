//! Layana Admin Core
//!
//! Layered architecture:
//! - domain: Orderable entities, drafts and form validation
//! - repository: Remote collection API (HTTP and in-memory backends)
//! - reorder: Optimistic drag-and-drop reorder protocol
//! - list_state / delete_flow / row_sizing: per-view state machines

pub mod config;
pub mod delete_flow;
pub mod domain;
pub mod list_state;
pub mod reorder;
pub mod repository;
pub mod row_sizing;

pub use config::ClientConfig;
pub use delete_flow::{DeleteFlow, DeleteOutcome, DeleteState};
pub use domain::{Entity, FieldError, FormValues, Orderable, Resource};
pub use list_state::{ListState, SearchDebounce};
pub use reorder::{ReorderController, ReorderError, ReorderOutcome, ReorderReport};
pub use repository::{
    ApiError, ApiResult, CollectionApi, HttpCollectionClient, IndexAssignment, MemoryBackend, Page,
    PageQuery, Pagination, Scope, SortDirection,
};
pub use row_sizing::rows_that_fit;
