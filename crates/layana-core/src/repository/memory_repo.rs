//! In-Memory Collection Backend
//!
//! Implements [`CollectionApi`] with the same semantics the REST backend
//! has: create appends `index = N + 1` inside its scope, delete closes the
//! gap, reorder is all-or-nothing. Backs the dashboard's demo mode and the
//! protocol tests; every call is recorded and failures can be injected.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use super::error::{ApiError, ApiResult};
use super::query::{IndexAssignment, Page, PageQuery, Pagination, Scope, SortDirection};
use super::traits::CollectionApi;
use crate::domain::{Draft, Entity, Orderable, Resource};

/// Server operation, as recorded in the call log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Count,
    ListAll,
    ListPage,
    Reorder,
    Get,
    Create,
    Update,
    Delete,
}

struct MemoryState<T: Resource> {
    rows: Vec<T>,
    next_id: u32,
    calls: Vec<Operation>,
    reorder_payloads: Vec<Vec<IndexAssignment<T::Id>>>,
    failures: Vec<Operation>,
}

/// In-memory implementation of a remote collection
pub struct MemoryBackend<T: Resource> {
    state: Arc<Mutex<MemoryState<T>>>,
}

impl<T: Resource> Clone for MemoryBackend<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Resource> Default for MemoryBackend<T> {
    fn default() -> Self {
        Self::with_rows(Vec::new())
    }
}

impl<T: Resource> MemoryBackend<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed rows as stored; ids must be unique.
    pub fn with_rows(rows: Vec<T>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                rows,
                next_id: 0,
                calls: Vec::new(),
                reorder_payloads: Vec::new(),
                failures: Vec::new(),
            })),
        }
    }

    /// Make the next call of `op` fail with a transport error
    pub async fn fail_next(&self, op: Operation) {
        self.state.lock().await.failures.push(op);
    }

    pub async fn calls(&self) -> Vec<Operation> {
        self.state.lock().await.calls.clone()
    }

    pub async fn clear_calls(&self) {
        self.state.lock().await.calls.clear();
    }

    pub async fn reorder_payloads(&self) -> Vec<Vec<IndexAssignment<T::Id>>> {
        self.state.lock().await.reorder_payloads.clone()
    }

    /// All stored rows of `scope` (or all rows) sorted by index
    pub async fn snapshot(&self, scope: Option<Scope>) -> Vec<T> {
        let state = self.state.lock().await;
        sorted_by_index(scoped(&state.rows, scope))
    }

    /// Drop a row without renumbering the rest, like a delete made by
    /// another admin session.
    pub async fn remove_silently(&self, id: T::Id) {
        self.state.lock().await.rows.retain(|r| r.id() != id);
    }
}

impl<T: Resource> MemoryState<T> {
    fn record(&mut self, op: Operation) -> ApiResult<()> {
        self.calls.push(op);
        if let Some(pos) = self.failures.iter().position(|f| *f == op) {
            self.failures.remove(pos);
            return Err(ApiError::Transport(format!("injected {:?} failure", op)));
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> u32
    where
        T::Id: Into<u64>,
    {
        let max: u64 = self.rows.iter().map(|r| r.id().into()).max().unwrap_or(0);
        self.next_id = self.next_id.max(u32::try_from(max).unwrap_or(u32::MAX)) + 1;
        self.next_id
    }

    /// Renumber a scope to `1..=N`, keeping the current relative order
    fn close_gaps(&mut self, scope_id: Option<u32>) {
        let mut ids: Vec<(u32, T::Id)> = self
            .rows
            .iter()
            .filter(|r| r.scope_id() == scope_id)
            .map(|r| (r.index(), r.id()))
            .collect();
        ids.sort_by_key(|(index, _)| *index);
        for (pos, (_, id)) in ids.into_iter().enumerate() {
            if let Some(row) = self.rows.iter_mut().find(|r| r.id() == id) {
                row.set_index(pos as u32 + 1);
            }
        }
    }

    fn scope_len(&self, scope_id: Option<u32>) -> u32 {
        self.rows.iter().filter(|r| r.scope_id() == scope_id).count() as u32
    }
}

fn scoped<T: Resource>(rows: &[T], scope: Option<Scope>) -> Vec<T> {
    rows.iter()
        .filter(|r| scope.map_or(true, |s| r.scope_id() == Some(s.id)))
        .cloned()
        .collect()
}

fn sorted_by_index<T: Resource>(mut rows: Vec<T>) -> Vec<T> {
    rows.sort_by_key(|r| r.index());
    rows
}

/// Case-insensitive match against every text field of the row
fn matches_search<T: Resource>(row: &T, needle: &str) -> bool {
    fn walk(value: &Value, needle: &str) -> bool {
        match value {
            Value::String(s) => s.to_lowercase().contains(needle),
            Value::Array(items) => items.iter().any(|v| walk(v, needle)),
            Value::Object(map) => map.values().any(|v| walk(v, needle)),
            _ => false,
        }
    }
    serde_json::to_value(row).map_or(false, |v| walk(&v, needle))
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn sort_rows<T: Resource>(rows: &mut [T], field: &str, direction: SortDirection) {
    let mut keyed: Vec<(Option<Value>, T)> = rows
        .iter()
        .map(|r| {
            let key = serde_json::to_value(r)
                .ok()
                .and_then(|v| v.get(field).cloned());
            (key, r.clone())
        })
        .collect();
    keyed.sort_by(|(ka, ra), (kb, rb)| {
        let ord = compare_values(ka.as_ref(), kb.as_ref()).then(ra.index().cmp(&rb.index()));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    for (slot, (_, row)) in rows.iter_mut().zip(keyed) {
        *slot = row;
    }
}

#[async_trait(?Send)]
impl<T: Resource> CollectionApi<T> for MemoryBackend<T>
where
    T::Id: From<u32> + Into<u64>,
{
    async fn list_page(&self, query: &PageQuery) -> ApiResult<Page<T>> {
        let mut state = self.state.lock().await;
        state.record(Operation::ListPage)?;

        let mut rows = sorted_by_index(scoped(&state.rows, query.scope));
        if let Some(needle) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = needle.to_lowercase();
            rows.retain(|r| matches_search(r, &needle));
        }
        if let Some(field) = &query.sort_by {
            sort_rows(&mut rows, field, query.sort_direction);
        }

        let total = rows.len() as u64;
        let start = (query.page.max(1) as usize - 1).saturating_mul(query.page_size as usize);
        let items: Vec<T> = rows
            .into_iter()
            .skip(start)
            .take(query.page_size as usize)
            .collect();
        debug!(collection = T::COLLECTION, page = query.page, rows = items.len(), total, "memory list page");

        Ok(Page {
            items,
            pagination: Pagination::new(query.page, query.page_size, total),
        })
    }

    async fn count(&self, scope: Option<Scope>) -> ApiResult<u64> {
        let mut state = self.state.lock().await;
        state.record(Operation::Count)?;
        Ok(scoped(&state.rows, scope).len() as u64)
    }

    async fn list_all(&self, count: u64, scope: Option<Scope>) -> ApiResult<Vec<T>> {
        let mut state = self.state.lock().await;
        state.record(Operation::ListAll)?;
        let rows = sorted_by_index(scoped(&state.rows, scope));
        Ok(rows.into_iter().take(count as usize).collect())
    }

    async fn reorder(
        &self,
        assignments: &[IndexAssignment<T::Id>],
        scope: Option<Scope>,
    ) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        state.record(Operation::Reorder)?;
        state.reorder_payloads.push(assignments.to_vec());

        // Validate everything before touching a single row
        for assignment in assignments {
            let known = state.rows.iter().any(|r| {
                r.id() == assignment.id && scope.map_or(true, |s| r.scope_id() == Some(s.id))
            });
            if !known {
                return Err(ApiError::Rejected(format!(
                    "{} {} is not part of this collection",
                    T::LABEL,
                    assignment.id
                )));
            }
        }

        for assignment in assignments {
            if let Some(row) = state.rows.iter_mut().find(|r| r.id() == assignment.id) {
                row.set_index(assignment.index);
            }
        }
        Ok(())
    }

    async fn get(&self, id: T::Id) -> ApiResult<T> {
        let mut state = self.state.lock().await;
        state.record(Operation::Get)?;
        state
            .rows
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("{} {}", T::LABEL, id)))
    }

    async fn create(&self, draft: &T::Draft) -> ApiResult<T> {
        let mut state = self.state.lock().await;
        state.record(Operation::Create)?;
        draft.validate().map_err(ApiError::Validation)?;

        let id = state.allocate_id();
        let index = state.scope_len(draft.scope_id()) + 1;
        let row = T::from_draft(T::Id::from(id), index, draft);
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: T::Id, draft: &T::Draft) -> ApiResult<T> {
        let mut state = self.state.lock().await;
        state.record(Operation::Update)?;
        draft.validate().map_err(ApiError::Validation)?;

        let new_scope = draft.scope_id();
        let end_of_new_scope = state.scope_len(new_scope) + 1;
        let row = state
            .rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ApiError::NotFound(format!("{} {}", T::LABEL, id)))?;

        let old_scope = row.scope_id();
        row.apply_draft(draft);
        if old_scope != new_scope {
            row.set_index(end_of_new_scope);
        }
        let updated = row.clone();
        if old_scope != new_scope {
            state.close_gaps(old_scope);
        }
        Ok(updated)
    }

    async fn delete(&self, id: T::Id) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        state.record(Operation::Delete)?;

        let pos = state
            .rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| ApiError::NotFound(format!("{} {}", T::LABEL, id)))?;
        let removed = state.rows.remove(pos);
        state.close_gaps(removed.scope_id());
        Ok(())
    }
}
