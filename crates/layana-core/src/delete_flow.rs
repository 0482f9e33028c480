//! Delete Confirmation Flow
//!
//! `Idle -> Confirming(id) -> Idle`. Confirming issues the delete and then
//! refreshes the list, stepping one page back when the row was the last one
//! on a page beyond the first.

use tracing::{info, warn};

use crate::domain::Resource;
use crate::list_state::ListState;
use crate::repository::{ApiError, ApiResult, CollectionApi, Page, PageQuery};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeleteState<Id> {
    #[default]
    Idle,
    Confirming(Id),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteFlow<Id> {
    state: DeleteState<Id>,
}

impl<Id: Copy + PartialEq> Default for DeleteFlow<Id> {
    fn default() -> Self {
        Self {
            state: DeleteState::Idle,
        }
    }
}

impl<Id: Copy + PartialEq> DeleteFlow<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DeleteState<Id> {
        self.state
    }

    /// Delete click; a second click while confirming restages the new id
    pub fn request(&mut self, id: Id) {
        self.state = DeleteState::Confirming(id);
    }

    pub fn cancel(&mut self) {
        self.state = DeleteState::Idle;
    }

    pub fn pending(&self) -> Option<Id> {
        match self.state {
            DeleteState::Confirming(id) => Some(id),
            DeleteState::Idle => None,
        }
    }

    pub fn is_confirming(&self, id: Id) -> bool {
        self.pending() == Some(id)
    }

    /// Confirm click: back to `Idle`, handing out the staged id
    pub fn take_confirmed(&mut self) -> Option<Id> {
        let id = self.pending();
        self.state = DeleteState::Idle;
        id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome<T> {
    /// Row removed; `query` selects the page the view should now show
    Deleted {
        query: PageQuery,
        refreshed: ApiResult<Page<T>>,
    },
    /// Server refused or request failed; local state untouched
    Failed(ApiError),
}

/// Delete `id` and fetch the page the view should show next.
pub async fn delete_and_refresh<T, A>(api: &A, state: &ListState<T>, id: T::Id) -> DeleteOutcome<T>
where
    T: Resource,
    A: CollectionApi<T> + ?Sized,
{
    if let Err(e) = api.delete(id).await {
        warn!(collection = T::COLLECTION, %id, "delete failed: {}", e);
        return DeleteOutcome::Failed(e);
    }
    info!(collection = T::COLLECTION, %id, "deleted");

    let mut query = state.query();
    query.page = state.page_after_delete();
    let refreshed = api.list_page(&query).await;
    DeleteOutcome::Deleted { query, refreshed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Faq, FaqDraft};
    use crate::repository::{MemoryBackend, Operation};

    #[test]
    fn test_state_transitions() {
        let mut flow: DeleteFlow<u32> = DeleteFlow::new();
        assert_eq!(flow.state(), DeleteState::Idle);

        flow.request(3);
        assert!(flow.is_confirming(3));
        flow.request(5);
        assert_eq!(flow.pending(), Some(5));

        flow.cancel();
        assert_eq!(flow.take_confirmed(), None);

        flow.request(7);
        assert_eq!(flow.take_confirmed(), Some(7));
        assert_eq!(flow.state(), DeleteState::Idle);
    }

    async fn backend_with(n: u32) -> MemoryBackend<Faq> {
        let backend = MemoryBackend::new();
        for i in 1..=n {
            backend
                .create(&FaqDraft {
                    question: format!("Q{}", i),
                    answer: "A".to_string(),
                })
                .await
                .unwrap();
        }
        backend.clear_calls().await;
        backend
    }

    async fn state_on_page(backend: &MemoryBackend<Faq>, page: u32) -> ListState<Faq> {
        let mut state = ListState::new(5);
        state.page = page;
        state.apply_page(backend.list_page(&state.query()).await.unwrap());
        backend.clear_calls().await;
        state
    }

    #[tokio::test]
    async fn test_delete_refreshes_same_page() {
        let backend = backend_with(7).await;
        let state = state_on_page(&backend, 1).await;

        match delete_and_refresh(&backend, &state, 2).await {
            DeleteOutcome::Deleted { query, refreshed } => {
                assert_eq!(query.page, 1);
                let page = refreshed.unwrap();
                assert_eq!(page.items.len(), 5);
                assert_eq!(page.pagination.total, 6);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(backend.calls().await, vec![Operation::Delete, Operation::ListPage]);
    }

    #[tokio::test]
    async fn test_deleting_last_row_steps_back() {
        let backend = backend_with(6).await;
        let mut state = state_on_page(&backend, 2).await;
        assert_eq!(state.items.len(), 1);

        match delete_and_refresh(&backend, &state, 6).await {
            DeleteOutcome::Deleted { query, refreshed } => {
                assert_eq!(query.page, 1);
                state.show_after_delete(query, refreshed.unwrap());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(state.page, 1);
        assert_eq!(state.items.len(), 5);
        // The refresh already answers the new page; nothing left to fetch
        assert!(state.is_loaded(&state.query()));
        assert_eq!(backend.calls().await, vec![Operation::Delete, Operation::ListPage]);
    }

    #[tokio::test]
    async fn test_delete_failure_does_not_refresh() {
        let backend = backend_with(3).await;
        let state = state_on_page(&backend, 1).await;
        backend.fail_next(Operation::Delete).await;

        let outcome = delete_and_refresh(&backend, &state, 1).await;

        assert!(matches!(outcome, DeleteOutcome::Failed(ApiError::Transport(_))));
        assert_eq!(backend.calls().await, vec![Operation::Delete]);
        assert_eq!(backend.snapshot(None).await.len(), 3);
    }
}
