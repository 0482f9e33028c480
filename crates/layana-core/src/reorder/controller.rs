//! Optimistic Reorder Controller
//!
//! Turns one drag gesture `(active, over)` into a persisted global order:
//! splice the visible page right away, then count, fetch the whole
//! collection, renumber it and send the complete mapping back, and finally
//! refresh the page from the server whatever happened.

use std::marker::PhantomData;
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::error::ReorderError;
use super::plan::{move_by_id, plan_reorder};
use crate::domain::Resource;
use crate::repository::{ApiResult, CollectionApi, Page, PageQuery, Pagination, Scope};

/// What happened to the persisted order
#[derive(Debug, Clone, PartialEq)]
pub enum ReorderOutcome {
    /// Self-drop, nothing was sent
    Unchanged,
    /// The full mapping was accepted by the server
    Persisted { rows: usize },
    /// A row vanished between the page load and the gesture; nothing was sent
    Skipped(ReorderError),
    /// A request failed; nothing was persisted by this gesture
    Failed(ReorderError),
}

impl ReorderOutcome {
    /// Toast text for the user. Only outright failures are surfaced; a stale
    /// row is fixed by the refresh alone.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            ReorderOutcome::Failed(ReorderError::Api(e)) if e.is_transient() => {
                Some("Reorder failed, check the connection and try again")
            }
            ReorderOutcome::Failed(_) => Some("Reorder failed"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReorderReport<T> {
    pub outcome: ReorderOutcome,
    /// Result of the closing page refresh; `None` when no request was made
    pub refreshed: Option<ApiResult<Page<T>>>,
}

pub struct ReorderController<T: Resource, A: CollectionApi<T> + ?Sized> {
    api: Rc<A>,
    _marker: PhantomData<T>,
}

impl<T: Resource, A: CollectionApi<T> + ?Sized> Clone for ReorderController<T, A> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            _marker: PhantomData,
        }
    }
}

impl<T: Resource, A: CollectionApi<T> + ?Sized> ReorderController<T, A> {
    pub fn new(api: Rc<A>) -> Self {
        Self {
            api,
            _marker: PhantomData,
        }
    }

    /// Step 1: cosmetic splice of the displayed page. Never touches the server.
    pub fn apply_local(&self, items: &mut Vec<T>, active: T::Id, over: T::Id) -> bool {
        move_by_id(items, active, over)
    }

    /// Steps 2a-2g: count, fetch all, plan, persist.
    /// Returns the number of rows sent.
    pub async fn persist(
        &self,
        active: T::Id,
        over: T::Id,
        scope: Option<Scope>,
    ) -> Result<usize, ReorderError> {
        let count = self.api.count(scope).await?;
        debug!(collection = T::COLLECTION, count, "reorder: counted rows");

        let full = self.api.list_all(count, scope).await?;
        if full.len() as u64 != count {
            return Err(ReorderError::CountMismatch {
                expected: count,
                actual: full.len() as u64,
            });
        }

        let plan = plan_reorder(&full, active, over)?;
        self.api.reorder(&plan, scope).await?;
        Ok(plan.len())
    }

    /// Steps 2-4 for a gesture whose local splice already happened.
    pub async fn commit(&self, active: T::Id, over: T::Id, query: &PageQuery) -> ReorderReport<T> {
        if active == over {
            return ReorderReport {
                outcome: ReorderOutcome::Unchanged,
                refreshed: None,
            };
        }

        let outcome = match self.persist(active, over, query.scope).await {
            Ok(rows) => {
                info!(collection = T::COLLECTION, %active, %over, rows, "reorder persisted");
                ReorderOutcome::Persisted { rows }
            }
            Err(e @ ReorderError::NotFound { .. }) => {
                debug!(collection = T::COLLECTION, %active, %over, "reorder skipped: {}", e);
                ReorderOutcome::Skipped(e)
            }
            Err(e) => {
                warn!(collection = T::COLLECTION, %active, %over, "reorder failed: {}", e);
                ReorderOutcome::Failed(e)
            }
        };

        let refreshed = self.api.list_page(query).await;
        if let Err(e) = &refreshed {
            warn!(collection = T::COLLECTION, "refresh after reorder failed: {}", e);
        }

        ReorderReport {
            outcome,
            refreshed: Some(refreshed),
        }
    }

    /// Start of a gesture on the displayed page: keep a copy of what the
    /// server last sent, then splice. `None` for a self-drop, which needs no
    /// further steps.
    pub fn start(&self, items: &mut Vec<T>, active: T::Id, over: T::Id) -> Option<Vec<T>> {
        if active == over {
            return None;
        }
        let last_server_page = items.clone();
        self.apply_local(items, active, over);
        Some(last_server_page)
    }

    /// End of a gesture: show the refreshed rows, or roll the splice back to
    /// `last_server_page` when the refresh failed. Returns the pagination
    /// that came with the refresh.
    pub fn finish(
        &self,
        items: &mut Vec<T>,
        last_server_page: Vec<T>,
        report: &ReorderReport<T>,
    ) -> Option<Pagination> {
        match &report.refreshed {
            Some(Ok(page)) => {
                *items = page.items.clone();
                Some(page.pagination)
            }
            _ => {
                *items = last_server_page;
                None
            }
        }
    }

    /// The whole gesture against an owned page: `start`, `commit`, `finish`.
    pub async fn drag_end(
        &self,
        items: &mut Vec<T>,
        active: T::Id,
        over: T::Id,
        query: &PageQuery,
    ) -> ReorderReport<T> {
        let Some(last_server_page) = self.start(items, active, over) else {
            return ReorderReport {
                outcome: ReorderOutcome::Unchanged,
                refreshed: None,
            };
        };

        let report = self.commit(active, over, query).await;
        self.finish(items, last_server_page, &report);
        report
    }
}
