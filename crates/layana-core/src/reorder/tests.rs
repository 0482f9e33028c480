//! Reorder Protocol Tests
//!
//! Drives ReorderController against MemoryBackend and checks what ends up
//! persisted, what was sent, and what the page shows afterwards.

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use async_trait::async_trait;

    use crate::domain::{Faq, FaqDraft, Orderable, TeamMember, TeamMemberDraft};
    use crate::list_state::ListState;
    use crate::reorder::{move_by_id, ReorderController, ReorderError, ReorderOutcome};
    use crate::repository::{
        ApiResult, CollectionApi, IndexAssignment, MemoryBackend, Operation, Page, PageQuery,
        Scope,
    };

    async fn setup_faqs(n: u32) -> MemoryBackend<Faq> {
        let backend = MemoryBackend::new();
        for i in 1..=n {
            backend
                .create(&FaqDraft {
                    question: format!("Q{}", i),
                    answer: "A".to_string(),
                })
                .await
                .expect("Failed to create");
        }
        backend.clear_calls().await;
        backend
    }

    fn controller(backend: &MemoryBackend<Faq>) -> ReorderController<Faq, MemoryBackend<Faq>> {
        ReorderController::new(Rc::new(backend.clone()))
    }

    fn ids<T: Orderable<Id = u32>>(rows: &[T]) -> Vec<u32> {
        rows.iter().map(|r| r.id()).collect()
    }

    async fn load(backend: &MemoryBackend<Faq>, query: &PageQuery) -> Vec<Faq> {
        let page = backend.list_page(query).await.expect("Failed to load page");
        backend.clear_calls().await;
        page.items
    }

    #[tokio::test]
    async fn test_drag_sends_four_requests_in_order() {
        let backend = setup_faqs(3).await;
        let query = PageQuery::new(1, 10);
        let mut items = load(&backend, &query).await;

        let report = controller(&backend).drag_end(&mut items, 1, 3, &query).await;

        assert_eq!(report.outcome, ReorderOutcome::Persisted { rows: 3 });
        assert_eq!(
            backend.calls().await,
            vec![Operation::Count, Operation::ListAll, Operation::Reorder, Operation::ListPage]
        );
        let payload = &backend.reorder_payloads().await[0];
        assert_eq!(
            payload,
            &vec![
                IndexAssignment { id: 2, index: 1 },
                IndexAssignment { id: 3, index: 2 },
                IndexAssignment { id: 1, index: 3 },
            ]
        );
        assert_eq!(ids(&items), vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_self_drop_makes_no_requests() {
        let backend = setup_faqs(3).await;
        let query = PageQuery::new(1, 10);
        let mut items = load(&backend, &query).await;
        let before = items.clone();

        let report = controller(&backend).drag_end(&mut items, 2, 2, &query).await;

        assert_eq!(report.outcome, ReorderOutcome::Unchanged);
        assert!(report.refreshed.is_none());
        assert!(backend.calls().await.is_empty());
        assert_eq!(items, before);
    }

    #[tokio::test]
    async fn test_move_on_second_page_reorders_globally() {
        let backend = setup_faqs(7).await;
        let query = PageQuery::new(2, 3);
        let mut items = load(&backend, &query).await;
        assert_eq!(ids(&items), vec![4, 5, 6]);

        controller(&backend).drag_end(&mut items, 4, 6, &query).await;

        let stored = backend.snapshot(None).await;
        assert_eq!(ids(&stored), vec![1, 2, 3, 5, 6, 4, 7]);
        let indices: Vec<u32> = stored.iter().map(|f| f.index).collect();
        assert_eq!(indices, (1..=7).collect::<Vec<_>>());
        assert_eq!(ids(&items), vec![5, 6, 4]);
    }

    #[tokio::test]
    async fn test_payload_covers_whole_collection() {
        let backend = setup_faqs(12).await;
        let query = PageQuery::new(1, 5);
        let mut items = load(&backend, &query).await;

        controller(&backend).drag_end(&mut items, 5, 1, &query).await;

        let payload = &backend.reorder_payloads().await[0];
        assert_eq!(payload.len(), 12);
        let mut indices: Vec<u32> = payload.iter().map(|a| a.index).collect();
        indices.sort_unstable();
        assert_eq!(indices, (1..=12).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_reorder_failure_is_reported_and_page_refreshed() {
        let backend = setup_faqs(4).await;
        let query = PageQuery::new(1, 10);
        let mut items = load(&backend, &query).await;
        backend.fail_next(Operation::Reorder).await;

        let report = controller(&backend).drag_end(&mut items, 1, 4, &query).await;

        assert_eq!(
            report.outcome.notice(),
            Some("Reorder failed, check the connection and try again")
        );
        assert!(matches!(report.outcome, ReorderOutcome::Failed(ReorderError::Api(_))));
        // Nothing persisted, and the optimistic move is replaced by the server order
        assert_eq!(ids(&backend.snapshot(None).await), vec![1, 2, 3, 4]);
        assert_eq!(ids(&items), vec![1, 2, 3, 4]);
        assert_eq!(backend.calls().await.last(), Some(&Operation::ListPage));
    }

    #[tokio::test]
    async fn test_count_failure_skips_everything_but_refresh() {
        let backend = setup_faqs(3).await;
        let query = PageQuery::new(1, 10);
        let mut items = load(&backend, &query).await;
        backend.fail_next(Operation::Count).await;

        let report = controller(&backend).drag_end(&mut items, 3, 1, &query).await;

        assert!(report.outcome.notice().is_some());
        assert_eq!(backend.calls().await, vec![Operation::Count, Operation::ListPage]);
        assert!(backend.reorder_payloads().await.is_empty());
    }

    #[tokio::test]
    async fn test_stale_id_aborts_silently() {
        let backend = setup_faqs(4).await;
        let query = PageQuery::new(1, 10);
        let mut items = load(&backend, &query).await;
        backend.remove_silently(2).await;

        let report = controller(&backend).drag_end(&mut items, 2, 4, &query).await;

        assert!(matches!(report.outcome, ReorderOutcome::Skipped(ReorderError::NotFound { .. })));
        assert_eq!(report.outcome.notice(), None);
        assert_eq!(
            backend.calls().await,
            vec![Operation::Count, Operation::ListAll, Operation::ListPage]
        );
        assert_eq!(ids(&items), vec![1, 3, 4]);
    }

    #[tokio::test]
    async fn test_stale_target_aborts_silently() {
        let backend = setup_faqs(4).await;
        let query = PageQuery::new(1, 10);
        let mut items = load(&backend, &query).await;
        backend.remove_silently(4).await;

        let report = controller(&backend).drag_end(&mut items, 2, 4, &query).await;

        assert_eq!(
            report.outcome,
            ReorderOutcome::Skipped(ReorderError::NotFound { id: "4".to_string() })
        );
        assert!(backend.reorder_payloads().await.is_empty());
        assert_eq!(ids(&items), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_single_page_matches_local_splice() {
        for n in 2..=6u32 {
            for active in 1..=n {
                for over in (1..=n).filter(|&o| o != active) {
                    let backend = setup_faqs(n).await;
                    let query = PageQuery::new(1, 10);
                    let mut items = load(&backend, &query).await;
                    let mut spliced = items.clone();
                    move_by_id(&mut spliced, active, over);

                    controller(&backend).drag_end(&mut items, active, over, &query).await;

                    assert_eq!(ids(&items), ids(&spliced), "n={} {}->{}", n, active, over);
                    assert_eq!(ids(&backend.snapshot(None).await), ids(&spliced));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_list_state_shows_latest_page_after_gesture() {
        let backend = setup_faqs(7).await;
        let controller = controller(&backend);
        let mut state: ListState<Faq> = ListState::new(3);
        state.page = 2;
        let query = state.query();
        state.apply_page(backend.list_page(&query).await.unwrap());

        let last_server_page = controller.start(&mut state.items, 4, 6).expect("not a self-drop");
        assert_eq!(ids(&state.items), vec![5, 6, 4]);
        assert_eq!(ids(&last_server_page), vec![4, 5, 6]);

        let report = controller.commit(4, 6, &query).await;
        if let Some(pagination) = controller.finish(&mut state.items, last_server_page, &report) {
            state.pagination = Some(pagination);
        }

        let latest = backend.list_page(&query).await.unwrap();
        assert_eq!(state.items, latest.items);
        assert_eq!(state.pagination, Some(latest.pagination));
    }

    #[tokio::test]
    async fn test_list_state_rolls_back_when_refresh_fails() {
        let backend = setup_faqs(3).await;
        let controller = controller(&backend);
        let mut state: ListState<Faq> = ListState::new(10);
        let query = state.query();
        state.apply_page(backend.list_page(&query).await.unwrap());
        let pagination = state.pagination;
        backend.fail_next(Operation::ListPage).await;

        assert!(controller.start(&mut state.items, 2, 2).is_none());
        let last_server_page = controller.start(&mut state.items, 1, 3).expect("not a self-drop");
        let report = controller.commit(1, 3, &query).await;

        assert_eq!(controller.finish(&mut state.items, last_server_page, &report), None);
        assert_eq!(ids(&state.items), vec![1, 2, 3]);
        assert_eq!(state.pagination, pagination);
    }

    #[tokio::test]
    async fn test_failed_refresh_restores_last_server_page() {
        let backend = setup_faqs(3).await;
        let query = PageQuery::new(1, 10);
        let mut items = load(&backend, &query).await;
        backend.fail_next(Operation::ListPage).await;

        let report = controller(&backend).drag_end(&mut items, 1, 3, &query).await;

        assert_eq!(report.outcome, ReorderOutcome::Persisted { rows: 3 });
        assert!(matches!(report.refreshed, Some(Err(_))));
        assert_eq!(ids(&items), vec![1, 2, 3]);
        assert_eq!(ids(&backend.snapshot(None).await), vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_sequential_drags_compose() {
        let backend = setup_faqs(5).await;
        let query = PageQuery::new(1, 10);
        let mut items = load(&backend, &query).await;
        let controller = controller(&backend);

        controller.drag_end(&mut items, 5, 1, &query).await;
        controller.drag_end(&mut items, 2, 3, &query).await;

        assert_eq!(ids(&items), vec![5, 1, 3, 2, 4]);
        assert_eq!(ids(&backend.snapshot(None).await), vec![5, 1, 3, 2, 4]);
    }

    #[tokio::test]
    async fn test_scoped_reorder_stays_in_scope() {
        let backend: MemoryBackend<TeamMember> = MemoryBackend::new();
        for (location_id, name) in [(1, "Ayu"), (2, "Made"), (1, "Komang"), (1, "Wayan")] {
            backend
                .create(&TeamMemberDraft {
                    location_id,
                    name: name.to_string(),
                    role: "Therapist".to_string(),
                    bio: None,
                    is_active: true,
                })
                .await
                .unwrap();
        }
        let scope = Scope::of::<TeamMember>(1);
        let query = PageQuery::new(1, 10).with_scope(scope);
        let mut items = backend.list_page(&query).await.unwrap().items;

        let controller: ReorderController<TeamMember, MemoryBackend<TeamMember>> =
            ReorderController::new(Rc::new(backend.clone()));
        let report = controller.drag_end(&mut items, 4, 1, &query).await;

        assert_eq!(report.outcome, ReorderOutcome::Persisted { rows: 3 });
        assert_eq!(ids(&backend.snapshot(scope).await), vec![4, 1, 3]);
        let other = backend.snapshot(Scope::of::<TeamMember>(2)).await;
        assert_eq!(other[0].index, 1);
    }

    /// Loses a row between the count and the full read
    struct ShrinkingBackend(MemoryBackend<Faq>);

    #[async_trait(?Send)]
    impl CollectionApi<Faq> for ShrinkingBackend {
        async fn list_page(&self, query: &PageQuery) -> ApiResult<Page<Faq>> {
            self.0.list_page(query).await
        }

        async fn list_all(&self, count: u64, scope: Option<Scope>) -> ApiResult<Vec<Faq>> {
            let mut rows = self.0.list_all(count, scope).await?;
            rows.pop();
            Ok(rows)
        }

        async fn reorder(
            &self,
            assignments: &[IndexAssignment<u32>],
            scope: Option<Scope>,
        ) -> ApiResult<()> {
            self.0.reorder(assignments, scope).await
        }

        async fn get(&self, id: u32) -> ApiResult<Faq> {
            self.0.get(id).await
        }

        async fn create(&self, draft: &FaqDraft) -> ApiResult<Faq> {
            self.0.create(draft).await
        }

        async fn update(&self, id: u32, draft: &FaqDraft) -> ApiResult<Faq> {
            self.0.update(id, draft).await
        }

        async fn delete(&self, id: u32) -> ApiResult<()> {
            self.0.delete(id).await
        }
    }

    #[tokio::test]
    async fn test_count_mismatch_sends_nothing() {
        let backend = setup_faqs(3).await;
        let controller: ReorderController<Faq, ShrinkingBackend> =
            ReorderController::new(Rc::new(ShrinkingBackend(backend.clone())));

        let err = controller.persist(1, 2, None).await.unwrap_err();

        assert_eq!(err, ReorderError::CountMismatch { expected: 3, actual: 2 });
        assert_eq!(ReorderOutcome::Failed(err).notice(), Some("Reorder failed"));
        assert!(backend.reorder_payloads().await.is_empty());
    }
}
