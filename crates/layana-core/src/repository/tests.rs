//! Repository Integration Tests
//!
//! Tests for MemoryBackend server semantics through the CollectionApi trait.

#[cfg(test)]
mod tests {
    use crate::domain::{Faq, FaqDraft, Orderable, TeamMember, TeamMemberDraft};
    use crate::repository::{
        ApiError, CollectionApi, IndexAssignment, MemoryBackend, Operation, PageQuery, Scope,
        SortDirection,
    };

    fn faq_draft(question: &str) -> FaqDraft {
        FaqDraft {
            question: question.to_string(),
            answer: format!("Answer to {}", question),
        }
    }

    fn member_draft(location_id: u32, name: &str) -> TeamMemberDraft {
        TeamMemberDraft {
            location_id,
            name: name.to_string(),
            role: "Therapist".to_string(),
            bio: None,
            is_active: true,
        }
    }

    async fn setup_faqs(n: usize) -> MemoryBackend<Faq> {
        let backend = MemoryBackend::new();
        for i in 1..=n {
            backend.create(&faq_draft(&format!("Q{}", i))).await.expect("Failed to create");
        }
        backend.clear_calls().await;
        backend
    }

    fn indices<T: Orderable>(rows: &[T]) -> Vec<u32> {
        rows.iter().map(|r| r.index()).collect()
    }

    #[tokio::test]
    async fn test_create_appends_index() {
        let backend = setup_faqs(3).await;

        let created = backend.create(&faq_draft("Parking?")).await.unwrap();
        assert_eq!(created.id, 4);
        assert_eq!(created.index, 4);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_draft() {
        let backend: MemoryBackend<Faq> = MemoryBackend::new();
        let err = backend.create(&faq_draft("  ")).await.unwrap_err();
        assert_eq!(err.field_errors()[0].field, "question");
        assert!(backend.snapshot(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_closes_gap() {
        let backend = setup_faqs(4).await;

        backend.delete(2).await.expect("Delete failed");

        let rows = backend.snapshot(None).await;
        assert_eq!(indices(&rows), vec![1, 2, 3]);
        assert_eq!(rows.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 3, 4]);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let backend = setup_faqs(1).await;
        assert!(matches!(backend.delete(9).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_index() {
        let backend = setup_faqs(3).await;

        let updated = backend.update(2, &faq_draft("Gift cards?")).await.unwrap();
        assert_eq!(updated.index, 2);
        assert_eq!(backend.get(2).await.unwrap().question, "Gift cards?");
    }

    #[tokio::test]
    async fn test_list_page_paginates_in_index_order() {
        let backend = setup_faqs(7).await;

        let page = backend.list_page(&PageQuery::new(2, 3)).await.unwrap();
        assert_eq!(page.items.iter().map(|f| f.id).collect::<Vec<_>>(), vec![4, 5, 6]);
        assert_eq!(page.pagination.total, 7);
        assert_eq!(page.pagination.total_pages, 3);

        let last = backend.list_page(&PageQuery::new(3, 3)).await.unwrap();
        assert_eq!(last.items.len(), 1);
    }

    #[tokio::test]
    async fn test_list_page_search_and_sort() {
        let backend: MemoryBackend<Faq> = MemoryBackend::new();
        backend.create(&faq_draft("Opening hours")).await.unwrap();
        backend.create(&faq_draft("Booking online")).await.unwrap();
        backend.create(&faq_draft("Cancellation policy")).await.unwrap();

        let mut query = PageQuery::new(1, 10);
        query.search = Some("ONLINE".to_string());
        let found = backend.list_page(&query).await.unwrap();
        assert_eq!(found.items.len(), 1);
        assert_eq!(found.pagination.total, 1);

        let mut query = PageQuery::new(1, 10);
        query.sort_by = Some("question".to_string());
        query.sort_direction = SortDirection::Desc;
        let sorted = backend.list_page(&query).await.unwrap();
        let questions: Vec<_> = sorted.items.iter().map(|f| f.question.as_str()).collect();
        assert_eq!(questions, vec!["Opening hours", "Cancellation policy", "Booking online"]);
    }

    #[tokio::test]
    async fn test_scoped_collections_number_independently() {
        let backend: MemoryBackend<TeamMember> = MemoryBackend::new();
        backend.create(&member_draft(1, "Ayu")).await.unwrap();
        backend.create(&member_draft(2, "Made")).await.unwrap();
        let third = backend.create(&member_draft(1, "Komang")).await.unwrap();
        assert_eq!(third.index, 2);

        let scope = Scope::of::<TeamMember>(1);
        assert_eq!(backend.count(scope).await.unwrap(), 2);
        assert_eq!(backend.count(None).await.unwrap(), 3);

        let query = PageQuery::new(1, 10).with_scope(scope);
        let page = backend.list_page(&query).await.unwrap();
        assert!(page.items.iter().all(|m| m.location_id == 1));
    }

    #[tokio::test]
    async fn test_moving_member_between_locations_renumbers_both() {
        let backend: MemoryBackend<TeamMember> = MemoryBackend::new();
        backend.create(&member_draft(1, "Ayu")).await.unwrap();
        backend.create(&member_draft(1, "Komang")).await.unwrap();
        backend.create(&member_draft(2, "Made")).await.unwrap();

        let moved = backend.update(1, &member_draft(2, "Ayu")).await.unwrap();
        assert_eq!(moved.index, 2);

        let first = backend.snapshot(Scope::of::<TeamMember>(1)).await;
        assert_eq!(indices(&first), vec![1]);
    }

    #[tokio::test]
    async fn test_reorder_is_all_or_nothing() {
        let backend = setup_faqs(3).await;

        let payload = [
            IndexAssignment { id: 3, index: 1 },
            IndexAssignment { id: 99, index: 2 },
        ];
        let err = backend.reorder(&payload, None).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(_)));

        let rows = backend.snapshot(None).await;
        assert_eq!(rows.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_injected_failure_fires_once() {
        let backend = setup_faqs(2).await;
        backend.fail_next(Operation::Count).await;

        assert!(backend.count(None).await.unwrap_err().is_transient());
        assert_eq!(backend.count(None).await.unwrap(), 2);
        assert_eq!(backend.calls().await, vec![Operation::Count, Operation::Count]);
    }

    #[tokio::test]
    async fn test_list_all_honours_count() {
        let backend = setup_faqs(5).await;
        let rows = backend.list_all(3, None).await.unwrap();
        assert_eq!(indices(&rows), vec![1, 2, 3]);
    }
}
