//! Reorder Planning
//!
//! Pure list arithmetic behind the reorder protocol: move one element onto
//! another element's position, then renumber the whole list.

use super::error::ReorderError;
use crate::domain::{Entity, Orderable};
use crate::repository::IndexAssignment;

/// Move the element at `from` to `to` (remove, then insert).
///
/// Out-of-range positions leave the list untouched.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Positions of `active` and `over` in `items`, by identity.
pub fn locate<T: Entity>(
    items: &[T],
    active: T::Id,
    over: T::Id,
) -> Result<(usize, usize), ReorderError> {
    let find = |id: T::Id| {
        items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| ReorderError::NotFound { id: id.to_string() })
    };
    Ok((find(active)?, find(over)?))
}

/// Page-local optimistic move. Returns false when either id is not on the page.
pub fn move_by_id<T: Entity>(items: &mut Vec<T>, active: T::Id, over: T::Id) -> bool {
    if active == over {
        return false;
    }
    match locate(items, active, over) {
        Ok((from, to)) => {
            move_item(items, from, to);
            true
        }
        Err(_) => false,
    }
}

/// `index = position + 1` for every element
pub fn renumber<T: Orderable>(items: &[T]) -> Vec<IndexAssignment<T::Id>> {
    items
        .iter()
        .enumerate()
        .map(|(pos, item)| IndexAssignment {
            id: item.id(),
            index: pos as u32 + 1,
        })
        .collect()
}

/// Full reorder payload for moving `active` onto `over` inside the complete
/// collection `full` (already in persisted order).
pub fn plan_reorder<T: Orderable>(
    full: &[T],
    active: T::Id,
    over: T::Id,
) -> Result<Vec<IndexAssignment<T::Id>>, ReorderError> {
    let (from, to) = locate(full, active, over)?;
    let mut order = full.to_vec();
    move_item(&mut order, from, to);
    Ok(renumber(&order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Faq;

    fn faqs(n: u32) -> Vec<Faq> {
        (1..=n)
            .map(|i| Faq {
                id: i,
                index: i,
                question: format!("Q{}", i),
                answer: String::new(),
            })
            .collect()
    }

    fn pairs(plan: &[IndexAssignment<u32>]) -> Vec<(u32, u32)> {
        plan.iter().map(|a| (a.id, a.index)).collect()
    }

    #[test]
    fn test_simple_swap_payload() {
        let plan = plan_reorder(&faqs(3), 1, 3).unwrap();
        assert_eq!(pairs(&plan), vec![(2, 1), (3, 2), (1, 3)]);
    }

    #[test]
    fn test_move_up() {
        let plan = plan_reorder(&faqs(4), 4, 2).unwrap();
        assert_eq!(pairs(&plan), vec![(1, 1), (4, 2), (2, 3), (3, 4)]);
    }

    #[test]
    fn test_missing_id() {
        let err = plan_reorder(&faqs(3), 7, 1).unwrap_err();
        assert_eq!(err, ReorderError::NotFound { id: "7".to_string() });
        assert!(plan_reorder(&faqs(3), 1, 8).is_err());
    }

    #[test]
    fn test_move_by_id_self_is_noop() {
        let mut items = faqs(3);
        assert!(!move_by_id(&mut items, 2, 2));
        assert_eq!(items, faqs(3));
    }

    #[test]
    fn test_move_by_id_off_page() {
        let mut items = faqs(3);
        assert!(!move_by_id(&mut items, 1, 42));
        assert_eq!(items, faqs(3));
    }

    #[test]
    fn test_renumber_contiguous() {
        let mut items = faqs(5);
        move_item(&mut items, 0, 4);
        let plan = renumber(&items);
        assert_eq!(plan.iter().map(|a| a.index).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(plan[4].id, 1);
    }

    /// Every (i, j) pair for small N: contiguous indices, moved item lands at
    /// j, everyone else keeps relative order.
    #[test]
    fn test_global_order_exhaustive() {
        for n in 2..=7u32 {
            let full = faqs(n);
            for i in 0..n as usize {
                for j in 0..n as usize {
                    if i == j {
                        continue;
                    }
                    let active = full[i].id;
                    let over = full[j].id;
                    let plan = plan_reorder(&full, active, over).unwrap();

                    let mut idx: Vec<u32> = plan.iter().map(|a| a.index).collect();
                    idx.sort_unstable();
                    assert_eq!(idx, (1..=n).collect::<Vec<_>>());

                    let pos = plan.iter().position(|a| a.id == active).unwrap();
                    assert_eq!(pos, j);

                    let others: Vec<u32> = plan.iter().map(|a| a.id).filter(|id| *id != active).collect();
                    let expected: Vec<u32> = full.iter().map(|f| f.id).filter(|id| *id != active).collect();
                    assert_eq!(others, expected);
                }
            }
        }
    }
}
