//! Paging, sorting and scoping types shared by every collection endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::Resource;

/// Field every collection is ordered by when no other sort is requested
pub const INDEX_FIELD: &str = "index";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Parent scope of a sub-collection, e.g. team members of one location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub key: &'static str,
    pub id: u32,
}

impl Scope {
    /// Scope for `T`, or `None` when the collection is not scoped.
    pub fn of<T: Resource>(id: u32) -> Option<Scope> {
        T::SCOPE_KEY.map(|key| Scope { key, id })
    }
}

/// Parameters of a paginated read
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    /// 1-based
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: SortDirection,
    pub scope: Option<Scope>,
}

impl PageQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            search: None,
            sort_by: None,
            sort_direction: SortDirection::Asc,
            scope: None,
        }
    }

    /// The whole collection as one page, in persisted order
    pub fn all(count: u64, scope: Option<Scope>) -> Self {
        let size = u32::try_from(count).unwrap_or(u32::MAX);
        Self {
            sort_by: Some(INDEX_FIELD.to_string()),
            scope,
            ..Self::new(1, size)
        }
    }

    /// Smallest read that still carries the pagination total
    pub fn first_row(scope: Option<Scope>) -> Self {
        Self {
            scope,
            ..Self::new(1, 1)
        }
    }

    pub fn with_scope(mut self, scope: Option<Scope>) -> Self {
        self.scope = scope;
        self
    }

    /// Query string pairs in the order the backend documents them
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.page_size.to_string()),
        ];
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            pairs.push(("search".to_string(), search.trim().to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sortBy".to_string(), sort_by.clone()));
            pairs.push((
                "sortDirection".to_string(),
                self.sort_direction.as_str().to_string(),
            ));
        }
        if let Some(scope) = self.scope {
            pairs.push((scope.key.to_string(), scope.id.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let limit = limit.max(1);
        let total_pages = total.div_ceil(u64::from(limit));
        Self {
            page,
            limit,
            total,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        }
    }
}

/// One page of a collection as returned by `ListPage`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(rename = "data")]
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// One entry of a reorder request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexAssignment<Id> {
    pub id: Id,
    pub index: u32,
}
