//! Entity Views
//!
//! How each collection is shown: table columns, row cells and editor
//! fields. The list, drag-and-drop and editor machinery is generic and
//! lives in `components`.

mod catalog;
mod content;
mod sections;

use layana_core::{FormValues, Resource};

pub use sections::SectionView;

/// Table column; `field` is the server-side sort key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub field: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

impl Column {
    pub const fn sortable(field: &'static str, label: &'static str) -> Self {
        Self {
            field,
            label,
            sortable: true,
        }
    }

    pub const fn plain(field: &'static str, label: &'static str) -> Self {
        Self {
            field,
            label,
            sortable: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    /// Decimal amount, stored in cents
    Money,
    Number,
    Checkbox,
    /// One entry per line
    Lines,
    /// Chosen by the view's scope selector, not edited in the form
    Scope,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }

    /// Scope fields show the parent but never take input
    pub const fn is_editable(&self) -> bool {
        !matches!(self.kind, FieldKind::Scope)
    }
}

/// Presentation of one collection
pub trait EntityView: Resource<Id = u32> + Send + Sync {
    const TITLE: &'static str;

    fn columns() -> &'static [Column];

    /// One cell per column, in column order
    fn cells(&self) -> Vec<String>;

    fn fields() -> &'static [FieldSpec];

    /// Short label, e.g. for scope selectors and delete prompts
    fn title(&self) -> String;

    /// Form values for a new row
    fn blank_form() -> FormValues {
        use layana_core::domain::Draft;
        Self::Draft::default().to_form()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layana_core::domain::{Faq, Location, PricingRow, TeamMember, Treatment};

    fn scope_fields<T: EntityView>() -> Vec<FieldSpec> {
        T::fields().iter().copied().filter(|f| f.kind == FieldKind::Scope).collect()
    }

    #[test]
    fn test_scope_key_is_a_read_only_field() {
        let pricing = scope_fields::<PricingRow>();
        assert_eq!(pricing.len(), 1);
        assert_eq!(Some(pricing[0].name), PricingRow::SCOPE_KEY);
        assert!(!pricing[0].is_editable());

        let team = scope_fields::<TeamMember>();
        assert_eq!(team.len(), 1);
        assert_eq!(Some(team[0].name), TeamMember::SCOPE_KEY);
        assert!(!team[0].is_editable());
    }

    #[test]
    fn test_unscoped_collections_edit_every_field() {
        assert!(scope_fields::<Treatment>().is_empty());
        assert!(scope_fields::<Location>().is_empty());
        assert!(Faq::fields().iter().all(FieldSpec::is_editable));
    }
}
