//! Category Entity

use serde::{Deserialize, Serialize};

use super::entity::{Draft, Entity, Orderable, Resource};
use super::validation::{FieldError, FormReader, FormValues, Rules, NAME_MAX_LEN};

/// Treatment category (e.g. "Massage", "Facial")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u32,
    pub index: u32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    pub slug: String,
}

impl Entity for Category {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Orderable for Category {
    fn index(&self) -> u32 {
        self.index
    }

    fn set_index(&mut self, index: u32) {
        self.index = index;
    }
}

/// Lowercase, dash separated slug derived from a display name
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

impl Draft for CategoryDraft {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Rules::new()
            .required("name", &self.name, NAME_MAX_LEN)
            .slug("slug", &self.slug)
            .finish()
    }

    fn from_form(values: &FormValues) -> Result<Self, Vec<FieldError>> {
        let mut form = FormReader::new(values);
        let name = form.text("name");
        // Blank slug falls back to one derived from the name
        let slug = form.optional_text("slug").unwrap_or_else(|| slugify(&name));
        form.finish(CategoryDraft { name, slug })
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.clone())
            .with("slug", self.slug.clone())
    }
}

impl Resource for Category {
    const COLLECTION: &'static str = "categories";
    const LABEL: &'static str = "Category";

    type Draft = CategoryDraft;

    fn from_draft(id: u32, index: u32, draft: &CategoryDraft) -> Self {
        Category {
            id,
            index,
            name: draft.name.clone(),
            slug: draft.slug.clone(),
        }
    }

    fn apply_draft(&mut self, draft: &CategoryDraft) {
        self.name = draft.name.clone();
        self.slug = draft.slug.clone();
    }

    fn to_draft(&self) -> CategoryDraft {
        CategoryDraft {
            name: self.name.clone(),
            slug: self.slug.clone(),
        }
    }
}
