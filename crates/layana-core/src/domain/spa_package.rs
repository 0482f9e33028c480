//! Spa Package Entity
//!
//! A bundle of treatments sold at a single price.

use serde::{Deserialize, Serialize};

use super::entity::{Draft, Entity, Orderable, Resource};
use super::validation::{format_cents, FieldError, FormReader, FormValues, Rules, NAME_MAX_LEN, TEXT_MAX_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaPackage {
    pub id: u32,
    pub index: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Price in cents
    pub price: u64,
    #[serde(default)]
    pub treatment_ids: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaPackageDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub treatment_ids: Vec<u32>,
}

impl Entity for SpaPackage {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Orderable for SpaPackage {
    fn index(&self) -> u32 {
        self.index
    }

    fn set_index(&mut self, index: u32) {
        self.index = index;
    }
}

impl Draft for SpaPackageDraft {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Rules::new()
            .required("name", &self.name, NAME_MAX_LEN)
            .max_len("description", self.description.as_deref().unwrap_or(""), TEXT_MAX_LEN)
            .check(
                "treatmentIds",
                !self.treatment_ids.is_empty(),
                "must include at least one treatment",
            )
            .finish()
    }

    fn from_form(values: &FormValues) -> Result<Self, Vec<FieldError>> {
        let mut form = FormReader::new(values);
        let draft = SpaPackageDraft {
            name: form.text("name"),
            description: form.optional_text("description"),
            price: form.cents("price"),
            treatment_ids: form.numbers("treatmentIds"),
        };
        form.finish(draft)
    }

    fn to_form(&self) -> FormValues {
        let ids: Vec<String> = self.treatment_ids.iter().map(u32::to_string).collect();
        FormValues::new()
            .with("name", self.name.clone())
            .with("description", self.description.clone().unwrap_or_default())
            .with("price", format_cents(self.price))
            .with("treatmentIds", ids.join(", "))
    }
}

impl Resource for SpaPackage {
    const COLLECTION: &'static str = "spa-packages";
    const LABEL: &'static str = "Spa package";

    type Draft = SpaPackageDraft;

    fn from_draft(id: u32, index: u32, draft: &SpaPackageDraft) -> Self {
        SpaPackage {
            id,
            index,
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price,
            treatment_ids: draft.treatment_ids.clone(),
        }
    }

    fn apply_draft(&mut self, draft: &SpaPackageDraft) {
        self.name = draft.name.clone();
        self.description = draft.description.clone();
        self.price = draft.price;
        self.treatment_ids = draft.treatment_ids.clone();
    }

    fn to_draft(&self) -> SpaPackageDraft {
        SpaPackageDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            treatment_ids: self.treatment_ids.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_needs_treatments() {
        let values = FormValues::new().with("name", "Bali Bliss").with("price", "120");
        let errors = SpaPackageDraft::from_form(&values).unwrap_err();
        assert_eq!(errors[0].field, "treatmentIds");
    }
}
