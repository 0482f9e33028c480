//! Treatment Entity
//!
//! A bookable massage/spa treatment shown on the price list.

use serde::{Deserialize, Serialize};

use super::entity::{Draft, Entity, Orderable, Resource};
use super::validation::{format_cents, FieldError, FormReader, FormValues, Rules, NAME_MAX_LEN, TEXT_MAX_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub id: u32,
    pub index: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub duration_minutes: u32,
    /// Price in cents
    pub price: u64,
    #[serde(default)]
    pub category_id: Option<u32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentDraft {
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
    pub price: u64,
    pub category_id: Option<u32>,
    pub is_active: bool,
}

impl Entity for Treatment {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Orderable for Treatment {
    fn index(&self) -> u32 {
        self.index
    }

    fn set_index(&mut self, index: u32) {
        self.index = index;
    }
}

impl Draft for TreatmentDraft {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Rules::new()
            .required("name", &self.name, NAME_MAX_LEN)
            .max_len("description", &self.description, TEXT_MAX_LEN)
            .positive("durationMinutes", self.duration_minutes)
            .finish()
    }

    fn from_form(values: &FormValues) -> Result<Self, Vec<FieldError>> {
        let mut form = FormReader::new(values);
        let draft = TreatmentDraft {
            name: form.text("name"),
            description: form.text("description"),
            duration_minutes: form.number("durationMinutes"),
            price: form.cents("price"),
            category_id: form.optional_number("categoryId"),
            is_active: form.flag("isActive"),
        };
        form.finish(draft)
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.clone())
            .with("description", self.description.clone())
            .with("durationMinutes", self.duration_minutes.to_string())
            .with("price", format_cents(self.price))
            .with("categoryId", self.category_id.map(|c| c.to_string()).unwrap_or_default())
            .with("isActive", self.is_active.to_string())
    }
}

impl Resource for Treatment {
    const COLLECTION: &'static str = "treatments";
    const LABEL: &'static str = "Treatment";

    type Draft = TreatmentDraft;

    fn from_draft(id: u32, index: u32, draft: &TreatmentDraft) -> Self {
        let mut treatment = Treatment {
            id,
            index,
            name: String::new(),
            description: String::new(),
            duration_minutes: 0,
            price: 0,
            category_id: None,
            is_active: true,
        };
        treatment.apply_draft(draft);
        treatment
    }

    fn apply_draft(&mut self, draft: &TreatmentDraft) {
        self.name = draft.name.clone();
        self.description = draft.description.clone();
        self.duration_minutes = draft.duration_minutes;
        self.price = draft.price;
        self.category_id = draft.category_id;
        self.is_active = draft.is_active;
    }

    fn to_draft(&self) -> TreatmentDraft {
        TreatmentDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            duration_minutes: self.duration_minutes,
            price: self.price,
            category_id: self.category_id,
            is_active: self.is_active,
        }
    }
}
