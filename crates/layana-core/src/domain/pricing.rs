//! Pricing Row Entity
//!
//! One line of a treatment's pricing table (duration + price), ordered per
//! treatment.

use serde::{Deserialize, Serialize};

use super::entity::{Draft, Entity, Orderable, Resource};
use super::validation::{format_cents, FieldError, FormReader, FormValues, Rules, NAME_MAX_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRow {
    pub id: u32,
    pub index: u32,
    pub treatment_id: u32,
    pub label: String,
    pub duration_minutes: u32,
    /// Price in cents
    pub price: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRowDraft {
    pub treatment_id: u32,
    pub label: String,
    pub duration_minutes: u32,
    pub price: u64,
}

impl Entity for PricingRow {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Orderable for PricingRow {
    fn index(&self) -> u32 {
        self.index
    }

    fn set_index(&mut self, index: u32) {
        self.index = index;
    }
}

impl Draft for PricingRowDraft {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Rules::new()
            .scope("treatmentId", self.treatment_id)
            .required("label", &self.label, NAME_MAX_LEN)
            .positive("durationMinutes", self.duration_minutes)
            .finish()
    }

    fn from_form(values: &FormValues) -> Result<Self, Vec<FieldError>> {
        let mut form = FormReader::new(values);
        let draft = PricingRowDraft {
            treatment_id: form.optional_number("treatmentId").unwrap_or(0),
            label: form.text("label"),
            duration_minutes: form.number("durationMinutes"),
            price: form.cents("price"),
        };
        form.finish(draft)
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("treatmentId", self.treatment_id.to_string())
            .with("label", self.label.clone())
            .with("durationMinutes", self.duration_minutes.to_string())
            .with("price", format_cents(self.price))
    }

    fn scope_id(&self) -> Option<u32> {
        Some(self.treatment_id)
    }
}

impl Resource for PricingRow {
    const COLLECTION: &'static str = "pricing-rows";
    const LABEL: &'static str = "Pricing row";
    const SCOPE_KEY: Option<&'static str> = Some("treatmentId");

    type Draft = PricingRowDraft;

    fn scope_id(&self) -> Option<u32> {
        Some(self.treatment_id)
    }

    fn from_draft(id: u32, index: u32, draft: &PricingRowDraft) -> Self {
        PricingRow {
            id,
            index,
            treatment_id: draft.treatment_id,
            label: draft.label.clone(),
            duration_minutes: draft.duration_minutes,
            price: draft.price,
        }
    }

    fn apply_draft(&mut self, draft: &PricingRowDraft) {
        self.treatment_id = draft.treatment_id;
        self.label = draft.label.clone();
        self.duration_minutes = draft.duration_minutes;
        self.price = draft.price;
    }

    fn to_draft(&self) -> PricingRowDraft {
        PricingRowDraft {
            treatment_id: self.treatment_id,
            label: self.label.clone(),
            duration_minutes: self.duration_minutes,
            price: self.price,
        }
    }
}
