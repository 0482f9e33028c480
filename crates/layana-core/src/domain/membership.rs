//! Membership Entity

use serde::{Deserialize, Serialize};

use super::entity::{Draft, Entity, Orderable, Resource};
use super::validation::{format_cents, FieldError, FormReader, FormValues, Rules, NAME_MAX_LEN};

/// A membership plan sold at the front desk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: u32,
    pub index: u32,
    pub name: String,
    /// Price in cents
    pub price: u64,
    pub duration_months: u32,
    #[serde(default)]
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipDraft {
    pub name: String,
    pub price: u64,
    pub duration_months: u32,
    pub benefits: Vec<String>,
}

impl Entity for Membership {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Orderable for Membership {
    fn index(&self) -> u32 {
        self.index
    }

    fn set_index(&mut self, index: u32) {
        self.index = index;
    }
}

impl Draft for MembershipDraft {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut rules = Rules::new();
        rules
            .required("name", &self.name, NAME_MAX_LEN)
            .positive("durationMonths", self.duration_months);
        for benefit in &self.benefits {
            rules.max_len("benefits", benefit, NAME_MAX_LEN);
        }
        rules.finish()
    }

    fn from_form(values: &FormValues) -> Result<Self, Vec<FieldError>> {
        let mut form = FormReader::new(values);
        let draft = MembershipDraft {
            name: form.text("name"),
            price: form.cents("price"),
            duration_months: form.number("durationMonths"),
            benefits: form.lines("benefits"),
        };
        form.finish(draft)
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.clone())
            .with("price", format_cents(self.price))
            .with("durationMonths", self.duration_months.to_string())
            .with("benefits", self.benefits.join("\n"))
    }
}

impl Resource for Membership {
    const COLLECTION: &'static str = "memberships";
    const LABEL: &'static str = "Membership";

    type Draft = MembershipDraft;

    fn from_draft(id: u32, index: u32, draft: &MembershipDraft) -> Self {
        Membership {
            id,
            index,
            name: draft.name.clone(),
            price: draft.price,
            duration_months: draft.duration_months,
            benefits: draft.benefits.clone(),
        }
    }

    fn apply_draft(&mut self, draft: &MembershipDraft) {
        self.name = draft.name.clone();
        self.price = draft.price;
        self.duration_months = draft.duration_months;
        self.benefits = draft.benefits.clone();
    }

    fn to_draft(&self) -> MembershipDraft {
        MembershipDraft {
            name: self.name.clone(),
            price: self.price,
            duration_months: self.duration_months,
            benefits: self.benefits.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benefits_round_trip_through_form() {
        let draft = MembershipDraft {
            name: "Gold".to_string(),
            price: 150_000,
            duration_months: 12,
            benefits: vec!["Monthly massage".to_string(), "10% off".to_string()],
        };
        let parsed = MembershipDraft::from_form(&draft.to_form()).unwrap();
        assert_eq!(parsed, draft);
    }
}
