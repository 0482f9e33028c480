//! Location Entity
//!
//! A spa branch. Team members are ordered per location.

use serde::{Deserialize, Serialize};

use super::entity::{Draft, Entity, Orderable, Resource};
use super::validation::{FieldError, FormReader, FormValues, Rules, NAME_MAX_LEN, TEXT_MAX_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: u32,
    pub index: u32,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDraft {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
}

impl Entity for Location {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Orderable for Location {
    fn index(&self) -> u32 {
        self.index
    }

    fn set_index(&mut self, index: u32) {
        self.index = index;
    }
}

impl Draft for LocationDraft {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let phone = self.phone.as_deref().unwrap_or("");
        Rules::new()
            .required("name", &self.name, NAME_MAX_LEN)
            .required("address", &self.address, TEXT_MAX_LEN)
            .check(
                "phone",
                phone
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')')),
                "may only contain digits, spaces and + - ( )",
            )
            .max_len("openingHours", self.opening_hours.as_deref().unwrap_or(""), NAME_MAX_LEN)
            .finish()
    }

    fn from_form(values: &FormValues) -> Result<Self, Vec<FieldError>> {
        let mut form = FormReader::new(values);
        let draft = LocationDraft {
            name: form.text("name"),
            address: form.text("address"),
            phone: form.optional_text("phone"),
            opening_hours: form.optional_text("openingHours"),
        };
        form.finish(draft)
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.clone())
            .with("address", self.address.clone())
            .with("phone", self.phone.clone().unwrap_or_default())
            .with("openingHours", self.opening_hours.clone().unwrap_or_default())
    }
}

impl Resource for Location {
    const COLLECTION: &'static str = "locations";
    const LABEL: &'static str = "Location";

    type Draft = LocationDraft;

    fn from_draft(id: u32, index: u32, draft: &LocationDraft) -> Self {
        Location {
            id,
            index,
            name: draft.name.clone(),
            address: draft.address.clone(),
            phone: draft.phone.clone(),
            opening_hours: draft.opening_hours.clone(),
        }
    }

    fn apply_draft(&mut self, draft: &LocationDraft) {
        self.name = draft.name.clone();
        self.address = draft.address.clone();
        self.phone = draft.phone.clone();
        self.opening_hours = draft.opening_hours.clone();
    }

    fn to_draft(&self) -> LocationDraft {
        LocationDraft {
            name: self.name.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            opening_hours: self.opening_hours.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_format() {
        let values = FormValues::new()
            .with("name", "Seminyak")
            .with("address", "Jl. Kayu Aya 1")
            .with("phone", "+62 (361) 555-0101");
        assert!(LocationDraft::from_form(&values).is_ok());

        let values = values.with("phone", "call us");
        let errors = LocationDraft::from_form(&values).unwrap_err();
        assert_eq!(errors[0].field, "phone");
    }
}
