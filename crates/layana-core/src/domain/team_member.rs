//! Team Member Entity
//!
//! Therapists and staff, ordered per location (branch).

use serde::{Deserialize, Serialize};

use super::entity::{Draft, Entity, Orderable, Resource};
use super::validation::{FieldError, FormReader, FormValues, Rules, NAME_MAX_LEN, TEXT_MAX_LEN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: u32,
    pub index: u32,
    pub location_id: u32,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDraft {
    pub location_id: u32,
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    pub is_active: bool,
}

impl Entity for TeamMember {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Orderable for TeamMember {
    fn index(&self) -> u32 {
        self.index
    }

    fn set_index(&mut self, index: u32) {
        self.index = index;
    }
}

impl Draft for TeamMemberDraft {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Rules::new()
            .scope("locationId", self.location_id)
            .required("name", &self.name, NAME_MAX_LEN)
            .required("role", &self.role, NAME_MAX_LEN)
            .max_len("bio", self.bio.as_deref().unwrap_or(""), TEXT_MAX_LEN)
            .finish()
    }

    fn from_form(values: &FormValues) -> Result<Self, Vec<FieldError>> {
        let mut form = FormReader::new(values);
        let draft = TeamMemberDraft {
            location_id: form.optional_number("locationId").unwrap_or(0),
            name: form.text("name"),
            role: form.text("role"),
            bio: form.optional_text("bio"),
            is_active: form.flag("isActive"),
        };
        form.finish(draft)
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("locationId", self.location_id.to_string())
            .with("name", self.name.clone())
            .with("role", self.role.clone())
            .with("bio", self.bio.clone().unwrap_or_default())
            .with("isActive", self.is_active.to_string())
    }

    fn scope_id(&self) -> Option<u32> {
        Some(self.location_id)
    }
}

impl Resource for TeamMember {
    const COLLECTION: &'static str = "team-members";
    const LABEL: &'static str = "Team member";
    const SCOPE_KEY: Option<&'static str> = Some("locationId");

    type Draft = TeamMemberDraft;

    fn scope_id(&self) -> Option<u32> {
        Some(self.location_id)
    }

    fn from_draft(id: u32, index: u32, draft: &TeamMemberDraft) -> Self {
        TeamMember {
            id,
            index,
            location_id: draft.location_id,
            name: draft.name.clone(),
            role: draft.role.clone(),
            bio: draft.bio.clone(),
            is_active: draft.is_active,
        }
    }

    fn apply_draft(&mut self, draft: &TeamMemberDraft) {
        self.location_id = draft.location_id;
        self.name = draft.name.clone();
        self.role = draft.role.clone();
        self.bio = draft.bio.clone();
        self.is_active = draft.is_active;
    }

    fn to_draft(&self) -> TeamMemberDraft {
        TeamMemberDraft {
            location_id: self.location_id,
            name: self.name.clone(),
            role: self.role.clone(),
            bio: self.bio.clone(),
            is_active: self.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_requires_location() {
        let values = FormValues::new().with("name", "Ayu").with("role", "Therapist");
        let errors = TeamMemberDraft::from_form(&values).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "locationId"));
    }
}
