//! Site content collections: locations, their team and the FAQ.

use layana_core::domain::{Faq, Location, TeamMember};
use layana_core::FormValues;

use super::{Column, EntityView, FieldKind, FieldSpec};

impl EntityView for Location {
    const TITLE: &'static str = "Locations";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::sortable("name", "Name"),
            Column::sortable("address", "Address"),
            Column::plain("phone", "Phone"),
            Column::plain("openingHours", "Hours"),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.address.clone(),
            self.phone.clone().unwrap_or_default(),
            self.opening_hours.clone().unwrap_or_default(),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("name", "Name", FieldKind::Text),
            FieldSpec::new("address", "Address", FieldKind::Text),
            FieldSpec::new("phone", "Phone", FieldKind::Text),
            FieldSpec::new("openingHours", "Opening hours", FieldKind::Text),
        ];
        FIELDS
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}

impl EntityView for TeamMember {
    const TITLE: &'static str = "Team";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::sortable("name", "Name"),
            Column::sortable("role", "Role"),
            Column::sortable("isActive", "Active"),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.role.clone(),
            if self.is_active { "Yes" } else { "No" }.to_string(),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("locationId", "Location", FieldKind::Scope),
            FieldSpec::new("name", "Name", FieldKind::Text),
            FieldSpec::new("role", "Role", FieldKind::Text),
            FieldSpec::new("bio", "Bio", FieldKind::TextArea),
            FieldSpec::new("isActive", "Active", FieldKind::Checkbox),
        ];
        FIELDS
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn blank_form() -> FormValues {
        FormValues::new().with("isActive", "true")
    }
}

impl EntityView for Faq {
    const TITLE: &'static str = "FAQ";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::sortable("question", "Question"),
            Column::plain("answer", "Answer"),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        let mut answer: String = self.answer.chars().take(80).collect();
        if self.answer.chars().count() > 80 {
            answer.push('…');
        }
        vec![self.question.clone(), answer]
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("question", "Question", FieldKind::Text),
            FieldSpec::new("answer", "Answer", FieldKind::TextArea),
        ];
        FIELDS
    }

    fn title(&self) -> String {
        self.question.clone()
    }
}
