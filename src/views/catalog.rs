//! Catalog collections: treatments, their pricing rows, categories,
//! packages and memberships.

use layana_core::domain::{
    format_cents, Category, Membership, PricingRow, SpaPackage, Treatment,
};
use layana_core::FormValues;

use super::{Column, EntityView, FieldKind, FieldSpec};

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

impl EntityView for Treatment {
    const TITLE: &'static str = "Treatments";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::sortable("name", "Name"),
            Column::sortable("durationMinutes", "Minutes"),
            Column::sortable("price", "Price"),
            Column::plain("categoryId", "Category"),
            Column::sortable("isActive", "Active"),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.duration_minutes.to_string(),
            format_cents(self.price),
            self.category_id.map(|c| format!("#{}", c)).unwrap_or_default(),
            yes_no(self.is_active),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("name", "Name", FieldKind::Text),
            FieldSpec::new("description", "Description", FieldKind::TextArea),
            FieldSpec::new("durationMinutes", "Duration (minutes)", FieldKind::Number),
            FieldSpec::new("price", "Price", FieldKind::Money),
            FieldSpec::new("categoryId", "Category id", FieldKind::Number),
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

impl EntityView for PricingRow {
    const TITLE: &'static str = "Pricing";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::sortable("label", "Label"),
            Column::sortable("durationMinutes", "Minutes"),
            Column::sortable("price", "Price"),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.label.clone(),
            self.duration_minutes.to_string(),
            format_cents(self.price),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("treatmentId", "Treatment", FieldKind::Scope),
            FieldSpec::new("label", "Label", FieldKind::Text),
            FieldSpec::new("durationMinutes", "Duration (minutes)", FieldKind::Number),
            FieldSpec::new("price", "Price", FieldKind::Money),
        ];
        FIELDS
    }

    fn title(&self) -> String {
        self.label.clone()
    }
}

impl EntityView for Category {
    const TITLE: &'static str = "Categories";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[Column::sortable("name", "Name"), Column::sortable("slug", "Slug")];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.slug.clone()]
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("name", "Name", FieldKind::Text),
            FieldSpec::new("slug", "Slug (blank to derive from name)", FieldKind::Text),
        ];
        FIELDS
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}

impl EntityView for SpaPackage {
    const TITLE: &'static str = "Spa Packages";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::sortable("name", "Name"),
            Column::sortable("price", "Price"),
            Column::plain("treatmentIds", "Treatments"),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        let ids: Vec<String> = self.treatment_ids.iter().map(|id| format!("#{}", id)).collect();
        vec![self.name.clone(), format_cents(self.price), ids.join(", ")]
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("name", "Name", FieldKind::Text),
            FieldSpec::new("description", "Description", FieldKind::TextArea),
            FieldSpec::new("price", "Price", FieldKind::Money),
            FieldSpec::new("treatmentIds", "Treatment ids (comma separated)", FieldKind::Text),
        ];
        FIELDS
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}

impl EntityView for Membership {
    const TITLE: &'static str = "Memberships";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            Column::sortable("name", "Name"),
            Column::sortable("price", "Price"),
            Column::sortable("durationMonths", "Months"),
            Column::plain("benefits", "Benefits"),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            format_cents(self.price),
            self.duration_months.to_string(),
            self.benefits.join(" · "),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::new("name", "Name", FieldKind::Text),
            FieldSpec::new("price", "Price", FieldKind::Money),
            FieldSpec::new("durationMonths", "Duration (months)", FieldKind::Number),
            FieldSpec::new("benefits", "Benefits", FieldKind::Lines),
        ];
        FIELDS
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}
