//! Domain Layer
//!
//! Orderable entities managed by the dashboard, their drafts and the
//! form validation shared by every editor.

mod entity;
mod validation;
mod treatment;
mod team_member;
mod category;
mod faq;
mod location;
mod pricing;
mod membership;
mod spa_package;

pub use entity::{Draft, Entity, Orderable, Resource};
pub use validation::{
    error_for, format_cents, parse_cents, FieldError, FormReader, FormValues, Rules,
    NAME_MAX_LEN, TEXT_MAX_LEN,
};
pub use treatment::{Treatment, TreatmentDraft};
pub use team_member::{TeamMember, TeamMemberDraft};
pub use category::{slugify, Category, CategoryDraft};
pub use faq::{Faq, FaqDraft};
pub use location::{Location, LocationDraft};
pub use pricing::{PricingRow, PricingRowDraft};
pub use membership::{Membership, MembershipDraft};
pub use spa_package::{SpaPackage, SpaPackageDraft};
