//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. List data is
//! per view and lives in the views themselves; only app-wide state is here.

use leptos::prelude::*;
use reactive_stores::Store;

/// Dashboard sections, one per managed collection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Treatments,
    PricingRows,
    Categories,
    SpaPackages,
    Memberships,
    Locations,
    TeamMembers,
    Faqs,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Treatments,
        Section::PricingRows,
        Section::Categories,
        Section::SpaPackages,
        Section::Memberships,
        Section::Locations,
        Section::TeamMembers,
        Section::Faqs,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Treatments => "Treatments",
            Section::PricingRows => "Pricing",
            Section::Categories => "Categories",
            Section::SpaPackages => "Spa Packages",
            Section::Memberships => "Memberships",
            Section::Locations => "Locations",
            Section::TeamMembers => "Team",
            Section::Faqs => "FAQ",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    pub fn class(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "toast info",
            NoticeLevel::Success => "toast success",
            NoticeLevel::Error => "toast error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub section: Section,
    /// Toasts on screen, oldest first
    pub notices: Vec<Notice>,
    pub next_notice_id: u64,
    /// Running on in-memory demo data
    pub demo_mode: bool,
    pub show_activity: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

// ========================
// Store Helper Functions
// ========================

/// Add a notice and return its id
pub fn store_push_notice(store: &AppStore, level: NoticeLevel, message: String) -> u64 {
    let id = store.next_notice_id().get_untracked() + 1;
    store.next_notice_id().set(id);
    store.notices().write().push(Notice { id, level, message });
    id
}

/// Remove a notice by ID; unknown ids are ignored
pub fn store_dismiss_notice(store: &AppStore, id: u64) {
    store.notices().write().retain(|n| n.id != id);
}
