//! Section pages: which table (and scope selector) each sidebar entry shows.

use leptos::prelude::*;

use crate::api::Api;
use crate::components::{OrderableTable, ScopeSelector};
use crate::context::use_app_context;
use crate::store::{AppStateStoreFields, Section};
use crate::views::EntityView;

/// A scoped collection under its parent selector
#[component]
fn ScopedSection<P: EntityView, T: EntityView>(
    parent_api: Api<P>,
    api: Api<T>,
    label: &'static str,
) -> impl IntoView {
    let selected = RwSignal::new(None::<u32>);

    view! {
        <div class="scoped-section">
            <ScopeSelector api=parent_api label=label selected=selected />
            <OrderableTable api=api scope=selected />
        </div>
    }
}

/// The active section. Switching sections drops the previous view and
/// with it its page, search and sort state.
#[component]
pub fn SectionView() -> impl IntoView {
    let ctx = use_app_context();

    move || {
        let backends = ctx.backends();
        match ctx.store.section().get() {
            Section::Treatments => view! { <OrderableTable api=backends.treatments /> }.into_any(),
            Section::PricingRows => view! {
                <ScopedSection parent_api=backends.treatments api=backends.pricing_rows label="Treatment" />
            }
            .into_any(),
            Section::Categories => view! { <OrderableTable api=backends.categories /> }.into_any(),
            Section::SpaPackages => view! { <OrderableTable api=backends.spa_packages /> }.into_any(),
            Section::Memberships => view! { <OrderableTable api=backends.memberships /> }.into_any(),
            Section::Locations => view! { <OrderableTable api=backends.locations /> }.into_any(),
            Section::TeamMembers => view! {
                <ScopedSection parent_api=backends.locations api=backends.team_members label="Location" />
            }
            .into_any(),
            Section::Faqs => view! { <OrderableTable api=backends.faqs /> }.into_any(),
        }
    }
}
