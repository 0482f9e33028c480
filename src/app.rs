//! Layana Admin App
//!
//! Sidebar navigation, the active section's table and an optional activity
//! panel, with toasts on top.

use leptos::prelude::*;
use reactive_stores::Store;

use layana_core::ClientConfig;

use crate::api::Backends;
use crate::components::{ActivityLog, Sidebar, Toasts};
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields, AppStore, NoticeLevel};
use crate::views::SectionView;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    let backends = Backends::connect(&config);
    let store: AppStore = Store::new(AppState {
        demo_mode: backends.demo,
        ..Default::default()
    });

    let demo = backends.demo;
    let ctx = AppContext::new(config, backends, store);
    provide_context(ctx);

    if demo {
        ctx.notify(NoticeLevel::Info, "Demo mode: changes are kept in this tab only");
    }

    view! {
        <div class="app-layout">
            <Sidebar />

            <main class="main-content">
                <SectionView />
            </main>

            <Show when=move || store.show_activity().get()>
                <ActivityLog />
            </Show>

            <Toasts />
        </div>
    }
}
