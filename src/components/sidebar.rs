use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{AppStateStoreFields, Section};

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    view! {
        <nav class="sidebar">
            <div class="sidebar-header">
                <h1>"Layana"</h1>
                <Show when=move || ctx.store.demo_mode().get()>
                    <span class="demo-badge" title="No API configured; changes live in memory">"demo"</span>
                </Show>
            </div>

            <ul class="section-list">
                {Section::ALL
                    .iter()
                    .map(|&entry| {
                        let is_active = move || ctx.store.section().get() == entry;
                        view! {
                            <li
                                class=move || if is_active() { "section-item active" } else { "section-item" }
                                on:click=move |_| ctx.store.section().set(entry)
                            >
                                {entry.label()}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>

            <button
                class="activity-toggle"
                on:click=move |_| ctx.store.show_activity().update(|v| *v = !*v)
            >
                {move || if ctx.store.show_activity().get() { "Hide activity" } else { "Show activity" }}
            </button>
        </nav>
    }
}
