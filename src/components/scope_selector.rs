//! Scope Selector
//!
//! Picks the parent row (location, treatment) a scoped collection is shown
//! and reordered in. Selects the first parent once the list arrives.

use leptos::prelude::*;
use leptos::task::spawn_local;

use layana_core::{ApiResult, CollectionApi, Entity};

use crate::api::Api;
use crate::context::use_app_context;
use crate::store::NoticeLevel;
use crate::views::EntityView;

/// Every row of `api`, in persisted order
pub async fn load_all<P: EntityView>(api: &dyn CollectionApi<P>) -> ApiResult<Vec<P>> {
    let count = api.count(None).await?;
    api.list_all(count, None).await
}

#[component]
pub fn ScopeSelector<P: EntityView>(
    api: Api<P>,
    label: &'static str,
    selected: RwSignal<Option<u32>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let api = StoredValue::new_local(api);
    let options = RwSignal::new(Vec::<(u32, String)>::new());

    Effect::new(move |_| {
        let api = api.get_value();
        spawn_local(async move {
            match load_all(api.as_ref()).await {
                Ok(rows) => {
                    if selected.get_untracked().is_none() {
                        selected.set(rows.first().map(|row| row.id()));
                    }
                    options.set(rows.iter().map(|row| (row.id(), row.title())).collect());
                }
                Err(e) => ctx.notify(NoticeLevel::Error, format!("Loading {} failed: {}", P::TITLE, e)),
            }
        });
    });

    view! {
        <label class="scope-selector">
            <span class="scope-label">{label}</span>
            <select
                prop:value=move || selected.get().map(|id| id.to_string()).unwrap_or_default()
                on:change=move |ev| selected.set(event_target_value(&ev).parse().ok())
            >
                <For
                    each=move || options.get()
                    key=|(id, _)| *id
                    children=move |(id, title)| {
                        view! {
                            <option value=id.to_string() selected=move || selected.get() == Some(id)>
                                {title}
                            </option>
                        }
                    }
                />
            </select>
        </label>
    }
}
