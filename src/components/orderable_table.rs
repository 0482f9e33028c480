//! Orderable Table Component
//!
//! Paginated, searchable, sortable table for one collection, with
//! drag-and-drop reordering (mouse and keyboard) through leptos-dragdrop.
//! A drop splices the visible page right away, then persists the new
//! global order and refreshes the page from the server.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use gloo_timers::future::TimeoutFuture;
use layana_core::delete_flow::delete_and_refresh;
use layana_core::{
    rows_that_fit, CollectionApi, DeleteFlow, DeleteOutcome, Entity, ListState, PageQuery,
    ReorderController, Scope, SearchDebounce, SortDirection,
};
use leptos_dragdrop::*;

use crate::api::Api;
use crate::components::{DeleteConfirmButton, EditTarget, EntityForm};
use crate::context::use_app_context;
use crate::store::NoticeLevel;
use crate::views::{Column, EntityView};

#[component]
pub fn OrderableTable<T: EntityView>(
    api: Api<T>,
    /// Selected parent for scoped collections; nothing loads until one is set
    #[prop(optional, into)]
    scope: Option<Signal<Option<u32>>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let api = StoredValue::new_local(api);
    let min_rows = ctx.config.with_value(|c| c.min_page_size);

    let state = RwSignal::new(ListState::<T>::new(min_rows));
    let loading = RwSignal::new(false);
    let reload = RwSignal::new(0u32);
    let delete_flow = RwSignal::new(DeleteFlow::<u32>::new());
    let editing = RwSignal::new(None::<EditTarget<T>>);
    let search_text = RwSignal::new(String::new());
    let debounce = StoredValue::new(SearchDebounce::new());

    let scoped = T::SCOPE_KEY.is_some();
    if let Some(scope) = scope {
        Effect::new(move |_| {
            let scope = scope.get().and_then(Scope::of::<T>);
            state.update(|s| s.set_scope(scope));
            editing.set(None);
        });
    }

    // ========================
    // Loading
    // ========================

    let query = Memo::new(move |_| state.with(|s| s.query()));

    let load = move |query: PageQuery| {
        let api = api.get_value();
        loading.set(true);
        spawn_local(async move {
            match api.list_page(&query).await {
                Ok(page) => state.update(|s| s.apply_loaded(query, page)),
                Err(e) => ctx.notify(NoticeLevel::Error, format!("Loading {} failed: {}", T::TITLE, e)),
            }
            loading.set(false);
        });
    };

    // A bumped `reload` forces a fetch; otherwise a query whose page is
    // already on screen (e.g. after a delete refresh) is not fetched again.
    Effect::new(move |prev: Option<u32>| {
        let generation = reload.get();
        let query = query.get();
        let forced = prev != Some(generation);
        if scoped && query.scope.is_none() {
            return generation;
        }
        if forced || !state.with_untracked(|s| s.is_loaded(&query)) {
            load(query);
        }
        generation
    });

    // ========================
    // Row sizing
    // ========================

    let container = NodeRef::<leptos::html::Div>::new();
    let measure = move || {
        let Some(el) = container.get_untracked() else {
            return;
        };
        let height = el.get_bounding_client_rect().height();
        let rows = ctx.config.with_value(|c| {
            rows_that_fit(height, c.header_height_px, c.row_height_px, c.min_page_size)
        });
        if state.with_untracked(|s| s.page_size != rows) {
            tracing::debug!(collection = T::COLLECTION, rows, "page size from container");
            state.update(|s| {
                s.set_page_size(rows);
            });
        }
    };
    Effect::new(move |_| {
        if container.get().is_some() {
            measure();
        }
    });
    let resize = window_event_listener(ev::resize, move |_| measure());
    on_cleanup(move || resize.remove());

    // ========================
    // Search
    // ========================

    let on_search = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        search_text.set(text.clone());
        let ticket = debounce.try_update_value(|d| d.input()).unwrap_or_default();
        let delay = ctx.config.with_value(|c| c.search_debounce_ms);
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            if debounce.try_with_value(|d| d.settle(ticket)).unwrap_or(false) {
                state.update(|s| s.set_search(&text));
            }
        });
    };

    // ========================
    // Drag and drop
    // ========================

    let dnd = create_dnd_signals();
    let reorder_enabled = move || state.with(|s| s.reorder_enabled());

    let on_drop = move |active: u32, over: u32| {
        let controller: ReorderController<T, dyn CollectionApi<T>> =
            ReorderController::new(api.get_value());
        let Some(last_server_page) = state
            .try_update(|s| controller.start(&mut s.items, active, over))
            .flatten()
        else {
            return;
        };
        let query = state.with_untracked(|s| s.query());

        spawn_local(async move {
            let report = controller.commit(active, over, &query).await;
            state.update(|s| {
                if let Some(pagination) = controller.finish(&mut s.items, last_server_page, &report) {
                    s.pagination = Some(pagination);
                }
            });
            if let Some(Err(e)) = &report.refreshed {
                ctx.notify(NoticeLevel::Error, format!("Refreshing {} failed: {}", T::TITLE, e));
            }
            if let Some(notice) = report.outcome.notice() {
                ctx.notify(NoticeLevel::Error, notice);
            }
        });
    };
    bind_global_listeners(dnd, on_drop);

    let row_ids = move || state.with_untracked(|s| s.items.iter().map(|row| row.id()).collect::<Vec<u32>>());

    // ========================
    // Delete and edit
    // ========================

    let on_delete = Callback::new(move |id: u32| {
        let api = api.get_value();
        let snapshot = state.get_untracked();
        spawn_local(async move {
            match delete_and_refresh(api.as_ref(), &snapshot, id).await {
                DeleteOutcome::Deleted { query, refreshed } => {
                    match refreshed {
                        Ok(fresh) => state.update(|s| s.show_after_delete(query, fresh)),
                        Err(e) => {
                            // The load effect retries when the page moved
                            state.update(|s| s.page = query.page);
                            ctx.notify(NoticeLevel::Error, format!("Refreshing {} failed: {}", T::TITLE, e));
                        }
                    }
                    ctx.notify(NoticeLevel::Success, format!("{} deleted", T::LABEL));
                }
                DeleteOutcome::Failed(e) => {
                    ctx.notify(NoticeLevel::Error, format!("Deleting {} failed: {}", T::LABEL, e));
                }
            }
        });
    });

    let on_saved = Callback::new(move |_row: T| {
        editing.set(None);
        reload.update(|n| *n += 1);
    });
    let on_cancel = Callback::new(move |_: ()| editing.set(None));

    // ========================
    // View
    // ========================

    let header = T::columns()
        .iter()
        .map(|column| {
            let Column { field, label, sortable } = *column;
            let indicator = move || {
                state.with(|s| match (s.sort_by.as_deref() == Some(field), s.sort_direction) {
                    (true, SortDirection::Asc) => " ▲",
                    (true, SortDirection::Desc) => " ▼",
                    (false, _) => "",
                })
            };
            view! {
                <th
                    class=if sortable { "sortable" } else { "" }
                    on:click=move |_| {
                        if sortable {
                            state.update(|s| s.toggle_sort(field));
                        }
                    }
                >
                    {label}
                    {indicator}
                </th>
            }
        })
        .collect_view();

    view! {
        <section class="entity-view">
            <header class="entity-toolbar">
                <h2>{T::TITLE}</h2>
                <input
                    type="search"
                    class="search-box"
                    placeholder="Search…"
                    prop:value=move || search_text.get()
                    on:input=on_search
                />
                <button
                    class="new-btn"
                    disabled=move || scoped && state.with(|s| s.scope.is_none())
                    on:click=move |_| editing.set(Some(EditTarget::Create))
                >
                    {format!("New {}", T::LABEL)}
                </button>
            </header>

            {move || {
                editing
                    .get()
                    .map(|target| {
                        let scope_id = state.with_untracked(|s| s.scope.map(|scope| scope.id));
                        view! {
                            <EntityForm
                                target=target
                                api=api
                                scope_id=scope_id
                                on_saved=on_saved
                                on_cancel=on_cancel
                            />
                        }
                    })
            }}

            <Show when=move || !reorder_enabled()>
                <p class="hint">"Clear search and sorting to reorder rows."</p>
            </Show>

            <div class="table-container" node_ref=container>
                <table class=move || {
                    let mut c = String::from("entity-table");
                    if loading.get() { c.push_str(" loading"); }
                    if dnd.active() { c.push_str(" dnd-active"); }
                    c
                }>
                    <thead>
                        <tr>
                            <th class="drag-handle-cell"></th>
                            {header}
                            <th class="row-actions"></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || state.with(|s| s.items.clone())
                            key=|row| (row.id(), row.cells())
                            children=move |row| {
                                let id = row.id();
                                let cells = row.cells();
                                let title = row.title();

                                let on_mousedown = make_on_mousedown(dnd, id);
                                let on_mouseenter = make_on_item_mouseenter(dnd, id);
                                let on_keydown = make_on_handle_keydown(dnd, id, row_ids, on_drop);

                                let row_class = move || {
                                    let mut c = String::from("entity-row");
                                    if dnd.is_dragging(id) { c.push_str(" dragging"); }
                                    if dnd.is_over(id) { c.push_str(" drop-target"); }
                                    c
                                };

                                view! {
                                    <tr
                                        class=row_class
                                        on:mousedown=move |ev| {
                                            if reorder_enabled() {
                                                on_mousedown(ev);
                                            }
                                        }
                                        on:mouseenter=on_mouseenter
                                    >
                                        <td class="drag-handle-cell">
                                            <span
                                                class=move || if reorder_enabled() { "drag-handle" } else { "drag-handle disabled" }
                                                role="button"
                                                tabindex="0"
                                                aria-label="Reorder row"
                                                on:keydown=move |ev| {
                                                    if reorder_enabled() {
                                                        on_keydown(ev);
                                                    }
                                                }
                                            >
                                                "⠿"
                                            </span>
                                        </td>
                                        {cells.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                                        <td class="row-actions">
                                            <button
                                                class="edit-btn"
                                                on:click=move |_| {
                                                    if !dnd.drag_just_ended_read.get_untracked() {
                                                        editing.set(Some(EditTarget::Edit(row.clone())));
                                                    }
                                                }
                                            >
                                                "Edit"
                                            </button>
                                            <DeleteConfirmButton
                                                item_id=id
                                                label=title
                                                flow=delete_flow
                                                on_confirm=on_delete
                                            />
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || !loading.get() && state.with(|s| s.items.is_empty())>
                    <p class="empty">
                        {move || if scoped && state.with(|s| s.scope.is_none()) {
                            "Select a parent to see its rows."
                        } else {
                            "Nothing here yet."
                        }}
                    </p>
                </Show>
            </div>

            <PaginationBar state=state />
        </section>
    }
}

#[component]
fn PaginationBar<T: EntityView>(state: RwSignal<ListState<T>>) -> impl IntoView {
    view! {
        <nav class="pagination">
            <button disabled=move || !state.with(|s| s.has_prev()) on:click=move |_| {
                state.update(|s| {
                    s.prev_page();
                });
            }>
                "‹ Prev"
            </button>
            <span class="page-info">
                {move || state.with(|s| format!("Page {} of {} · {} rows", s.page, s.total_pages(), s.total()))}
            </span>
            <button disabled=move || !state.with(|s| s.has_next()) on:click=move |_| {
                state.update(|s| {
                    s.next_page();
                });
            }>
                "Next ›"
            </button>
        </nav>
    }
}
