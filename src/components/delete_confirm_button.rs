//! Delete Confirm Button Component
//!
//! Inline delete confirmation driven by a shared [`DeleteFlow`], so at most
//! one row of a table is waiting for confirmation.

use leptos::prelude::*;

use layana_core::DeleteFlow;

/// Inline delete confirmation button
///
/// Shows a × button initially. When clicked, asks "Delete <label>?" with ✓/✗.
#[component]
pub fn DeleteConfirmButton(
    item_id: u32,
    #[prop(into)] label: String,
    flow: RwSignal<DeleteFlow<u32>>,
    #[prop(into)] on_confirm: Callback<u32>,
) -> impl IntoView {
    let confirming = move || flow.with(|f| f.is_confirming(item_id));

    view! {
        <Show when=move || !confirming()>
            <button
                class="delete-btn"
                title="Delete"
                on:click=move |ev| {
                    ev.stop_propagation();
                    flow.update(|f| f.request(item_id));
                }
            >
                "×"
            </button>
        </Show>
        <Show when=confirming>
            <span class="delete-confirm">
                <span class="delete-confirm-text">{format!("Delete {}?", label)}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        if let Some(id) = flow.try_update(|f| f.take_confirmed()).flatten() {
                            on_confirm.run(id);
                        }
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        flow.update(|f| f.cancel());
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
