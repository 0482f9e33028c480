//! Notification toasts, newest at the bottom. Each one expires by itself
//! (see `AppContext::notify`) and can be dismissed early.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

#[component]
pub fn Toasts() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toasts" role="status" aria-live="polite">
            <For
                each=move || ctx.store.notices().get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.level.class()>
                            <span class="toast-message">{notice.message}</span>
                            <button class="toast-close" on:click=move |_| ctx.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
