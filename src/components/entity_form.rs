//! Entity Editor Form
//!
//! Create/edit form generated from an entity's field list. Parse and rule
//! errors stay inline next to their field; only transport failures turn
//! into notifications.

use leptos::prelude::*;
use leptos::task::spawn_local;

use layana_core::domain::{error_for, Draft};
use layana_core::{Entity, FieldError, Resource};

use crate::api::Api;
use crate::context::use_app_context;
use crate::store::NoticeLevel;
use crate::views::{EntityView, FieldKind, FieldSpec};

/// What the editor is working on
#[derive(Clone, Debug, PartialEq)]
pub enum EditTarget<T> {
    Create,
    Edit(T),
}

fn field_input(spec: &FieldSpec, values: RwSignal<layana_core::FormValues>) -> AnyView {
    let name = spec.name;
    let value = move || values.with(|v| v.get(name).to_string());
    let set = move |raw: String| values.update(|v| v.set(name, raw));

    if !spec.is_editable() {
        return view! {
            <input type="text" name=name class="read-only" readonly=true prop:value=value />
        }
        .into_any();
    }

    match spec.kind {
        FieldKind::TextArea | FieldKind::Lines => view! {
            <textarea
                name=name
                rows=if spec.kind == FieldKind::Lines { 4 } else { 3 }
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
        FieldKind::Checkbox => view! {
            <input
                type="checkbox"
                name=name
                prop:checked=move || values.with(|v| v.get(name) == "true")
                on:change=move |ev| set(event_target_checked(&ev).to_string())
            />
        }
        .into_any(),
        FieldKind::Money => view! {
            <input
                type="text"
                inputmode="decimal"
                name=name
                placeholder="0.00"
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
        FieldKind::Number | FieldKind::Scope => view! {
            <input
                type="text"
                inputmode="numeric"
                name=name
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
        FieldKind::Text => view! {
            <input type="text" name=name prop:value=value on:input=move |ev| set(event_target_value(&ev)) />
        }
        .into_any(),
    }
}

#[component]
pub fn EntityForm<T: EntityView>(
    target: EditTarget<T>,
    api: StoredValue<Api<T>, LocalStorage>,
    /// Parent selected in the view, for new rows of scoped collections
    scope_id: Option<u32>,
    #[prop(into)] on_saved: Callback<T>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();

    let editing_id = match &target {
        EditTarget::Edit(row) => Some(row.id()),
        EditTarget::Create => None,
    };
    let mut initial = match &target {
        EditTarget::Edit(row) => row.to_draft().to_form(),
        EditTarget::Create => T::blank_form(),
    };
    if let (Some(key), Some(id), None) = (T::SCOPE_KEY, scope_id, editing_id) {
        initial.set(key, id.to_string());
    }

    let values = RwSignal::new(initial);
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let saving = RwSignal::new(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let draft = match <T as Resource>::Draft::from_form(&values.get_untracked()) {
            Ok(draft) => draft,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(Vec::new());
        saving.set(true);

        let api = api.get_value();
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => api.update(id, &draft).await,
                None => api.create(&draft).await,
            };
            saving.set(false);
            match result {
                Ok(row) => {
                    ctx.notify(NoticeLevel::Success, format!("{} \"{}\" saved", T::LABEL, row.title()));
                    on_saved.run(row);
                }
                Err(e) if !e.field_errors().is_empty() => errors.set(e.field_errors().to_vec()),
                Err(e) => ctx.notify(NoticeLevel::Error, format!("Saving {} failed: {}", T::LABEL, e)),
            }
        });
    };

    let heading = match editing_id {
        Some(id) => format!("Edit {} #{}", T::LABEL, id),
        None => format!("New {}", T::LABEL),
    };

    let fields = T::fields()
        .iter()
        .map(|spec| {
            let name = spec.name;
            let error = move || errors.with(|e| error_for(e, name).map(str::to_string));
            view! {
                <label class="form-field">
                    <span class="form-label">{spec.label}</span>
                    {field_input(spec, values)}
                    {move || error().map(|msg| view! { <span class="field-error">{msg}</span> })}
                </label>
            }
        })
        .collect_view();

    view! {
        <form class="entity-form" on:submit=submit>
            <h3>{heading}</h3>
            {fields}
            <div class="form-actions">
                <button type="submit" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving…" } else { "Save" }}
                </button>
                <button type="button" class="cancel-btn" on:click=move |_| on_cancel.run(())>
                    "Cancel"
                </button>
            </div>
        </form>
    }
}
