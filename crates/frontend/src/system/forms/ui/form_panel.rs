use std::rc::Rc;

use contracts::system::forms::StatusMessage;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::notice::{show_notice, Notice, NoticeBar};
use crate::shared::api_utils::api_url;
use crate::shared::config::{FieldConfig, FormConfig};
use crate::system::forms::api::BrowserTransport;
use crate::system::forms::{dom, FormSubmitHandler};

/// One configured form bound to its endpoint and status element.
///
/// Submit (button, implicit or Enter in a `submit_on_enter` field) is
/// intercepted, the named controls are posted as JSON, and the outcome lands
/// in the status element with id `status_id`.
#[component]
pub fn FormPanel(
    form: FormConfig,
    #[prop(into)] api_base: String,
    #[prop(optional)] notice_timeout_ms: u32,
) -> impl IntoView {
    let status = RwSignal::new(StatusMessage::default());
    let is_busy = RwSignal::new(false);
    let notice = RwSignal::new(Option::<Notice>::None);
    let form_ref = NodeRef::<html::Form>::new();

    let handler = StoredValue::new_local(Rc::new(FormSubmitHandler::new(
        BrowserTransport,
        api_url(&api_base, &form.endpoint),
    )));
    let form_config = StoredValue::new(form.clone());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let Some(form_el) = form_ref.get_untracked() else {
            log::warn!("submit fired before the form was mounted");
            return;
        };
        let submission = dom::collect_submission(&form_el);
        let handler = handler.get_value();

        notice.set(None);
        is_busy.set(true);
        spawn_local(async move {
            let outcome = handler.submit(submission, move |s| status.set(s)).await;

            let follow_up = form_config.with_value(|form| outcome.follow_up(form));
            if follow_up.reset_form {
                form_el.reset();
            }
            if let Some(text) = follow_up.notice {
                show_notice(notice, text, notice_timeout_ms);
            }
            is_busy.set(handler.is_busy());
        });
    };

    let submit_label = form.submit_label.clone();
    let fields = form
        .fields
        .iter()
        .map(|field| {
            let enter_submits = form.submits_on_enter(&field.name);
            view! { <FormField field=field.clone() enter_submits=enter_submits form_ref=form_ref /> }
        })
        .collect_view();

    view! {
        <Card class="form-panel">
            <h2>{form.title.clone()}</h2>

            <form id=form.form_id.clone() node_ref=form_ref on:submit=on_submit>
                {fields}

                <button type="submit" class="btn-primary" disabled=move || is_busy.get()>
                    <Show when=move || is_busy.get()>
                        <Spinner size=SpinnerSize::Small />
                    </Show>
                    {submit_label}
                </button>
            </form>

            <div id=form.status_id.clone() class=move || status.with(|s| s.class_name())>
                {move || status.with(|s| s.text.clone())}
            </div>

            <NoticeBar notice=notice />
        </Card>
    }
}

#[component]
fn FormField(
    field: FieldConfig,
    enter_submits: bool,
    form_ref: NodeRef<html::Form>,
) -> impl IntoView {
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if !dom::should_submit_on_key(enter_submits, &ev.key(), ev.is_composing()) {
            return;
        }
        // stop the browser's implicit submit so the form submits once
        ev.prevent_default();
        if let Some(form_el) = form_ref.get_untracked() {
            dom::request_submit(&form_el);
        }
    };

    view! {
        <div class="form-group">
            <label for=field.input_id.clone()>{field.label}</label>
            <input
                type=field.input_type
                id=field.input_id
                name=field.name
                placeholder=field.placeholder.unwrap_or_default()
                on:keydown=on_keydown
            />
        </div>
    }
}
