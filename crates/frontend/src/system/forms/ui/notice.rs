use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;

/// Non-blocking confirmation shown under a form after it succeeds
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: Uuid,
    pub text: String,
}

impl Notice {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }
}

/// Put `text` into `slot` and clear it after `timeout_ms`.
///
/// A notice that was replaced in the meantime is left alone. `0` keeps the
/// notice until the user dismisses it.
pub fn show_notice(slot: RwSignal<Option<Notice>>, text: String, timeout_ms: u32) {
    let notice = Notice::new(text);
    let id = notice.id;
    slot.set(Some(notice));

    if timeout_ms == 0 {
        return;
    }
    spawn_local(async move {
        TimeoutFuture::new(timeout_ms).await;
        // the panel may be gone by now
        let _ = slot.try_update(|current| expire(current, id));
    });
}

/// Clear `current` if it is still the notice `id`.
fn expire(current: &mut Option<Notice>, id: Uuid) {
    if current.as_ref().is_some_and(|n| n.id == id) {
        *current = None;
    }
}

#[component]
pub fn NoticeBar(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    view! {
        <div class="notice" role="status" aria-live="polite">
            {move || {
                notice
                    .get()
                    .map(|n| {
                        view! {
                            <MessageBar intent=MessageBarIntent::Success>
                                <span class="notice__text">{n.text}</span>
                                <button
                                    type="button"
                                    class="notice__close"
                                    aria-label="Dismiss"
                                    on:click=move |_| notice.set(None)
                                >
                                    "×"
                                </button>
                            </MessageBar>
                        }
                    })
            }}
        </div>
    }
}
