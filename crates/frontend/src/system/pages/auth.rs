use leptos::prelude::*;
use thaw::*;

use crate::shared::config::Config;
use crate::system::forms::ui::FormPanel;

/// Every configured form side by side, each with its own status and notice.
#[component]
pub fn AuthPage(config: Config) -> impl IntoView {
    let api_base = config.api_base;
    let notice_timeout_ms = config.notice_timeout_ms;

    view! {
        <div class="auth-container">
            <Flex gap=FlexGap::Large style="flex-wrap: wrap; justify-content: center;">
                {config
                    .forms
                    .into_iter()
                    .map(|form| {
                        view! {
                            <FormPanel
                                form=form
                                api_base=api_base.clone()
                                notice_timeout_ms=notice_timeout_ms
                            />
                        }
                    })
                    .collect_view()}
            </Flex>
        </div>
    }
}
