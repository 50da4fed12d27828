use crate::shared::config::load_config;
use crate::system::pages::auth::AuthPage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    match load_config() {
        Ok(config) => view! { <AuthPage config=config /> }.into_any(),
        Err(e) => {
            log::error!("Cannot start: {}", e);
            view! {
                <div class="message error">{format!("Configuration error: {}", e)}</div>
            }
            .into_any()
        }
    }
}
