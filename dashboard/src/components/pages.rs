//! Page components behind the sidebar routes.

use std::rc::Rc;

use daed_core::i18n::translate;
use daed_core::Route;
use leptos::*;
use tracing::debug;

use crate::context::DashboardContext;
use crate::reactive::{bridge, use_language};

/// Overview: endpoint and running status, or the endpoint form when the
/// session is unconfigured.
#[component]
pub fn Home() -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let language = use_language();
    let t = move |key: &'static str| translate(&language.get(), key).to_string();

    let (endpoint, set_endpoint) = create_signal(ctx.session.endpoint_url());
    bridge(ctx.session.subscribe_endpoint_url(), move |url| set_endpoint.set(url));

    let running = ctx.queries.running();
    let (status, set_status) = create_signal(running.data());
    bridge(running.subscribe(), move |state| set_status.set(state.data));

    view! {
        <div>
            <h1 class="text-2xl font-bold mb-6">"dae"</h1>
            {move || {
                let url = endpoint.get();
                if url.is_empty() {
                    view! { <EndpointForm /> }.into_view()
                } else {
                    view! {
                        <div class="bg-gray-100 dark:bg-gray-800 rounded-lg border border-gray-200 dark:border-gray-700 p-4 max-w-lg space-y-3">
                            <div>
                                <div class="text-xs text-gray-400">{move || t("endpoint")}</div>
                                <div class="font-mono text-sm truncate" title=url.clone()>{url.clone()}</div>
                            </div>
                            <div class="flex items-center gap-2 text-sm">
                                <span
                                    class="w-2 h-2 rounded-full"
                                    class:bg-green-500=move || status.get() == Some(true)
                                    class:bg-red-500=move || status.get() == Some(false)
                                    class:bg-gray-500=move || status.get().is_none()
                                />
                                <span>
                                    {move || match status.get() {
                                        Some(true) => t("status.running"),
                                        Some(false) => t("status.stopped"),
                                        None => t("status.unknown"),
                                    }}
                                </span>
                            </div>
                        </div>
                    }
                    .into_view()
                }
            }}
        </div>
    }
}

/// Form that stores a new endpoint URL and token in the session.
#[component]
fn EndpointForm() -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let language = use_language();
    let t = move |key: &'static str| translate(&language.get(), key).to_string();

    let (url, set_url) = create_signal(String::new());
    let (token, set_token) = create_signal(String::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let endpoint = url.get_untracked().trim().to_string();
        if endpoint.is_empty() {
            return;
        }

        ctx.session.set_token(token.get_untracked());
        ctx.session.set_endpoint_url(endpoint);

        let query = ctx.queries.running();
        let proxy = Rc::clone(&ctx.proxy);
        spawn_local(async move {
            if let Err(e) = query.fetch(async move { proxy.fetch_running().await }).await {
                debug!(error = %e, "Running status fetch after connect failed");
            }
        });
    };

    view! {
        <form class="max-w-lg space-y-4" on:submit=on_submit>
            <p class="text-gray-400">{move || t("status.not configured")}</p>
            <label class="block">
                <span class="text-sm text-gray-400">{move || t("endpoint")}</span>
                <input
                    type="url"
                    class="mt-1 w-full px-3 py-2 rounded-lg bg-gray-100 dark:bg-gray-800 border border-gray-300 dark:border-gray-700"
                    placeholder="http://127.0.0.1:2023/graphql"
                    prop:value=url
                    on:input=move |ev| set_url.set(event_target_value(&ev))
                />
            </label>
            <label class="block">
                <span class="text-sm text-gray-400">{move || t("token")}</span>
                <input
                    type="password"
                    class="mt-1 w-full px-3 py-2 rounded-lg bg-gray-100 dark:bg-gray-800 border border-gray-300 dark:border-gray-700"
                    prop:value=token
                    on:input=move |ev| set_token.set(event_target_value(&ev))
                />
            </label>
            <button
                type="submit"
                class="px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded-lg text-sm text-white transition-colors"
            >
                {move || t("actions.connect")}
            </button>
        </form>
    }
}

/// Landing view for a secondary route.
#[component]
pub fn RoutePage(route: Route) -> impl IntoView {
    let language = use_language();

    view! {
        <div>
            <h1 class="text-2xl font-bold mb-2">
                {move || translate(&language.get(), route.label_key()).to_string()}
            </h1>
            <p class="text-sm text-gray-500 font-mono">{route.path()}</p>
        </div>
    }
}
