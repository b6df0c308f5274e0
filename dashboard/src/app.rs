//! Main application component with routing.

use daed_core::Store;
use leptos::*;
use leptos_router::*;

use crate::components::{Home, RoutePage, Sidebar};
use crate::context::{load_config, DashboardContext};

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let ctx = DashboardContext::new(load_config());
    provide_context(ctx.clone());

    // Mirror the color mode onto <html class="dark">.
    let (color_mode, set_color_mode) = create_signal(ctx.color_mode.get());
    crate::reactive::bridge(ctx.color_mode.subscribe(), move |mode| set_color_mode.set(mode));
    create_effect(move |_| {
        let dark = color_mode.get() == daed_core::ColorMode::Dark;
        if let Some(root) = document().document_element() {
            let _ = root.class_list().toggle_with_force("dark", dark);
        }
    });

    view! {
        <Router>
            <div class="flex h-screen">
                <Sidebar />
                <main class="flex-1 overflow-auto p-6">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/node" view=|| view! { <RoutePage route=daed_core::Route::Node /> } />
                        <Route path="/config" view=|| view! { <RoutePage route=daed_core::Route::Config /> } />
                        <Route path="/routing" view=|| view! { <RoutePage route=daed_core::Route::Routing /> } />
                        <Route path="/dns" view=|| view! { <RoutePage route=daed_core::Route::Dns /> } />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
