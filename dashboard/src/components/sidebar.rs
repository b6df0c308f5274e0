//! Navigation sidebar component.
//!
//! Thin DOM binding over [`daed_core::Sidebar`]: pointer events and layout
//! measurements go in, a [`SidebarView`] comes out and is drawn.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use daed_core::{
    ActionDispatcher, LayoutMetrics, LayoutProbe, Point, RunningIcon, Sidebar as SidebarModel,
    SidebarView, Store, ThemeIcon,
};
use leptos::*;
use leptos_router::{use_navigate, NavigateOptions};
use tracing::{debug, warn};

use crate::context::DashboardContext;
use crate::reactive::bridge;

/// Measures the sidebar container and the logo in the live DOM.
#[derive(Clone, Copy)]
struct DomProbe {
    container: NodeRef<html::Aside>,
    logo: NodeRef<html::Img>,
}

impl LayoutProbe for DomProbe {
    fn measure(&self) -> LayoutMetrics {
        // Unmounted elements measure as 0, which LayoutMetrics treats as
        // unavailable.
        let container = self
            .container
            .get_untracked()
            .map_or(0.0, |el| f64::from(el.client_height()));
        let logo = self
            .logo
            .get_untracked()
            .map_or(0.0, |el| f64::from(el.client_height()));
        LayoutMetrics::measured(container, logo)
    }
}

/// Shared access to the headless sidebar from event handlers.
#[derive(Clone)]
struct SidebarHandle {
    model: Rc<RefCell<SidebarModel>>,
    set_view: WriteSignal<SidebarView>,
    probe: DomProbe,
}

impl SidebarHandle {
    fn redraw(&self) {
        self.set_view.set(self.model.borrow().view());
    }

    fn update<R>(&self, f: impl FnOnce(&mut SidebarModel, &DomProbe) -> R) -> R {
        let result = {
            let mut model = self.model.borrow_mut();
            f(&mut model, &self.probe)
        };
        self.redraw();
        result
    }

    fn dispatcher(&self) -> ActionDispatcher {
        self.model.borrow().dispatcher().clone()
    }
}

fn pointer(ev: &ev::PointerEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

fn running_icon_name(icon: RunningIcon) -> &'static str {
    match icon {
        RunningIcon::Cloud => "cloud",
        RunningIcon::CloudOff => "cloud_off",
    }
}

fn theme_icon_name(icon: ThemeIcon) -> &'static str {
    match icon {
        ThemeIcon::DarkMode => "dark_mode",
        ThemeIcon::LightMode => "light_mode",
    }
}

/// Navigation sidebar with the draggable logo and proxy actions.
#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<DashboardContext>();
    let navigate = use_navigate();
    let running = ctx.queries.running();

    let dispatcher = ActionDispatcher::new(
        Rc::new(move |path: &str| navigate(path, NavigateOptions::default())),
        ctx.session.clone(),
        ctx.i18n(),
        ctx.theme(),
        Rc::clone(&ctx.proxy),
        running.clone(),
    );
    let model = SidebarModel::new(dispatcher, ctx.mode.handle(), ctx.config.spring);

    let container = create_node_ref::<html::Aside>();
    let logo = create_node_ref::<html::Img>();
    let (view_state, set_view) = create_signal(model.view());
    let handle = SidebarHandle {
        model: Rc::new(RefCell::new(model)),
        set_view,
        probe: DomProbe { container, logo },
    };

    // Redraw whenever a store the view depends on changes.
    {
        let h = handle.clone();
        bridge(running.subscribe(), move |_| h.redraw());
        let h = handle.clone();
        bridge(ctx.mode.subscribe(), move |_| h.redraw());
        let h = handle.clone();
        bridge(ctx.language.subscribe(), move |_| h.redraw());
        let h = handle.clone();
        bridge(ctx.color_mode.subscribe(), move |_| h.redraw());
    }

    // Spring animation.
    {
        let h = handle.clone();
        let last_frame = Cell::new(js_sys::Date::now());
        let frame = move || {
            let now = js_sys::Date::now();
            let elapsed_ms = (now - last_frame.replace(now)).max(0.0);
            let changed = h
                .model
                .borrow_mut()
                .tick(Duration::from_secs_f64(elapsed_ms / 1000.0), &h.probe)
                .is_some();
            if changed {
                h.redraw();
            }
        };
        match set_interval_with_handle(frame, Duration::from_millis(ctx.config.frame_interval_ms)) {
            Ok(interval) => on_cleanup(move || interval.clear()),
            Err(e) => warn!(error = ?e, "Failed to start logo animation"),
        }
    }

    // Running status: fetch on mount, then poll.
    {
        let h = handle.clone();
        let poll = move || {
            let dispatcher = h.dispatcher();
            spawn_local(async move {
                if let Err(e) = dispatcher.refresh_running().await {
                    debug!(error = %e, "Running status fetch failed");
                }
            });
        };
        poll();
        match set_interval_with_handle(
            poll,
            Duration::from_millis(ctx.config.status_poll_interval_ms),
        ) {
            Ok(interval) => on_cleanup(move || interval.clear()),
            Err(e) => warn!(error = ?e, "Failed to start running status poll"),
        }
    }

    let position = create_memo(move |_| view_state.get().position);
    let logo_collapsed = create_memo(move |_| view_state.get().logo_collapsed);
    let nav_buttons = create_memo(move |_| view_state.get().nav_buttons);
    let labels = create_memo(move |_| view_state.get().labels);
    let running_icon = create_memo(move |_| view_state.get().running_icon);
    let theme_icon = create_memo(move |_| view_state.get().theme_icon);
    let save_visible = create_memo(move |_| view_state.get().save_visible);

    let on_pointer_down = {
        let h = handle.clone();
        move |ev: ev::PointerEvent| {
            let target = event_target::<web_sys::Element>(&ev);
            let _ = target.set_pointer_capture(ev.pointer_id());
            h.update(|model, _| model.pointer_down(pointer(&ev)));
        }
    };
    let on_pointer_move = {
        let h = handle.clone();
        move |ev: ev::PointerEvent| {
            h.model.borrow_mut().pointer_move(pointer(&ev));
        }
    };
    let on_pointer_up = {
        let h = handle.clone();
        move |_: ev::PointerEvent| {
            h.model.borrow_mut().pointer_up();
        }
    };
    let on_pointer_cancel = on_pointer_up.clone();
    let on_logo_click = {
        let h = handle.clone();
        move |_: ev::MouseEvent| h.model.borrow().click_logo()
    };

    let nav = {
        let handle = handle.clone();
        move || {
            let buttons = nav_buttons.get();
            (!buttons.is_empty()).then(|| {
                let items = buttons
                    .into_iter()
                    .map(|button| {
                        let h = handle.clone();
                        let route = button.route;
                        view! {
                            <button
                                class="px-6 py-2 rounded-lg bg-blue-600 hover:bg-blue-700 text-white font-medium transition-colors"
                                on:click=move |_| h.dispatcher().navigate(route)
                            >
                                {button.label}
                            </button>
                        }
                    })
                    .collect_view();
                view! { <nav class="flex flex-col gap-4 p-4">{items}</nav> }
            })
        }
    };

    let save = {
        let handle = handle.clone();
        move || {
            save_visible.get().then(|| {
                let h = handle.clone();
                view! {
                    <button
                        class="px-3 py-1 rounded-lg text-blue-400 hover:bg-gray-700 transition-colors"
                        on:click=move |_| {
                            h.update(|model, probe| model.save(probe));
                        }
                    >
                        {move || labels.get().save}
                    </button>
                }
            })
        }
    };

    let reset = {
        let h = handle.clone();
        Callback::new(move |_| h.dispatcher().reset_session())
    };
    let toggle_running = {
        let h = handle.clone();
        Callback::new(move |_| {
            let dispatcher = h.dispatcher();
            spawn_local(async move {
                // Failures are logged by the dispatcher.
                let _ = dispatcher.toggle_running().await;
            });
        })
    };
    let switch_language = {
        let h = handle.clone();
        Callback::new(move |_| {
            h.dispatcher().switch_language();
        })
    };
    let switch_theme = {
        let h = handle.clone();
        Callback::new(move |_| {
            h.dispatcher().switch_theme();
        })
    };

    view! {
        <aside
            node_ref=container
            class="h-full min-w-[120px] flex flex-col items-center justify-center overflow-hidden bg-gray-100 dark:bg-gray-800 border-r border-gray-200 dark:border-gray-700"
        >
            // Draggable logo
            <div
                class="w-full z-10 cursor-pointer select-none"
                style="line-height: 0; touch-action: none"
                style:transform=move || {
                    let p = position.get();
                    format!("translate({}px, {}px)", p.x, p.y)
                }
                style:height=move || if logo_collapsed.get() { "0" } else { "auto" }
                on:pointerdown=on_pointer_down
                on:pointermove=on_pointer_move
                on:pointerup=on_pointer_up
                on:pointercancel=on_pointer_cancel
                on:click=on_logo_click
            >
                <img node_ref=logo draggable="false" src="/logo.svg" alt="logo" class="w-full" />
            </div>

            // Secondary navigation
            {nav}

            // Actions
            <div class="flex-1 flex flex-col items-center justify-end gap-4 p-4">
                <IconButton
                    title=Signal::derive(move || labels.get().change_endpoint)
                    icon="clear"
                    on_click=reset
                />
                <IconButton
                    title=Signal::derive(move || labels.get().switch_running)
                    icon=Signal::derive(move || running_icon_name(running_icon.get()))
                    on_click=toggle_running
                />
                <IconButton
                    title=Signal::derive(move || labels.get().switch_language)
                    icon="translate"
                    on_click=switch_language
                />
                <IconButton
                    title=Signal::derive(move || labels.get().switch_theme)
                    icon=Signal::derive(move || theme_icon_name(theme_icon.get()))
                    on_click=switch_theme
                />
                {save}
            </div>
        </aside>
    }
}

/// Round icon button with a tooltip.
#[component]
fn IconButton(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] icon: MaybeSignal<&'static str>,
    on_click: Callback<()>,
) -> impl IntoView {
    view! {
        <button
            class="w-10 h-10 flex items-center justify-center rounded-full text-gray-600 dark:text-gray-300 hover:bg-gray-200 dark:hover:bg-gray-700 transition-colors"
            title=move || title.get()
            on:click=move |_| on_click.call(())
        >
            <span class="material-symbols-outlined">{move || icon.get()}</span>
        </button>
    }
}
