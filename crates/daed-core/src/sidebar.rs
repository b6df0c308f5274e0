//! The navigation sidebar as a headless widget.
//!
//! [`Sidebar`] owns the drag state and forwards clicks to the
//! [`ActionDispatcher`]. Renderers draw whatever [`Sidebar::view`] returns.

use std::time::Duration;

use tracing::info;

use crate::actions::ActionDispatcher;
use crate::drag::{DragPosition, DragTracker, Point, RevealState};
use crate::layout::LayoutProbe;
use crate::motion::SpringConfig;
use crate::route::{Mode, Route};
use crate::store::StoreHandle;
use crate::theme::ColorMode;

/// Icon of the running toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunningIcon {
    Cloud,
    CloudOff,
}

impl RunningIcon {
    /// Unknown status renders as stopped.
    pub fn for_status(running: Option<bool>) -> Self {
        if running.unwrap_or(false) {
            Self::Cloud
        } else {
            Self::CloudOff
        }
    }
}

/// Icon of the theme toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeIcon {
    DarkMode,
    LightMode,
}

impl From<ColorMode> for ThemeIcon {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Dark => Self::DarkMode,
            ColorMode::Light => Self::LightMode,
        }
    }
}

/// A secondary navigation button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub route: Route,
    pub label: String,
}

/// Translated tooltips and button text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarLabels {
    pub change_endpoint: String,
    pub switch_running: String,
    pub switch_language: String,
    pub switch_theme: String,
    pub save: String,
}

/// Everything needed to draw the sidebar once.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarView {
    /// Logo offset from rest.
    pub position: DragPosition,
    /// Logo region renders with zero height.
    pub logo_collapsed: bool,
    /// Empty unless the dashboard is in advanced mode.
    pub nav_buttons: Vec<NavButton>,
    /// Last fetched running status.
    pub running: Option<bool>,
    pub running_icon: RunningIcon,
    pub color_mode: ColorMode,
    pub theme_icon: ThemeIcon,
    /// Save button renders.
    pub save_visible: bool,
    pub labels: SidebarLabels,
}

/// Headless navigation sidebar.
pub struct Sidebar {
    tracker: DragTracker,
    dispatcher: ActionDispatcher,
    mode: StoreHandle<Mode>,
}

impl Sidebar {
    pub fn new(dispatcher: ActionDispatcher, mode: StoreHandle<Mode>, spring: SpringConfig) -> Self {
        Self {
            tracker: DragTracker::new(spring),
            dispatcher,
            mode,
        }
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    pub fn tracker(&self) -> &DragTracker {
        &self.tracker
    }

    pub fn mode(&self) -> Mode {
        self.mode.get()
    }

    pub fn view(&self) -> SidebarView {
        let i18n = self.dispatcher.i18n();
        let nav_buttons = if self.mode().shows_secondary_nav() {
            Route::SECONDARY
                .iter()
                .map(|route| NavButton {
                    route: *route,
                    label: i18n.t(route.label_key()),
                })
                .collect()
        } else {
            Vec::new()
        };

        let running = self.dispatcher.running().data();
        let color_mode = self.dispatcher.theme().color_mode();
        let reveal = self.tracker.reveal_state();

        SidebarView {
            position: self.tracker.position(),
            logo_collapsed: reveal.collapses_logo(),
            nav_buttons,
            running,
            running_icon: RunningIcon::for_status(running),
            color_mode,
            theme_icon: color_mode.into(),
            save_visible: reveal == RevealState::Revealed,
            labels: SidebarLabels {
                change_endpoint: i18n.t("actions.change endpoint"),
                switch_running: i18n.t("actions.switchRunning"),
                switch_language: i18n.t("actions.switchLanguage"),
                switch_theme: i18n.t("actions.switchTheme"),
                save: i18n.t("actions.save dae"),
            },
        }
    }

    pub fn pointer_down(&mut self, pointer: Point) {
        self.tracker.begin(pointer);
    }

    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        self.tracker.move_to(pointer)
    }

    pub fn pointer_up(&mut self) -> bool {
        self.tracker.end()
    }

    /// Advance the logo animation by one frame.
    pub fn tick(&mut self, dt: Duration, probe: &impl LayoutProbe) -> Option<f64> {
        self.tracker.tick(dt, probe)
    }

    pub fn click_logo(&self) {
        self.dispatcher.navigate(Route::Home);
    }

    /// Commit the save: the logo snaps back to rest. Returns whether the save
    /// button is still visible afterwards.
    pub fn save(&mut self, probe: &impl LayoutProbe) -> bool {
        info!("Returning dae logo to rest");
        self.tracker.jump_to_rest(probe);
        self.tracker.save_visible()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use async_trait::async_trait;

    use super::*;
    use crate::error::CoreError;
    use crate::graphql::ProxyControl;
    use crate::i18n::{I18n, LANG_EN};
    use crate::layout::LayoutMetrics;
    use crate::query::{Query, QUERY_KEY_RUNNING};
    use crate::store::{Atom, Session, Store};
    use crate::theme::ThemeStore;

    const FRAME: Duration = Duration::from_millis(16);

    struct RunningDae;

    #[async_trait(?Send)]
    impl ProxyControl for RunningDae {
        async fn fetch_running(&self) -> Result<bool, CoreError> {
            Ok(true)
        }

        async fn set_running(&self, _desired: bool) -> Result<(), CoreError> {
            Ok(())
        }
    }

    fn sidebar(mode: Mode) -> (Sidebar, Rc<RefCell<Vec<String>>>, Atom<Mode>) {
        let visited = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&visited);
        let mode = Atom::new(mode);

        let dispatcher = ActionDispatcher::new(
            Rc::new(move |path: &str| log.borrow_mut().push(path.to_string())),
            Session::in_memory("http://127.0.0.1:2023/graphql"),
            I18n::new(Atom::new(LANG_EN.to_string()).handle()),
            ThemeStore::new(Atom::new(ColorMode::Dark).handle()),
            Rc::new(RunningDae),
            Query::new(QUERY_KEY_RUNNING),
        );

        (
            Sidebar::new(dispatcher, mode.handle(), SpringConfig::default()),
            visited,
            mode,
        )
    }

    #[test]
    fn test_basic_mode_hides_secondary_nav() {
        let (sidebar, _, _) = sidebar(Mode::Basic);
        assert!(sidebar.view().nav_buttons.is_empty());
    }

    #[test]
    fn test_advanced_mode_shows_secondary_nav() {
        let (sidebar, visited, _) = sidebar(Mode::Advanced);
        let view = sidebar.view();

        let labels: Vec<_> = view.nav_buttons.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Node", "Config", "Routing", "DNS"]);

        for button in &view.nav_buttons {
            sidebar.dispatcher().navigate(button.route);
        }
        assert_eq!(*visited.borrow(), ["/node", "/config", "/routing", "/dns"]);
    }

    #[test]
    fn test_mode_change_is_picked_up() {
        let (sidebar, _, mode) = sidebar(Mode::Basic);
        mode.set(Mode::Advanced);
        assert_eq!(sidebar.view().nav_buttons.len(), 4);
    }

    #[test]
    fn test_logo_click_navigates_home() {
        let (sidebar, visited, _) = sidebar(Mode::Basic);
        sidebar.click_logo();
        assert_eq!(*visited.borrow(), ["/"]);
    }

    #[tokio::test]
    async fn test_running_icon_follows_status() {
        let (sidebar, _, _) = sidebar(Mode::Basic);
        let view = sidebar.view();
        assert_eq!(view.running, None);
        assert_eq!(view.running_icon, RunningIcon::CloudOff);

        sidebar.dispatcher().refresh_running().await.unwrap();
        assert_eq!(sidebar.view().running_icon, RunningIcon::Cloud);
    }

    #[test]
    fn test_theme_icon_follows_mode() {
        let (sidebar, _, _) = sidebar(Mode::Basic);
        assert_eq!(sidebar.view().theme_icon, ThemeIcon::DarkMode);

        sidebar.dispatcher().switch_theme();
        let view = sidebar.view();
        assert_eq!(view.color_mode, ColorMode::Light);
        assert_eq!(view.theme_icon, ThemeIcon::LightMode);
    }

    #[test]
    fn test_labels_follow_language() {
        let (sidebar, _, _) = sidebar(Mode::Advanced);
        assert_eq!(sidebar.view().labels.switch_language, "Switch Language");

        sidebar.dispatcher().switch_language();
        let view = sidebar.view();
        assert_eq!(view.labels.switch_language, "切换语言");
        assert_eq!(view.nav_buttons[0].label, "节点");
    }

    #[test]
    fn test_drag_reveal_save_cycle() {
        let probe = LayoutMetrics::measured(600.0, 100.0);
        let (mut sidebar, _, _) = sidebar(Mode::Basic);
        assert!(!sidebar.view().save_visible);

        sidebar.pointer_down(Point::new(60.0, 40.0));
        sidebar.pointer_move(Point::new(60.0, 560.0));
        for _ in 0..600 {
            sidebar.tick(FRAME, &probe);
        }
        sidebar.pointer_up();

        let view = sidebar.view();
        assert!(view.save_visible);
        assert!(view.logo_collapsed);
        assert_eq!(view.position, DragPosition { x: 0.0, y: 520.0 });

        assert!(!sidebar.save(&probe));
        let view = sidebar.view();
        assert!(!view.save_visible);
        assert!(!view.logo_collapsed);
        assert_eq!(view.position.y, 0.0);
    }
}
