//! Sidebar intents mapped onto external collaborators.
//!
//! The dispatcher owns no business state. Every action is a best-effort
//! request to something else: the router, the session, the language and theme
//! stores, or dae itself.

use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::graphql::ProxyControl;
use crate::i18n::I18n;
use crate::query::Query;
use crate::route::{Navigator, Route};
use crate::store::Session;
use crate::theme::{ColorMode, ThemeStore};

/// Synchronous sidebar intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Navigate(Route),
    ResetSession,
    SwitchLanguage,
    SwitchTheme,
}

/// Routes sidebar actions to their collaborators.
#[derive(Clone)]
pub struct ActionDispatcher {
    navigator: Rc<dyn Navigator>,
    session: Session,
    i18n: I18n,
    theme: ThemeStore,
    proxy: Rc<dyn ProxyControl>,
    running: Query<bool>,
}

impl ActionDispatcher {
    pub fn new(
        navigator: Rc<dyn Navigator>,
        session: Session,
        i18n: I18n,
        theme: ThemeStore,
        proxy: Rc<dyn ProxyControl>,
        running: Query<bool>,
    ) -> Self {
        Self {
            navigator,
            session,
            i18n,
            theme,
            proxy,
            running,
        }
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn running(&self) -> &Query<bool> {
        &self.running
    }

    /// Run a synchronous action.
    pub fn dispatch(&self, action: Action) {
        debug!(?action, "Dispatching sidebar action");
        match action {
            Action::Navigate(route) => self.navigate(route),
            Action::ResetSession => self.reset_session(),
            Action::SwitchLanguage => {
                self.switch_language();
            }
            Action::SwitchTheme => {
                self.switch_theme();
            }
        }
    }

    pub fn navigate(&self, route: Route) {
        self.navigator.navigate(route.path());
    }

    /// Clear the stored token and endpoint URL.
    pub fn reset_session(&self) {
        self.session.reset();
    }

    /// Returns the new language tag.
    pub fn switch_language(&self) -> &'static str {
        self.i18n.switch_language()
    }

    /// Returns the new color mode.
    pub fn switch_theme(&self) -> ColorMode {
        self.theme.toggle_color_mode()
    }

    /// Ask dae for the opposite of the last observed running state.
    ///
    /// A status that was never fetched counts as stopped, so the request is
    /// to start. Returns the requested state. Failures are logged and returned
    /// without retry; the cached status is left as it was.
    pub async fn toggle_running(&self) -> Result<bool, CoreError> {
        let desired = !self.running.data().unwrap_or(false);
        info!(desired, "Requesting dae running state");

        if let Err(e) = self.proxy.set_running(desired).await {
            warn!(desired, error = %e, "Failed to switch running state");
            return Err(e);
        }

        self.running.invalidate();
        if let Err(e) = self.refresh_running().await {
            debug!(error = %e, "Running status refresh after toggle failed");
        }
        Ok(desired)
    }

    /// Fetch the running status into the shared query.
    pub async fn refresh_running(&self) -> Result<bool, CoreError> {
        let proxy = Rc::clone(&self.proxy);
        self.running
            .fetch(async move { proxy.fetch_running().await })
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use async_trait::async_trait;

    use super::*;
    use crate::i18n::{LANG_EN, LANG_ZH_HANS};
    use crate::query::QUERY_KEY_RUNNING;
    use crate::store::{Atom, Store};

    /// Fake dae that flips its state on every accepted request.
    #[derive(Default)]
    struct FakeDae {
        running: Cell<bool>,
        fail_mutations: Cell<bool>,
        requests: RefCell<Vec<bool>>,
    }

    #[async_trait(?Send)]
    impl ProxyControl for FakeDae {
        async fn fetch_running(&self) -> Result<bool, CoreError> {
            Ok(self.running.get())
        }

        async fn set_running(&self, desired: bool) -> Result<(), CoreError> {
            self.requests.borrow_mut().push(desired);
            if self.fail_mutations.get() {
                return Err(CoreError::GraphQl("config is invalid".to_string()));
            }
            self.running.set(desired);
            Ok(())
        }
    }

    struct Fixture {
        dispatcher: ActionDispatcher,
        visited: Rc<RefCell<Vec<String>>>,
        language: Atom<String>,
        color_mode: Atom<ColorMode>,
        dae: Rc<FakeDae>,
    }

    fn fixture() -> Fixture {
        let visited = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&visited);
        let navigator = move |path: &str| log.borrow_mut().push(path.to_string());
        let language = Atom::new(LANG_EN.to_string());
        let color_mode = Atom::new(ColorMode::Dark);
        let dae = Rc::new(FakeDae::default());

        let dispatcher = ActionDispatcher::new(
            Rc::new(navigator),
            Session::in_memory("http://127.0.0.1:2023/graphql"),
            I18n::new(language.handle()),
            ThemeStore::new(color_mode.handle()),
            dae.clone(),
            Query::new(QUERY_KEY_RUNNING),
        );

        Fixture {
            dispatcher,
            visited,
            language,
            color_mode,
            dae,
        }
    }

    #[test]
    fn test_navigate() {
        let f = fixture();
        f.dispatcher.dispatch(Action::Navigate(Route::Routing));
        f.dispatcher.navigate(Route::Home);

        assert_eq!(*f.visited.borrow(), ["/routing", "/"]);
    }

    #[test]
    fn test_reset_session() {
        let f = fixture();
        f.dispatcher.session().set_token("secret");

        f.dispatcher.dispatch(Action::ResetSession);
        assert_eq!(f.dispatcher.session().token(), "");
        assert_eq!(f.dispatcher.session().endpoint_url(), "");
    }

    #[test]
    fn test_switch_language() {
        let f = fixture();
        f.dispatcher.dispatch(Action::SwitchLanguage);
        assert_eq!(f.language.get(), LANG_ZH_HANS);

        f.dispatcher.dispatch(Action::SwitchLanguage);
        assert_eq!(f.language.get(), LANG_EN);
    }

    #[test]
    fn test_switch_theme() {
        let f = fixture();
        f.dispatcher.dispatch(Action::SwitchTheme);
        assert_eq!(f.color_mode.get(), ColorMode::Light);
    }

    #[tokio::test]
    async fn test_toggle_unknown_status_requests_start() {
        let f = fixture();
        assert_eq!(f.dispatcher.running().data(), None);

        assert!(f.dispatcher.toggle_running().await.unwrap());
        assert_eq!(*f.dae.requests.borrow(), [true]);

        // Status was refetched after the mutation.
        assert_eq!(f.dispatcher.running().data(), Some(true));
        assert!(!f.dispatcher.running().is_stale());
    }

    #[tokio::test]
    async fn test_toggle_running_requests_stop() {
        let f = fixture();
        f.dae.running.set(true);
        f.dispatcher.refresh_running().await.unwrap();

        assert!(!f.dispatcher.toggle_running().await.unwrap());
        assert_eq!(*f.dae.requests.borrow(), [false]);
        assert_eq!(f.dispatcher.running().data(), Some(false));
    }

    #[tokio::test]
    async fn test_toggle_failure_leaves_status_alone() {
        let f = fixture();
        f.dae.running.set(true);
        f.dispatcher.refresh_running().await.unwrap();
        f.dae.fail_mutations.set(true);

        let err = f.dispatcher.toggle_running().await.unwrap_err();
        assert!(matches!(err, CoreError::GraphQl(_)));

        // One attempt, no rollback, cached value untouched.
        assert_eq!(*f.dae.requests.borrow(), [false]);
        assert_eq!(f.dispatcher.running().data(), Some(true));
        assert!(!f.dispatcher.running().is_stale());
    }
}
