//! Process-wide stores shared through the Leptos context.

use std::rc::Rc;

use daed_core::{
    Atom, ColorMode, Config, DaeClient, I18n, Mode, ProxyControl, QueryClient, Session, ThemeStore,
};
use leptos::document;
use tracing::{info, warn};

use crate::api::FetchTransport;

/// Id of the optional `<script type="application/json">` config element.
const CONFIG_ELEMENT_ID: &str = "daed-config";

/// Everything the dashboard's components share.
#[derive(Clone)]
pub struct DashboardContext {
    pub config: Config,
    pub session: Session,
    pub mode: Atom<Mode>,
    pub language: Atom<String>,
    pub color_mode: Atom<ColorMode>,
    pub queries: QueryClient,
    pub proxy: Rc<dyn ProxyControl>,
}

impl DashboardContext {
    pub fn new(config: Config) -> Self {
        let session = Session::in_memory(config.default_endpoint_url.clone());
        let proxy = DaeClient::new(Rc::new(FetchTransport), session.clone());

        Self {
            mode: Atom::new(config.default_mode),
            language: Atom::new(config.default_language.clone()),
            color_mode: Atom::new(config.default_color_mode),
            queries: QueryClient::new(),
            proxy: Rc::new(proxy),
            session,
            config,
        }
    }

    pub fn i18n(&self) -> I18n {
        I18n::new(self.language.handle())
    }

    pub fn theme(&self) -> ThemeStore {
        ThemeStore::new(self.color_mode.handle())
    }
}

/// Read the page's config override, falling back to defaults.
pub fn load_config() -> Config {
    let json = document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty());

    let Some(json) = json else {
        return Config::default();
    };

    match Config::from_json(&json) {
        Ok(config) => {
            info!(mode = ?config.default_mode, "Loaded dashboard config");
            config
        }
        Err(e) => {
            warn!(error = %e, "Ignoring invalid dashboard config");
            Config::default()
        }
    }
}
