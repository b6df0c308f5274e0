//! Navigation routes and application mode.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pages reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Home,
    Node,
    Config,
    Routing,
    Dns,
}

impl Route {
    /// Secondary navigation, in display order.
    pub const SECONDARY: [Route; 4] = [Route::Node, Route::Config, Route::Routing, Route::Dns];

    /// Client-side path of this route.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Node => "/node",
            Self::Config => "/config",
            Self::Routing => "/routing",
            Self::Dns => "/dns",
        }
    }

    /// Translation key of the button label.
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Node => "node",
            Self::Config => "config",
            Self::Routing => "routing",
            Self::Dns => "dns",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Self::Home),
            "/node" => Some(Self::Node),
            "/config" => Some(Self::Config),
            "/routing" => Some(Self::Routing),
            "/dns" => Some(Self::Dns),
            _ => None,
        }
    }
}

/// How much of the dashboard is exposed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Only the overview page.
    #[default]
    #[serde(alias = "simple")]
    Basic,
    /// All configuration pages.
    Advanced,
}

impl Mode {
    /// Returns true if the secondary navigation buttons render.
    pub fn shows_secondary_nav(&self) -> bool {
        matches!(self, Self::Advanced)
    }
}

/// Client-side router.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, path: &str) {
        debug!(path, "Navigating");
        self(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secondary_paths() {
        let paths: Vec<_> = Route::SECONDARY.iter().map(Route::path).collect();
        assert_eq!(paths, ["/node", "/config", "/routing", "/dns"]);
    }

    #[test]
    fn test_path_roundtrip() {
        for route in [Route::Home, Route::Node, Route::Config, Route::Routing, Route::Dns] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/unknown"), None);
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::from_str::<Mode>("\"simple\"").unwrap(), Mode::Basic);
        assert_eq!(serde_json::from_str::<Mode>("\"basic\"").unwrap(), Mode::Basic);
        assert_eq!(serde_json::from_str::<Mode>("\"advanced\"").unwrap(), Mode::Advanced);
        assert_eq!(serde_json::to_string(&Mode::Advanced).unwrap(), "\"advanced\"");
    }

    #[test]
    fn test_only_advanced_shows_secondary_nav() {
        assert!(!Mode::Basic.shows_secondary_nav());
        assert!(Mode::Advanced.shows_secondary_nav());
    }
}
