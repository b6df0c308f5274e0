//! daed Dashboard Core
//!
//! Headless logic behind the dashboard sidebar. Nothing here touches:
//! - The DOM
//! - The network stack
//! - A specific async runtime
//!
//! The rendering layer feeds pointer input, layout measurements and frame
//! ticks in, and reads a [`SidebarView`] back out. Everything the sidebar talks
//! to (router, session, language, theme, proxy) is injected as a handle.

pub mod actions;
pub mod config;
pub mod drag;
pub mod error;
pub mod graphql;
pub mod i18n;
pub mod layout;
pub mod motion;
pub mod query;
pub mod route;
pub mod sidebar;
pub mod store;
pub mod theme;

// Re-export commonly used types
pub use actions::{Action, ActionDispatcher};
pub use config::Config;
pub use drag::{DragConstraints, DragPosition, DragTracker, Point, RevealState, SaveVisibility};
pub use error::CoreError;
pub use graphql::{DaeClient, GraphQlRequest, GraphQlTransport, ProxyControl};
pub use i18n::I18n;
pub use layout::{LayoutMetrics, LayoutProbe};
pub use motion::{Spring, SpringConfig};
pub use query::{Query, QueryClient, QueryState, QUERY_KEY_RUNNING};
pub use route::{Mode, Navigator, Route};
pub use sidebar::{RunningIcon, Sidebar, SidebarView, ThemeIcon};
pub use store::{forward_changes, Atom, Session, Store, StoreHandle};
pub use theme::{ColorMode, ThemeStore};
