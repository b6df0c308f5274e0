//! Color mode.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::StoreHandle;

/// Two-valued color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Dark,
    Light,
}

impl ColorMode {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Handle to the process-wide color mode.
#[derive(Clone)]
pub struct ThemeStore {
    mode: StoreHandle<ColorMode>,
}

impl ThemeStore {
    pub fn new(mode: StoreHandle<ColorMode>) -> Self {
        Self { mode }
    }

    pub fn color_mode(&self) -> ColorMode {
        self.mode.get()
    }

    /// Flip between dark and light. Returns the new mode.
    pub fn toggle_color_mode(&self) -> ColorMode {
        let next = self.mode.get().toggle();
        debug!(mode = next.as_str(), "Switching color mode");
        self.mode.set(next);
        next
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<ColorMode> {
        self.mode.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Atom, Store};

    #[test]
    fn test_toggle_flips_back_and_forth() {
        let atom = Atom::new(ColorMode::Dark);
        let theme = ThemeStore::new(atom.handle());

        assert_eq!(theme.toggle_color_mode(), ColorMode::Light);
        assert_eq!(atom.get(), ColorMode::Light);
        assert_eq!(theme.toggle_color_mode(), ColorMode::Dark);
        assert_eq!(theme.color_mode(), ColorMode::Dark);
    }
}
