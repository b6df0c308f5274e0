//! Language selection and sidebar translations.

use tracing::debug;

use crate::store::StoreHandle;

pub const LANG_EN: &str = "en";
pub const LANG_ZH_HANS: &str = "zh-Hans";

/// Tag to switch to from `current`. Only two languages are supported, so this
/// alternates between them.
pub fn next_language(current: &str) -> &'static str {
    if current.starts_with("zh") {
        LANG_EN
    } else {
        LANG_ZH_HANS
    }
}

/// Translate `key` for language `tag`. Unknown keys come back unchanged.
pub fn translate<'a>(tag: &str, key: &'a str) -> &'a str {
    let translated = if tag.starts_with("zh") {
        zh_hans(key)
    } else {
        en(key)
    };
    translated.unwrap_or(key)
}

fn en(key: &str) -> Option<&'static str> {
    Some(match key {
        "home" => "Home",
        "node" => "Node",
        "config" => "Config",
        "routing" => "Routing",
        "dns" => "DNS",
        "actions.change endpoint" => "Change Endpoint",
        "actions.switchRunning" => "Switch Running",
        "actions.switchLanguage" => "Switch Language",
        "actions.switchTheme" => "Switch Theme",
        "actions.save dae" => "Save dae",
        "actions.connect" => "Connect",
        "endpoint" => "Endpoint URL",
        "token" => "Token",
        "status.running" => "Running",
        "status.stopped" => "Stopped",
        "status.unknown" => "Unknown",
        "status.not configured" => "No endpoint configured",
        _ => return None,
    })
}

fn zh_hans(key: &str) -> Option<&'static str> {
    Some(match key {
        "home" => "首页",
        "node" => "节点",
        "config" => "配置",
        "routing" => "路由",
        "dns" => "DNS",
        "actions.change endpoint" => "切换后端",
        "actions.switchRunning" => "切换运行状态",
        "actions.switchLanguage" => "切换语言",
        "actions.switchTheme" => "切换主题",
        "actions.save dae" => "拯救 dae",
        "actions.connect" => "连接",
        "endpoint" => "后端地址",
        "token" => "令牌",
        "status.running" => "运行中",
        "status.stopped" => "已停止",
        "status.unknown" => "未知",
        "status.not configured" => "尚未配置后端地址",
        _ => return None,
    })
}

/// Handle to the process-wide language.
#[derive(Clone)]
pub struct I18n {
    language: StoreHandle<String>,
}

impl I18n {
    pub fn new(language: StoreHandle<String>) -> Self {
        Self { language }
    }

    pub fn language(&self) -> String {
        self.language.get()
    }

    pub fn change_language(&self, tag: &str) {
        debug!(tag, "Changing language");
        self.language.set(tag.to_string());
    }

    /// Alternate between the supported languages. Returns the new tag.
    pub fn switch_language(&self) -> &'static str {
        let next = next_language(&self.language());
        self.change_language(next);
        next
    }

    pub fn t(&self, key: &str) -> String {
        translate(&self.language(), key).to_string()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<String> {
        self.language.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Atom;

    #[test]
    fn test_next_language() {
        assert_eq!(next_language("zh-Hans"), "en");
        assert_eq!(next_language("zh-CN"), "en");
        assert_eq!(next_language("en"), "zh-Hans");
        assert_eq!(next_language("en-US"), "zh-Hans");
        assert_eq!(next_language("fr"), "zh-Hans");
        assert_eq!(next_language(""), "zh-Hans");
    }

    #[test]
    fn test_switch_language_alternates() {
        let i18n = I18n::new(Atom::new(LANG_ZH_HANS.to_string()).handle());

        assert_eq!(i18n.switch_language(), LANG_EN);
        assert_eq!(i18n.language(), "en");
        assert_eq!(i18n.switch_language(), LANG_ZH_HANS);
        assert_eq!(i18n.language(), "zh-Hans");
    }

    #[test]
    fn test_translate() {
        assert_eq!(translate("en", "routing"), "Routing");
        assert_eq!(translate("zh-Hans", "routing"), "路由");
        assert_eq!(translate("en", "no.such.key"), "no.such.key");
    }

    #[test]
    fn test_t_follows_language() {
        let i18n = I18n::new(Atom::new(LANG_EN.to_string()).handle());
        assert_eq!(i18n.t("actions.switchTheme"), "Switch Theme");

        i18n.switch_language();
        assert_eq!(i18n.t("actions.switchTheme"), "切换主题");
    }
}
