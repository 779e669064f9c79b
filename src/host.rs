/// Browser APIs the core depends on
///
/// Each seam is a request/response call. The background page runs on a
/// single thread, so none of the futures need to be `Send`.

use serde_json::Value;

use crate::error::HostError;
use crate::menu::MenuEntry;
use crate::tab_data::{TabId, TabInfo, WindowId};

pub trait TabHost {
    /// Current tabs of the window, in any order
    async fn query_tabs(&self, window_id: WindowId) -> Result<Vec<TabInfo>, HostError>;

    async fn remove_tabs(&self, ids: &[TabId]) -> Result<(), HostError>;

    async fn activate_tab(&self, id: TabId) -> Result<(), HostError>;
}

pub trait Notifier {
    /// Repeated calls with the same id replace the shown notification
    async fn show_notification(&self, id: &str, title: &str, message: &str) -> Result<(), HostError>;
}

/// Localized strings, `i18n.getMessage`
pub trait Messages {
    fn message(&self, key: &str, args: &[String]) -> String;
}

pub trait Clock {
    /// Milliseconds since the epoch
    fn now_ms(&self) -> f64;

    async fn sleep(&self, ms: u32);
}

pub trait ConfigStore {
    /// The whole settings object
    async fn load(&self) -> Result<Value, HostError>;

    /// Replace the settings object
    async fn save(&self, value: &Value) -> Result<(), HostError>;
}

pub trait MenuHost {
    /// Remove every entry, then create `entries` in order
    async fn replace_menu(&self, entries: &[MenuEntry]) -> Result<(), HostError>;
}

/// Everything a de-duplication run talks to
pub trait Host: TabHost + Notifier + Messages + Clock {}

impl<T: TabHost + Notifier + Messages + Clock> Host for T {}
