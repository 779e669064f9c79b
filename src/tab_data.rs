/// Data structures for Tab Uniq
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UniqError;

pub type TabId = i32;
pub type WindowId = i32;

/// Information about a browser tab, as returned by `tabs.query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: TabId,
    pub window_id: WindowId,
    pub index: i32,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl TabInfo {
    pub fn new(id: TabId, window_id: WindowId, index: i32, url: &str, title: &str) -> TabInfo {
        TabInfo {
            id,
            window_id,
            index,
            pinned: false,
            active: false,
            url: Some(url.to_string()),
            title: Some(title.to_string()),
        }
    }
}

/// The field two tabs are compared on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Url,
    Title,
}

/// Tabs with equal keys are duplicates. A missing field is still a key:
/// all tabs without a title share `None`.
pub type ComparisonKey<'a> = Option<&'a str>;

impl KeyType {
    pub const ALL: [KeyType; 2] = [KeyType::Url, KeyType::Title];

    pub fn as_str(self) -> &'static str {
        match self {
            KeyType::Url => "url",
            KeyType::Title => "title",
        }
    }

    pub fn key(self, tab: &TabInfo) -> ComparisonKey<'_> {
        match self {
            KeyType::Url => tab.url.as_deref(),
            KeyType::Title => tab.title.as_deref(),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = UniqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyType::ALL
            .into_iter()
            .find(|key_type| key_type.as_str() == s)
            .ok_or_else(|| UniqError::UnknownKeyType(s.to_string()))
    }
}

/// The tabs of one window at query time, in index order
#[derive(Debug, Clone, Default)]
pub struct TabSnapshot {
    tabs: Vec<TabInfo>,
}

impl TabSnapshot {
    pub fn new(mut tabs: Vec<TabInfo>) -> TabSnapshot {
        tabs.sort_by_key(|tab| tab.index);
        TabSnapshot { tabs }
    }

    pub fn tabs(&self) -> &[TabInfo] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Position (not `index`) of the focused tab
    pub fn active_position(&self) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.active)
    }

    pub fn active(&self) -> Option<&TabInfo> {
        self.active_position().map(|pos| &self.tabs[pos])
    }

    pub fn position_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }
}
