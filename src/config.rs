/// Settings persisted in `storage.sync`

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::HostError;
use crate::host::ConfigStore;
use crate::progress::DEFAULT_NOTIFICATION_INTERVAL;
use crate::remover::{RemovalOrder, DEFAULT_BATCH_SIZE};
use crate::tab_data::KeyType;

pub const KEY_MENU_ITEM: &str = "menuItem";
pub const KEY_NOTIFICATION: &str = "notification";
pub const KEY_CLOSE_PINNED: &str = "closePinned";
pub const KEY_REMOVAL_ORDER: &str = "removalOrder";
pub const KEY_BATCH_SIZE: &str = "batchSize";
pub const KEY_NOTIFICATION_INTERVAL: &str = "notificationInterval";

/// Root settings object.
///
/// ```json
/// { "menuItem": ["url", "title"], "notification": true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqConfig {
    pub menu_item: Vec<KeyType>,
    pub notification: bool,
    pub close_pinned: bool,
    pub removal_order: RemovalOrder,
    pub batch_size: usize,
    pub notification_interval: u32,
}

impl Default for UniqConfig {
    fn default() -> Self {
        UniqConfig {
            menu_item: KeyType::ALL.to_vec(),
            notification: false,
            close_pinned: false,
            removal_order: RemovalOrder::Forward,
            batch_size: DEFAULT_BATCH_SIZE,
            notification_interval: DEFAULT_NOTIFICATION_INTERVAL,
        }
    }
}

/// Which parts of the configuration a change touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigChange {
    pub menu_changed: bool,
}

impl UniqConfig {
    /// Read a stored object. Missing or malformed fields keep their default.
    pub fn from_value(value: &Value) -> UniqConfig {
        let mut config = UniqConfig::default();
        if let Some(stored) = value.as_object() {
            for (key, value) in stored {
                config.set(key, value);
            }
        }
        config
    }

    /// Show or hide one key type, keeping the menu order stable
    pub fn set_menu_item(&mut self, key_type: KeyType, enabled: bool) {
        self.menu_item = KeyType::ALL
            .into_iter()
            .filter(|k| if *k == key_type { enabled } else { self.menu_item.contains(k) })
            .collect();
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Apply a `storage.onChanged` payload: `{key: {oldValue, newValue}}`
    pub fn apply_changes(&mut self, changes: &Map<String, Value>) -> ConfigChange {
        let mut change = ConfigChange::default();
        for (key, entry) in changes {
            match entry.get("newValue") {
                Some(value) => {
                    if self.set(key, value) && key == KEY_MENU_ITEM {
                        change.menu_changed = true;
                    }
                }
                // Removed keys fall back to their default
                None => {
                    if self.reset(key) && key == KEY_MENU_ITEM {
                        change.menu_changed = true;
                    }
                }
            }
        }
        change
    }

    /// Returns whether the value changed
    fn set(&mut self, key: &str, value: &Value) -> bool {
        match key {
            KEY_MENU_ITEM => replace(&mut self.menu_item, parse_menu_items(value)),
            KEY_NOTIFICATION => set_field(&mut self.notification, key, value),
            KEY_CLOSE_PINNED => set_field(&mut self.close_pinned, key, value),
            KEY_REMOVAL_ORDER => set_field(&mut self.removal_order, key, value),
            KEY_BATCH_SIZE => set_field(&mut self.batch_size, key, value),
            KEY_NOTIFICATION_INTERVAL => set_field(&mut self.notification_interval, key, value),
            _ => {
                debug!("Ignoring setting {}", key);
                false
            }
        }
    }

    fn reset(&mut self, key: &str) -> bool {
        let defaults = UniqConfig::default();
        match key {
            KEY_MENU_ITEM => replace(&mut self.menu_item, defaults.menu_item),
            KEY_NOTIFICATION => replace(&mut self.notification, defaults.notification),
            KEY_CLOSE_PINNED => replace(&mut self.close_pinned, defaults.close_pinned),
            KEY_REMOVAL_ORDER => replace(&mut self.removal_order, defaults.removal_order),
            KEY_BATCH_SIZE => replace(&mut self.batch_size, defaults.batch_size),
            KEY_NOTIFICATION_INTERVAL => {
                replace(&mut self.notification_interval, defaults.notification_interval)
            }
            _ => false,
        }
    }
}

fn replace<T: PartialEq>(field: &mut T, value: T) -> bool {
    if *field == value {
        return false;
    }
    *field = value;
    true
}

fn set_field<T: DeserializeOwned + PartialEq>(field: &mut T, key: &str, value: &Value) -> bool {
    match serde_json::from_value::<T>(value.clone()) {
        Ok(parsed) => replace(field, parsed),
        Err(e) => {
            warn!("Ignoring malformed setting {}: {}", key, e);
            false
        }
    }
}

/// Unknown key types are dropped, duplicates collapse to the first
fn parse_menu_items(value: &Value) -> Vec<KeyType> {
    let Some(items) = value.as_array() else {
        warn!("Ignoring malformed setting {}: {}", KEY_MENU_ITEM, value);
        return KeyType::ALL.to_vec();
    };
    let mut parsed: Vec<KeyType> = Vec::with_capacity(items.len());
    for key_type in items.iter().filter_map(|item| item.as_str()?.parse::<KeyType>().ok()) {
        if !parsed.contains(&key_type) {
            parsed.push(key_type);
        }
    }
    parsed
}

/// Current settings, defaults where nothing is stored
pub async fn load_config<S: ConfigStore>(store: &S) -> Result<UniqConfig, HostError> {
    let stored = store.load().await?;
    debug!("Loaded {}", stored);
    Ok(UniqConfig::from_value(&stored))
}

pub async fn save_config<S: ConfigStore>(store: &S, config: &UniqConfig) -> Result<(), HostError> {
    let value = config.to_value();
    store.save(&value).await?;
    debug!("Saved {}", value);
    Ok(())
}
