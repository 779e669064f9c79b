/// Background page: triggers that start a run, and the settings watcher

use std::cell::RefCell;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::config::{load_config, UniqConfig};
use crate::error::{HostError, UniqError};
use crate::host::{ConfigStore, Host, MenuHost};
use crate::menu::{clicked_key_type, rebuild_menu};
use crate::progress::Progress;
use crate::tab_data::{KeyType, WindowId};
use crate::uniq::{run_with_status, RunOptions};

pub const MESSAGE_UNIQ: &str = "uniq";

/// `runtime.onMessageExternal` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqMessage {
    pub key_type: String,
    pub window_id: WindowId,
    #[serde(default)]
    pub close_pinned: Option<bool>,
    #[serde(default)]
    pub notification: Option<bool>,
}

pub struct Background<H> {
    host: H,
    config: RefCell<UniqConfig>,
}

impl<H> Background<H>
where
    H: Host + ConfigStore + MenuHost,
{
    pub fn new(host: H) -> Background<H> {
        Background {
            host,
            config: RefCell::new(UniqConfig::default()),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> UniqConfig {
        self.config.borrow().clone()
    }

    /// Load settings and build the context menu
    pub async fn init(&self) -> Result<(), HostError> {
        let config = load_config(&self.host).await?;
        let items = config.menu_item.clone();
        *self.config.borrow_mut() = config;
        rebuild_menu(&self.host, &items).await
    }

    /// `storage.onChanged` listener
    pub async fn on_storage_changed(&self, changes: &Value) -> Result<(), HostError> {
        let Some(changes) = changes.as_object() else {
            return Ok(());
        };
        let change = self.config.borrow_mut().apply_changes(changes);
        if change.menu_changed {
            let items = self.config.borrow().menu_item.clone();
            rebuild_menu(&self.host, &items).await?;
        }
        Ok(())
    }

    /// `contextMenus.onClicked` listener.
    ///
    /// Clicking on a pinned tab also allows closing pinned duplicates.
    pub async fn on_menu_clicked(
        &self,
        menu_item_id: &str,
        window_id: WindowId,
        pinned: bool,
    ) -> Option<Result<Progress, UniqError>> {
        let key_type = clicked_key_type(menu_item_id)?;
        let mut options = RunOptions::from_config(&self.config.borrow(), key_type);
        options.close_pinned |= pinned;
        Some(run_with_status(&self.host, window_id, &options).await)
    }

    /// `runtime.onMessageExternal` listener. Messages of other types are
    /// ignored.
    pub async fn on_message(&self, message: &Value) -> Result<Option<Progress>, UniqError> {
        debug!("Message {} was received", message);
        if message.get("type").and_then(Value::as_str) != Some(MESSAGE_UNIQ) {
            return Ok(None);
        }

        let message: UniqMessage = serde_json::from_value(message.clone())
            .map_err(|e| UniqError::InvalidMessage(e.to_string()))?;
        let key_type: KeyType = message.key_type.parse()?;

        let mut options = RunOptions::from_config(&self.config.borrow(), key_type);
        if let Some(close_pinned) = message.close_pinned {
            options.close_pinned = close_pinned;
        }
        if let Some(notification) = message.notification {
            options.notification = notification;
        }

        run_with_status(&self.host, message.window_id, &options)
            .await
            .map(Some)
    }
}
