/// Tab context menu entries

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::host::{MenuHost, Messages};
use crate::tab_data::KeyType;

pub const KEY_UNIQ: &str = "uniq";
pub const KEY_UNIQ_BY: &str = "uniqBy";

const CONTEXT_TAB: &str = "tab";

/// `contextMenus.create` properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub id: String,
    pub title: String,
    pub contexts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl MenuEntry {
    fn new(id: &str, title: String, parent_id: Option<&str>) -> MenuEntry {
        MenuEntry {
            id: id.to_string(),
            title,
            contexts: vec![CONTEXT_TAB.to_string()],
            parent_id: parent_id.map(str::to_string),
        }
    }
}

/// A single key type gets a flat entry, several get a submenu
pub fn menu_layout(items: &[KeyType], messages: &impl Messages) -> Vec<MenuEntry> {
    let label = |key_type: &KeyType| messages.message(key_type.as_str(), &[]);

    match items {
        [] => Vec::new(),
        [key_type] => vec![MenuEntry::new(
            key_type.as_str(),
            messages.message(KEY_UNIQ_BY, &[label(key_type)]),
            None,
        )],
        _ => std::iter::once(MenuEntry::new(KEY_UNIQ, messages.message(KEY_UNIQ, &[]), None))
            .chain(
                items
                    .iter()
                    .map(|key_type| MenuEntry::new(key_type.as_str(), label(key_type), Some(KEY_UNIQ))),
            )
            .collect(),
    }
}

/// The key type behind a clicked entry; the parent entry has none
pub fn clicked_key_type(menu_item_id: &str) -> Option<KeyType> {
    menu_item_id.parse().ok()
}

pub async fn rebuild_menu<H>(host: &H, items: &[KeyType]) -> Result<(), HostError>
where
    H: MenuHost + Messages,
{
    let entries = menu_layout(items, host);
    host.replace_menu(&entries).await?;
    debug!("Menu rebuilt with {} entries", entries.len());
    Ok(())
}
