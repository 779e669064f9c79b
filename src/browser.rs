/// WebExtension APIs, reached through the `extension.js` bridge

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::error::HostError;
use crate::host::{Clock, ConfigStore, MenuHost, Messages, Notifier, TabHost};
use crate::menu::MenuEntry;
use crate::tab_data::{TabId, TabInfo, WindowId};

// Import JS bridge functions
#[wasm_bindgen(module = "/extension.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn queryTabs(window_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeTabs(tab_ids: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn activateTab(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn showNotification(id: &str, title: &str, message: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn replaceMenu(entries: JsValue) -> Result<(), JsValue>;

    async fn sleep(ms: u32);

    fn getMessage(key: &str, args: JsValue) -> String;
}

impl From<JsValue> for HostError {
    fn from(e: JsValue) -> Self {
        HostError::new(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
    }
}

impl From<serde_wasm_bindgen::Error> for HostError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        HostError::new(format!("Failed to convert: {}", e))
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, HostError> {
    // Plain objects rather than ES Maps, the browser APIs reject Maps
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}

/// The running extension
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHost;

impl TabHost for BrowserHost {
    async fn query_tabs(&self, window_id: WindowId) -> Result<Vec<TabInfo>, HostError> {
        let tabs_js = queryTabs(window_id).await?;
        Ok(serde_wasm_bindgen::from_value(tabs_js)?)
    }

    async fn remove_tabs(&self, ids: &[TabId]) -> Result<(), HostError> {
        removeTabs(to_js(ids)?).await?;
        Ok(())
    }

    async fn activate_tab(&self, id: TabId) -> Result<(), HostError> {
        activateTab(id).await?;
        Ok(())
    }
}

impl Notifier for BrowserHost {
    async fn show_notification(&self, id: &str, title: &str, message: &str) -> Result<(), HostError> {
        showNotification(id, title, message).await?;
        Ok(())
    }
}

impl Messages for BrowserHost {
    fn message(&self, key: &str, args: &[String]) -> String {
        message(key, args)
    }
}

impl Clock for BrowserHost {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    async fn sleep(&self, ms: u32) {
        sleep(ms).await;
    }
}

impl ConfigStore for BrowserHost {
    async fn load(&self) -> Result<Value, HostError> {
        let storage_js = getStorage().await?;
        if storage_js.is_null() || storage_js.is_undefined() {
            return Ok(Value::Object(Default::default()));
        }
        Ok(serde_wasm_bindgen::from_value(storage_js)?)
    }

    async fn save(&self, value: &Value) -> Result<(), HostError> {
        setStorage(to_js(value)?).await?;
        Ok(())
    }
}

impl MenuHost for BrowserHost {
    async fn replace_menu(&self, entries: &[MenuEntry]) -> Result<(), HostError> {
        replaceMenu(to_js(entries)?).await?;
        Ok(())
    }
}

/// `i18n.getMessage`; unknown keys come back empty
pub fn message(key: &str, args: &[String]) -> String {
    let args_js = to_js(args).unwrap_or(JsValue::UNDEFINED);
    getMessage(key, args_js)
}

pub fn js_to_value(value: JsValue) -> Result<Value, HostError> {
    Ok(serde_wasm_bindgen::from_value(value)?)
}
