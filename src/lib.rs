/// Tab Uniq - closes duplicate tabs of a window
/// Built with Rust + WASM + Yew

mod background;
mod browser;
mod config;
mod error;
mod guard;
#[allow(async_fn_in_trait)]
pub mod host;
mod menu;
mod operations;
mod progress;
mod remover;
mod tab_data;
mod uniq;
pub mod ui;

#[cfg(test)]
mod testing;

use std::rc::Rc;

use log::{debug, error};
use wasm_bindgen::prelude::*;

use crate::browser::{js_to_value, BrowserHost};

pub use crate::background::{Background, UniqMessage};
pub use crate::config::{load_config, save_config, ConfigChange, UniqConfig};
pub use crate::error::{HostError, UniqError};
pub use crate::guard::{plan_refocus, rescue_active, Refocus, Rescue};
pub use crate::menu::{menu_layout, MenuEntry};
pub use crate::operations::{select_survivors, DedupPolicy, Selection};
pub use crate::progress::{Progress, Status};
pub use crate::remover::{BatchRemover, RemovalOrder};
pub use crate::tab_data::{ComparisonKey, KeyType, TabId, TabInfo, TabSnapshot, WindowId};
pub use crate::uniq::{run, run_with_status, RunOptions};

const KEY_DEBUG: &str = "debug";

thread_local! {
    static BACKGROUND: Rc<Background<BrowserHost>> = Rc::new(Background::new(BrowserHost));
}

fn background() -> Rc<Background<BrowserHost>> {
    BACKGROUND.with(Rc::clone)
}

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // Debug builds of the locale files set "debug" to "debug"
    let level = if browser::message(KEY_DEBUG, &[]) == KEY_DEBUG {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));
}

/// Load settings and build the context menu
#[wasm_bindgen]
pub async fn init_background() {
    if let Err(e) = background().init().await {
        error!("Initialization failed: {}", e);
    }
}

#[wasm_bindgen]
pub async fn on_storage_changed(changes: JsValue) {
    let result = match js_to_value(changes) {
        Ok(changes) => background().on_storage_changed(&changes).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        error!("Failed to apply settings: {}", e);
    }
}

/// Errors are already logged and notified by the run itself
#[wasm_bindgen]
pub async fn on_menu_clicked(menu_item_id: String, window_id: i32, pinned: bool) {
    let outcome = background()
        .on_menu_clicked(&menu_item_id, window_id, pinned)
        .await;
    if outcome.is_none() {
        debug!("Ignoring menu item {}", menu_item_id);
    }
}

#[wasm_bindgen]
pub async fn on_message_external(message: JsValue) {
    let result = match js_to_value(message) {
        Ok(message) => background().on_message(&message).await.map(|_| ()),
        Err(e) => Err(UniqError::InvalidMessage(e.to_string())),
    };
    // Failed runs are logged by the run itself
    if let Err(e @ (UniqError::InvalidMessage(_) | UniqError::UnknownKeyType(_))) = result {
        e.log();
    }
}

// Start the Yew app for the options page
#[wasm_bindgen]
pub fn start_options() {
    yew::Renderer::<ui::options::OptionsPage>::new().render();
}
