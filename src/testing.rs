/// In-memory browser used by the unit tests

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use serde_json::Value;

use crate::error::HostError;
use crate::host::{Clock, ConfigStore, MenuHost, Messages, Notifier, TabHost};
use crate::menu::MenuEntry;
use crate::tab_data::{TabId, TabInfo, WindowId};

/// Returns `Pending` once, like a real suspension point
pub struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

pub fn yield_now() -> YieldNow {
    YieldNow(false)
}

pub fn create_test_tab(id: TabId, index: i32, url: &str) -> TabInfo {
    TabInfo {
        id,
        window_id: 1,
        index,
        pinned: false,
        active: false,
        url: Some(url.to_string()),
        title: Some(format!("Title {}", id)),
    }
}

#[derive(Default)]
pub struct ScriptedHost {
    tabs: RefCell<Vec<TabInfo>>,
    query_error: RefCell<Option<HostError>>,
    fail_remove_at: Cell<Option<usize>>,
    fail_activate: Cell<bool>,
    fail_notifications: Cell<bool>,
    slow_removal: Cell<bool>,
    removed: RefCell<Vec<Vec<TabId>>>,
    activated: RefCell<Vec<TabId>>,
    notifications: RefCell<Vec<(String, String)>>,
    now: Cell<f64>,
    sleeps: Cell<usize>,
    sleep_hook: RefCell<Option<Box<dyn FnMut(usize)>>>,
    storage: RefCell<Value>,
    menus: RefCell<Vec<Vec<MenuEntry>>>,
}

impl ScriptedHost {
    pub fn new(tabs: Vec<TabInfo>) -> ScriptedHost {
        ScriptedHost {
            tabs: RefCell::new(tabs),
            storage: RefCell::new(Value::Object(Default::default())),
            ..ScriptedHost::default()
        }
    }

    pub fn fail_query(&self, message: &str) {
        *self.query_error.borrow_mut() = Some(HostError::new(message));
    }

    /// Fail the `call`-th (0-based) removal request
    pub fn fail_remove_at(&self, call: usize) {
        self.fail_remove_at.set(Some(call));
    }

    pub fn fail_activate(&self, fail: bool) {
        self.fail_activate.set(fail);
    }

    pub fn fail_notifications(&self, fail: bool) {
        self.fail_notifications.set(fail);
    }

    /// Suspend once inside every removal request
    pub fn slow_removal(&self, slow: bool) {
        self.slow_removal.set(slow);
    }

    pub fn set_now(&self, now: f64) {
        self.now.set(now);
    }

    pub fn on_sleep(&self, hook: impl FnMut(usize) + 'static) {
        *self.sleep_hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn set_storage(&self, value: Value) {
        *self.storage.borrow_mut() = value;
    }

    pub fn storage(&self) -> Value {
        self.storage.borrow().clone()
    }

    pub fn removed(&self) -> Vec<Vec<TabId>> {
        self.removed.borrow().clone()
    }

    pub fn activated(&self) -> Vec<TabId> {
        self.activated.borrow().clone()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications
            .borrow()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn notification_ids(&self) -> Vec<String> {
        self.notifications
            .borrow()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn sleep_count(&self) -> usize {
        self.sleeps.get()
    }

    pub fn menus(&self) -> Vec<Vec<MenuEntry>> {
        self.menus.borrow().clone()
    }

    pub fn open_tab_ids(&self) -> Vec<TabId> {
        self.tabs.borrow().iter().map(|tab| tab.id).collect()
    }
}

impl TabHost for ScriptedHost {
    async fn query_tabs(&self, window_id: WindowId) -> Result<Vec<TabInfo>, HostError> {
        if let Some(err) = self.query_error.borrow().clone() {
            return Err(err);
        }
        Ok(self
            .tabs
            .borrow()
            .iter()
            .filter(|tab| tab.window_id == window_id)
            .cloned()
            .collect())
    }

    async fn remove_tabs(&self, ids: &[TabId]) -> Result<(), HostError> {
        if self.slow_removal.get() {
            yield_now().await;
        }
        let call = self.removed.borrow().len();
        if self.fail_remove_at.get() == Some(call) {
            return Err(HostError::new(format!("Invalid tab ID: {}", ids[0])));
        }
        self.removed.borrow_mut().push(ids.to_vec());
        self.tabs.borrow_mut().retain(|tab| !ids.contains(&tab.id));
        Ok(())
    }

    async fn activate_tab(&self, id: TabId) -> Result<(), HostError> {
        if self.fail_activate.get() {
            return Err(HostError::new(format!("No tab with id: {}", id)));
        }
        self.activated.borrow_mut().push(id);
        for tab in self.tabs.borrow_mut().iter_mut() {
            tab.active = tab.id == id;
        }
        Ok(())
    }
}

impl Notifier for ScriptedHost {
    async fn show_notification(&self, id: &str, _title: &str, message: &str) -> Result<(), HostError> {
        if self.fail_notifications.get() {
            return Err(HostError::new("notifications disabled"));
        }
        self.notifications
            .borrow_mut()
            .push((id.to_string(), message.to_string()));
        Ok(())
    }
}

impl Messages for ScriptedHost {
    fn message(&self, key: &str, args: &[String]) -> String {
        format!("{}[{}]", key, args.join(","))
    }
}

impl Clock for ScriptedHost {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    async fn sleep(&self, ms: u32) {
        self.now.set(self.now.get() + f64::from(ms));
        let count = self.sleeps.get() + 1;
        self.sleeps.set(count);
        if let Some(hook) = self.sleep_hook.borrow_mut().as_mut() {
            hook(count);
        }
        yield_now().await;
    }
}

impl ConfigStore for ScriptedHost {
    async fn load(&self) -> Result<Value, HostError> {
        Ok(self.storage.borrow().clone())
    }

    async fn save(&self, value: &Value) -> Result<(), HostError> {
        *self.storage.borrow_mut() = value.clone();
        Ok(())
    }
}

impl MenuHost for ScriptedHost {
    async fn replace_menu(&self, entries: &[MenuEntry]) -> Result<(), HostError> {
        self.menus.borrow_mut().push(entries.to_vec());
        Ok(())
    }
}
