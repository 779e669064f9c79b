//! Conversions at the JS boundary, run with `wasm-pack test --headless --firefox`
#![cfg(target_arch = "wasm32")]

use serde_json::Value;
use tab_uniq::{select_survivors, DedupPolicy, KeyType, MenuEntry, TabInfo, TabSnapshot, UniqConfig};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn js_object(json: &str) -> JsValue {
    js_sys::JSON::parse(json).unwrap()
}

#[wasm_bindgen_test]
fn test_tabs_from_query_result() {
    let tabs_js = js_object(
        r#"[
            {"id": 11, "windowId": 1, "index": 0, "pinned": false, "active": false, "url": "https://a.example", "title": "A"},
            {"id": 12, "windowId": 1, "index": 1, "pinned": false, "active": true, "url": "https://a.example", "title": "A"}
        ]"#,
    );

    let tabs: Vec<TabInfo> = serde_wasm_bindgen::from_value(tabs_js).unwrap();
    let snapshot = TabSnapshot::new(tabs);
    let selection = select_survivors(&snapshot, KeyType::Url, DedupPolicy::default());

    assert_eq!(selection.removal_ids(), vec![12]);
}

#[wasm_bindgen_test]
fn test_config_from_storage_object() {
    let stored: Value =
        serde_wasm_bindgen::from_value(js_object(r#"{"menuItem": ["title"], "notification": true}"#)).unwrap();

    let config = UniqConfig::from_value(&stored);

    assert_eq!(config.menu_item, vec![KeyType::Title]);
    assert!(config.notification);
}

#[wasm_bindgen_test]
fn test_menu_entry_to_js() {
    let entry = MenuEntry {
        id: "url".to_string(),
        title: "URL".to_string(),
        contexts: vec!["tab".to_string()],
        parent_id: Some("uniq".to_string()),
    };

    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let entry_js = serde::Serialize::serialize(&entry, &serializer).unwrap();

    let parent = js_sys::Reflect::get(&entry_js, &JsValue::from_str("parentId")).unwrap();
    assert_eq!(parent.as_string().as_deref(), Some("uniq"));
}
