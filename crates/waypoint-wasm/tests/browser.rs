//! In-browser tests: `wasm-pack test --headless --firefox crates/waypoint-wasm`

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;
use waypoint_router::History;
use waypoint_wasm::{AppView, BrowserHistory, WasmRouter};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_push_and_replace_update_location() {
    let mut history = BrowserHistory::new().unwrap();
    history.push("/tasks?page=2");
    assert_eq!(history.location(), "/tasks?page=2");

    history.replace("/");
    assert_eq!(history.location(), "/");
}

#[wasm_bindgen_test]
fn test_router_navigation() {
    let router = WasmRouter::new(Some("/".to_string()), None, None).unwrap();

    router.navigate("tasks").unwrap();
    assert_eq!(router.location(), "/tasks");
    assert_eq!(router.route_name().as_deref(), Some("tasks"));
    assert_eq!(router.view_id(), Some(AppView::TaskList.id()));

    router.replace("/").unwrap();
    assert_eq!(router.view_id(), Some(AppView::Upload.id()));

    assert!(router.navigate("missing").is_err());
    assert_eq!(router.route_name().as_deref(), Some("home"));

    router.navigate("/nope").unwrap();
    assert!(router.active().is_none());

    router.destroy();
}

#[wasm_bindgen_test]
fn test_href_uses_base() {
    let router = WasmRouter::new(Some("/app/".to_string()), None, None).unwrap();
    assert_eq!(router.href("tasks").unwrap(), "/app/tasks");
    assert_eq!(router.href("home").unwrap(), "/app/");
    router.destroy();
}
