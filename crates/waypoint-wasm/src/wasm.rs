//! WASM bindings for JavaScript interop

use crate::browser::{self, BrowserHistory};
use crate::views::{self, AppView};
use wasm_bindgen::prelude::*;
use waypoint_router::{
    ActiveRoute, MissPolicy, RouteChange, Router, RouterConfig, SubscriptionId,
};

// ============================================================================
// Router
// ============================================================================

/// WASM-exposed Router over `window.history`
///
/// Subscribers run synchronously inside `navigate`/`replace` and may call
/// back into the router; nested navigations run once they return.
#[wasm_bindgen]
pub struct WasmRouter {
    inner: Router<AppView, BrowserHistory>,
}

#[wasm_bindgen]
impl WasmRouter {
    /// Attach to the page and resolve the current URL.
    ///
    /// Base precedence: `base` argument, build-time `BASE_URL`, `<base href>`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        base: Option<String>,
        report_misses: Option<bool>,
        strict: Option<bool>,
    ) -> Result<WasmRouter, JsError> {
        let base = base
            .filter(|base| !base.is_empty())
            .or_else(|| views::build_base().map(str::to_string))
            .or_else(browser::document_base)
            .unwrap_or_default();

        let miss_policy = if report_misses.unwrap_or(true) {
            MissPolicy::NotFound
        } else {
            MissPolicy::Silent
        };

        let config = RouterConfig::new()
            .base(base)
            .miss_policy(miss_policy)
            .strict(strict.unwrap_or(true));

        let table = views::app_table()?;
        let history = BrowserHistory::new()?;
        Ok(Self {
            inner: Router::new(config, table, history),
        })
    }

    /// Push `target` (a path such as `/tasks` or a route name such as `tasks`)
    pub fn navigate(&self, target: &str) -> Result<(), JsError> {
        Ok(self.inner.navigate(target)?)
    }

    /// Replace the current entry with `target`
    pub fn replace(&self, target: &str) -> Result<(), JsError> {
        Ok(self.inner.replace(target)?)
    }

    pub fn back(&self) {
        self.inner.back();
    }

    pub fn forward(&self) {
        self.inner.forward();
    }

    pub fn go(&self, delta: i32) {
        self.inner.go(delta);
    }

    pub fn refresh(&self) {
        self.inner.refresh();
    }

    /// URL for `target`, for use in `<a href>`
    pub fn href(&self, target: &str) -> Result<String, JsError> {
        Ok(self.inner.href(target)?)
    }

    /// Active route, or `undefined` when unmatched
    pub fn active(&self) -> Option<WasmActiveRoute> {
        self.inner.active().map(WasmActiveRoute::from)
    }

    #[wasm_bindgen(getter)]
    pub fn route_name(&self) -> Option<String> {
        self.inner.active().map(|active| active.route.name)
    }

    #[wasm_bindgen(getter)]
    pub fn view_id(&self) -> Option<u32> {
        self.inner.view().map(AppView::id)
    }

    /// Current browser location, base included
    #[wasm_bindgen(getter)]
    pub fn location(&self) -> String {
        self.inner.location()
    }

    /// Call `callback(change)` after every route change
    pub fn subscribe(&self, callback: js_sys::Function) -> Result<u32, JsError> {
        let id = self.inner.subscribe(move |change: &RouteChange<AppView>| {
            let change = JsValue::from(WasmRouteChange::from(change));
            if let Err(err) = callback.call1(&JsValue::NULL, &change) {
                log::error!("route subscriber threw: {err:?}");
            }
        });
        match subscription_handle(id) {
            Some(handle) => Ok(handle),
            None => {
                self.inner.unsubscribe(id);
                Err(JsError::new("subscription ids exhausted"))
            }
        }
    }

    pub fn unsubscribe(&self, id: u32) -> bool {
        self.inner.unsubscribe(u64::from(id))
    }

    /// Detach from `window.history`; the router is unusable afterwards
    pub fn destroy(self) {}
}

/// JS handle for a subscription; `None` once ids no longer fit in a `u32`
fn subscription_handle(id: SubscriptionId) -> Option<u32> {
    u32::try_from(id).ok()
}

// ============================================================================
// Route results
// ============================================================================

/// Active route for WASM
#[wasm_bindgen]
pub struct WasmActiveRoute {
    pub view_id: u32,
    name: String,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

#[wasm_bindgen]
impl WasmActiveRoute {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn path(&self) -> String {
        self.path.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn query(&self) -> Option<String> {
        self.query.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }
}

impl From<ActiveRoute<AppView>> for WasmActiveRoute {
    fn from(active: ActiveRoute<AppView>) -> Self {
        Self {
            view_id: active.route.view.id(),
            name: active.route.name,
            path: active.path,
            query: active.query,
            fragment: active.fragment,
        }
    }
}

/// Route change delivered to subscribers
#[wasm_bindgen]
pub struct WasmRouteChange {
    /// `matched`, `not_found` or `cleared`
    kind: &'static str,
    name: Option<String>,
    path: Option<String>,
    view_id: Option<u32>,
}

#[wasm_bindgen]
impl WasmRouteChange {
    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> String {
        self.kind.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> Option<String> {
        self.name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn path(&self) -> Option<String> {
        self.path.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn view_id(&self) -> Option<u32> {
        self.view_id
    }
}

impl From<&RouteChange<AppView>> for WasmRouteChange {
    fn from(change: &RouteChange<AppView>) -> Self {
        match change {
            RouteChange::Matched(active) => Self {
                kind: "matched",
                name: Some(active.route.name.clone()),
                path: Some(active.path.clone()),
                view_id: Some(active.route.view.id()),
            },
            RouteChange::NotFound { path } => Self {
                kind: "not_found",
                name: None,
                path: Some(path.clone()),
                view_id: None,
            },
            RouteChange::Cleared => Self {
                kind: "cleared",
                name: None,
                path: None,
                view_id: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_handle() {
        assert_eq!(subscription_handle(0), Some(0));
        assert_eq!(subscription_handle(u64::from(u32::MAX)), Some(u32::MAX));
        assert_eq!(subscription_handle(u64::from(u32::MAX) + 1), None);
    }
}
