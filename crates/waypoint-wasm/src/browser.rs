//! `History` backed by `window.history`
//!
//! `pushState`/`replaceState` are silent, exactly as the router expects.
//! Traversal is asynchronous in the browser: `go` returns immediately and
//! listeners run from the `popstate` event once the entry is restored.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use waypoint_router::{History, HistoryListener, ListenerId};

type Listeners = Rc<RefCell<Vec<(ListenerId, Rc<RefCell<HistoryListener>>)>>>;

/// Browser session history
pub struct BrowserHistory {
    window: web_sys::Window,
    listeners: Listeners,
    next_listener: ListenerId,
    /// Registered while at least one listener exists
    popstate: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl BrowserHistory {
    pub fn new() -> Result<Self, JsError> {
        let window = web_sys::window().ok_or_else(|| JsError::new("no global window"))?;
        Ok(Self {
            window,
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener: 0,
            popstate: None,
        })
    }

    fn history(&self) -> Option<web_sys::History> {
        match self.window.history() {
            Ok(history) => Some(history),
            Err(err) => {
                log::error!("window.history unavailable: {err:?}");
                None
            }
        }
    }

    fn attach(&mut self) {
        let window = self.window.clone();
        let listeners = self.listeners.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            let location = current_location(&window);
            // Snapshot so a listener may unlisten (router teardown) mid-dispatch
            let snapshot: Vec<_> = listeners
                .borrow()
                .iter()
                .map(|(id, listener)| (*id, listener.clone()))
                .collect();
            for (id, listener) in snapshot {
                if listeners.borrow().iter().any(|(other, _)| *other == id) {
                    let mut listener = listener.borrow_mut();
                    (*listener)(&location);
                }
            }
        });

        if let Err(err) = self
            .window
            .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
        {
            log::error!("failed to register popstate listener: {err:?}");
            return;
        }
        self.popstate = Some(closure);
    }

    fn detach(&mut self) {
        if let Some(closure) = self.popstate.take() {
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
            {
                log::error!("failed to remove popstate listener: {err:?}");
            }
        }
    }
}

impl History for BrowserHistory {
    fn location(&self) -> String {
        current_location(&self.window)
    }

    fn push(&mut self, url: &str) {
        if let Some(history) = self.history() {
            if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(url)) {
                log::error!("pushState({url}) failed: {err:?}");
            }
        }
    }

    fn replace(&mut self, url: &str) {
        if let Some(history) = self.history() {
            if let Err(err) = history.replace_state_with_url(&JsValue::NULL, "", Some(url)) {
                log::error!("replaceState({url}) failed: {err:?}");
            }
        }
    }

    fn go(&mut self, delta: i32) {
        if let Some(history) = self.history() {
            if let Err(err) = history.go_with_delta(delta) {
                log::error!("history.go({delta}) failed: {err:?}");
            }
        }
    }

    fn listen(&mut self, listener: HistoryListener) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(listener))));
        if self.popstate.is_none() {
            self.attach();
        }
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        let empty = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|(listener_id, _)| *listener_id != id);
            listeners.is_empty()
        };
        if empty {
            self.detach();
        }
    }
}

impl Drop for BrowserHistory {
    fn drop(&mut self) {
        self.detach();
    }
}

/// `pathname + search + hash` of the current page
pub fn current_location(window: &web_sys::Window) -> String {
    let location = window.location();
    let mut url = location.pathname().unwrap_or_else(|_| "/".to_string());
    url.push_str(&location.search().unwrap_or_default());
    url.push_str(&location.hash().unwrap_or_default());
    url
}

/// `href` of the document's `<base>` element, if present
pub fn document_base() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let base = document.query_selector("base").ok()??;
    base.get_attribute("href")
}
