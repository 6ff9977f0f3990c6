//! Router: resolution and navigation
//!
//! The router owns the history backend and a shared resolver. The resolver
//! is reachable from the history's traversal listener, so back/forward
//! (including browser buttons) update the active route without going
//! through the router.
//!
//! Every entry point takes `&self`, so a subscriber holding a handle to the
//! router may navigate from inside a notification. Such calls are queued
//! and run in order once the current history operation has resolved.

use crate::config::{MissPolicy, RouterConfig};
use crate::error::{InvalidTarget, Result};
use crate::history::{History, ListenerId};
use crate::location::{self, Location};
use crate::route::{RouteDefinition, RouteTable};
use std::cell::{Cell, Ref, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Router::subscribe`]
pub type SubscriptionId = u64;

type Subscriber<V> = Rc<RefCell<dyn FnMut(&RouteChange<V>)>>;

/// Navigation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// App-relative path, optionally with `?query` and `#fragment`
    Path(String),
    /// Route name
    Name(String),
    /// The route mounted at `/`
    Home,
}

impl From<&str> for Target {
    /// Strings starting with `/` are paths, anything else is a route name
    fn from(target: &str) -> Self {
        if target.starts_with('/') {
            Target::Path(target.to_string())
        } else {
            Target::Name(target.to_string())
        }
    }
}

impl From<String> for Target {
    fn from(target: String) -> Self {
        if target.starts_with('/') {
            Target::Path(target)
        } else {
            Target::Name(target)
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Path(path) => write!(f, "path {path:?}"),
            Target::Name(name) => write!(f, "name {name:?}"),
            Target::Home => f.write_str("home"),
        }
    }
}

/// The matched route and the location that produced the match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRoute<V> {
    pub route: RouteDefinition<V>,
    /// Decoded path as observed (base stripped)
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl<V> ActiveRoute<V> {
    pub fn name(&self) -> &str {
        &self.route.name
    }

    pub fn view(&self) -> &V {
        &self.route.view
    }
}

/// Signal delivered to the rendering layer after each resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteChange<V> {
    /// A route matched; mount its view
    Matched(ActiveRoute<V>),
    /// Nothing matched and the router reports misses
    NotFound { path: String },
    /// Nothing matched and the router stays silent; mount nothing
    Cleared,
}

impl<V> RouteChange<V> {
    pub fn view(&self) -> Option<&V> {
        match self {
            RouteChange::Matched(active) => Some(active.view()),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct State<V> {
    active: Option<ActiveRoute<V>>,
    /// Last resolved location, matched or not
    location: Option<Location>,
    /// Full URL that produced `location`
    url: String,
}

struct Resolver<V> {
    table: RouteTable<V>,
    config: RouterConfig,
    state: RefCell<State<V>>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber<V>)>>,
    next_subscription: Cell<SubscriptionId>,
    pending: RefCell<VecDeque<String>>,
    resolving: Cell<bool>,
}

impl<V: Clone> Resolver<V> {
    /// Queue a location and drain the queue unless a resolution is
    /// already running further up the stack.
    fn sync(&self, url: &str) {
        self.pending.borrow_mut().push_back(url.to_string());
        if self.resolving.replace(true) {
            log::debug!("queued location change to {url}");
            return;
        }

        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(url) = next else { break };
            if let Some(change) = self.resolve(&url) {
                self.notify(&change);
            }
        }

        self.resolving.set(false);
    }

    /// One resolution step. `None` when the location did not change.
    fn resolve(&self, url: &str) -> Option<RouteChange<V>> {
        let loc = Location::parse(location::strip_base(url, &self.config.base));
        let mut state = self.state.borrow_mut();

        if state.location.as_ref() == Some(&loc) {
            log::debug!("location {url} unchanged");
            return None;
        }

        let change = match self.table.find_path(&loc.path, self.config.strict) {
            Some(route) => {
                log::debug!("resolved {url} -> {}", route.name);
                let active = ActiveRoute {
                    route: route.clone(),
                    path: loc.path.clone(),
                    query: loc.query.clone(),
                    fragment: loc.fragment.clone(),
                };
                state.active = Some(active.clone());
                RouteChange::Matched(active)
            }
            None => {
                log::warn!("no route matches {url}");
                state.active = None;
                match self.config.miss_policy {
                    MissPolicy::NotFound => RouteChange::NotFound {
                        path: loc.path.clone(),
                    },
                    MissPolicy::Silent => RouteChange::Cleared,
                }
            }
        };

        state.location = Some(loc);
        state.url = url.to_string();
        Some(change)
    }

    /// Run a snapshot of the subscribers with no borrows held, so they
    /// may subscribe, unsubscribe or read the active route. Subscribers
    /// removed mid-notification are skipped.
    fn notify(&self, change: &RouteChange<V>) {
        let snapshot: Vec<(SubscriptionId, Subscriber<V>)> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(id, subscriber)| (*id, subscriber.clone()))
            .collect();

        for (id, subscriber) in snapshot {
            let live = self.subscribers.borrow().iter().any(|(other, _)| *other == id);
            if live {
                let mut subscriber = subscriber.borrow_mut();
                (*subscriber)(change);
            }
        }
    }
}

enum Commit {
    Push,
    Replace,
}

enum HistoryOp {
    Commit {
        mode: Commit,
        url: String,
        /// `url` without the base, for the duplicate check
        relative: String,
    },
    Go(i32),
}

/// Client-side router
///
/// # Example
/// ```
/// use waypoint_router::{MemoryHistory, RouteDefinition, Router, RouterConfig};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum View { Upload, TaskList }
///
/// let router = Router::with_routes(
///     RouterConfig::new(),
///     vec![
///         RouteDefinition::new("/", "home", View::Upload),
///         RouteDefinition::new("/tasks", "tasks", View::TaskList),
///     ],
///     MemoryHistory::new("/"),
/// )
/// .unwrap();
///
/// assert_eq!(router.view(), Some(View::Upload));
/// router.navigate("tasks").unwrap();
/// assert_eq!(router.view(), Some(View::TaskList));
/// router.back();
/// assert_eq!(router.view(), Some(View::Upload));
/// ```
pub struct Router<V: Clone + 'static, H: History> {
    resolver: Rc<Resolver<V>>,
    history: RefCell<H>,
    ops: RefCell<VecDeque<HistoryOp>>,
    applying: Cell<bool>,
    listener: ListenerId,
}

impl<V: Clone + 'static, H: History> Router<V, H> {
    /// Attach to `history` and resolve its current location
    pub fn new(config: RouterConfig, table: RouteTable<V>, mut history: H) -> Self {
        log::info!(
            "router initialized with {} routes (base {:?})",
            table.len(),
            config.base
        );

        let resolver = Rc::new(Resolver {
            table,
            config,
            state: RefCell::new(State {
                active: None,
                location: None,
                url: String::new(),
            }),
            subscribers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
            pending: RefCell::new(VecDeque::new()),
            resolving: Cell::new(false),
        });

        let weak = Rc::downgrade(&resolver);
        let listener = history.listen(Box::new(move |url: &str| {
            if let Some(resolver) = weak.upgrade() {
                resolver.sync(url);
            }
        }));

        resolver.sync(&history.location());

        Self {
            resolver,
            history: RefCell::new(history),
            ops: RefCell::new(VecDeque::new()),
            applying: Cell::new(false),
            listener,
        }
    }

    /// Validate `routes` into a table, then attach
    pub fn with_routes(
        config: RouterConfig,
        routes: Vec<RouteDefinition<V>>,
        history: H,
    ) -> Result<Self> {
        Ok(Self::new(config, RouteTable::new(routes)?, history))
    }

    /// Currently active route, `None` when the location is unmatched
    pub fn active(&self) -> Option<ActiveRoute<V>> {
        self.resolver.state.borrow().active.clone()
    }

    /// View of the active route
    pub fn view(&self) -> Option<V> {
        self.resolver
            .state
            .borrow()
            .active
            .as_ref()
            .map(|active| active.route.view.clone())
    }

    /// Check whether the route named `name` is active
    pub fn is_active(&self, name: &str) -> bool {
        self.resolver
            .state
            .borrow()
            .active
            .as_ref()
            .is_some_and(|active| active.route.name == name)
    }

    pub fn table(&self) -> &RouteTable<V> {
        &self.resolver.table
    }

    pub fn config(&self) -> &RouterConfig {
        &self.resolver.config
    }

    /// Borrow the history backend.
    ///
    /// Panics when called from a subscriber while a traversal is running;
    /// use [`Router::location`] there.
    pub fn history(&self) -> Ref<'_, H> {
        self.history.borrow()
    }

    /// Current full location, base included.
    ///
    /// During a traversal this is the location being resolved.
    pub fn location(&self) -> String {
        match self.history.try_borrow() {
            Ok(history) => history.location(),
            Err(_) => self.resolver.state.borrow().url.clone(),
        }
    }

    /// Full URL (base included) that `target` navigates to
    pub fn href(&self, target: impl Into<Target>) -> Result<String> {
        let relative = self.target_location(&target.into())?;
        Ok(location::join_base(&self.resolver.config.base, &relative))
    }

    /// Push a history entry for `target` and resolve it
    pub fn navigate(&self, target: impl Into<Target>) -> Result<()> {
        self.commit(target.into(), Commit::Push)
    }

    /// Overwrite the current history entry with `target` and resolve it
    pub fn replace(&self, target: impl Into<Target>) -> Result<()> {
        self.commit(target.into(), Commit::Replace)
    }

    pub fn back(&self) {
        self.go(-1);
    }

    pub fn forward(&self) {
        self.go(1);
    }

    pub fn go(&self, delta: i32) {
        self.apply(HistoryOp::Go(delta));
    }

    /// Resolve the history's current location again
    pub fn refresh(&self) {
        let current = match self.history.try_borrow() {
            Ok(history) => history.location(),
            Err(_) => {
                log::debug!("refresh skipped during traversal");
                return;
            }
        };
        self.resolver.sync(&current);
    }

    /// Register a rendering-layer listener for route changes
    pub fn subscribe(&self, subscriber: impl FnMut(&RouteChange<V>) + 'static) -> SubscriptionId {
        let id = self.resolver.next_subscription.get();
        self.resolver.next_subscription.set(id + 1);
        self.resolver
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(subscriber))));
        id
    }

    /// Remove a listener. Returns `false` for unknown ids.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.resolver.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(subscription, _)| *subscription != id);
        before != subscribers.len()
    }

    fn commit(&self, target: Target, mode: Commit) -> Result<()> {
        let relative = self.target_location(&target)?;
        let url = location::join_base(&self.resolver.config.base, &relative);
        log::debug!("navigating to {target} at {url}");
        self.apply(HistoryOp::Commit {
            mode,
            url,
            relative,
        });
        Ok(())
    }

    /// Queue a history operation and drain the queue unless one is already
    /// running further up the stack.
    fn apply(&self, op: HistoryOp) {
        self.ops.borrow_mut().push_back(op);
        if self.applying.replace(true) {
            log::debug!("queued history operation");
            return;
        }

        loop {
            let next = self.ops.borrow_mut().pop_front();
            let Some(op) = next else { break };
            self.run(op);
        }

        self.applying.set(false);
    }

    fn run(&self, op: HistoryOp) {
        let url = match op {
            // Traversals resolve through the history listener
            HistoryOp::Go(delta) => {
                self.history.borrow_mut().go(delta);
                return;
            }
            HistoryOp::Commit {
                mode,
                url,
                relative,
            } => {
                let mut history = self.history.borrow_mut();
                let current = history.location();
                let current =
                    Location::parse(location::strip_base(&current, &self.resolver.config.base));
                if current == Location::parse(&relative) {
                    log::debug!("duplicate navigation to {url}");
                } else {
                    match mode {
                        Commit::Push => history.push(&url),
                        Commit::Replace => history.replace(&url),
                    }
                }
                url
            }
        };
        self.resolver.sync(&url);
    }

    /// App-relative location for a target, without the base
    fn target_location(&self, target: &Target) -> Result<String> {
        let table = &self.resolver.table;
        let resolved = match target {
            Target::Path(path) => {
                let path_only = path.split(['?', '#']).next().unwrap_or_default();
                location::validate_path(path_only)
                    .map(|()| path.clone())
                    .map_err(|reason| InvalidTarget::InvalidPath {
                        path: path.clone(),
                        reason,
                    })
            }
            Target::Name(name) => table
                .by_name(name)
                .map(|route| route.path.clone())
                .ok_or_else(|| InvalidTarget::UnknownName(name.clone())),
            Target::Home => table
                .home()
                .map(|route| route.path.clone())
                .ok_or(InvalidTarget::NoHomeRoute),
        };

        resolved.map_err(|err| {
            log::warn!("rejected navigation target: {err}");
            err.into()
        })
    }
}

impl<V: Clone + 'static, H: History> Drop for Router<V, H> {
    fn drop(&mut self) {
        self.history.get_mut().unlisten(self.listener);
        log::info!("router detached from history");
    }
}
