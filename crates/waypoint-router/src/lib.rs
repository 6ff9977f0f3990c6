//! waypoint-router: client-side navigation router
//!
//! Maps URL paths to views for a single-page application and keeps the
//! active view in step with the browser location. Shared by the WASM
//! bindings and by any host that supplies its own [`History`].
//!
//! ## Features
//! - Ordered, immutable route table with duplicate detection at startup
//! - Exact path matching, optional trailing-slash tolerance
//! - Navigation by path or by route name, push or replace
//! - Back/forward through an injected history backend
//! - Base path stripping and prepending
//! - Explicit or silent reporting of unmatched locations
//!
//! ## Example
//! ```
//! use waypoint_router::{MemoryHistory, RouteChange, RouteDefinition, Router, RouterConfig};
//!
//! let router = Router::with_routes(
//!     RouterConfig::new().base("/app"),
//!     vec![
//!         RouteDefinition::new("/", "home", "upload"),
//!         RouteDefinition::new("/tasks", "tasks", "task_list"),
//!     ],
//!     MemoryHistory::new("/app/"),
//! )
//! .unwrap();
//!
//! router.subscribe(|change: &RouteChange<&str>| {
//!     if let Some(view) = change.view() {
//!         println!("mount {view}");
//!     }
//! });
//!
//! router.navigate("tasks").unwrap();
//! assert_eq!(router.location(), "/app/tasks");
//! assert_eq!(router.view(), Some("task_list"));
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod history;
pub mod location;
pub mod route;
pub mod router;

// Re-exports
pub use config::{MissPolicy, RouterConfig};
pub use error::{DefinitionField, Error, InvalidTarget, Result};
pub use history::{History, HistoryListener, ListenerId, MemoryHistory};
pub use location::{normalize_base, Location};
pub use route::{RouteDefinition, RouteTable};
pub use router::{ActiveRoute, RouteChange, Router, SubscriptionId, Target};
