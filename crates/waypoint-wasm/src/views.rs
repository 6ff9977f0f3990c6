//! Application route table
//!
//! Two screens: workflow upload at `/`, task monitoring at `/tasks`.

use waypoint_router::{Result, RouteDefinition, RouteTable};

/// Route name of the upload screen
pub const HOME: &str = "home";
/// Route name of the task list screen
pub const TASKS: &str = "tasks";

/// Views the rendering layer knows how to mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppView {
    Upload,
    TaskList,
}

impl AppView {
    /// Stable numeric id used across the JS boundary
    pub fn id(self) -> u32 {
        match self {
            AppView::Upload => 0,
            AppView::TaskList => 1,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(AppView::Upload),
            1 => Some(AppView::TaskList),
            _ => None,
        }
    }
}

/// Route definitions in declaration order
pub fn app_routes() -> Vec<RouteDefinition<AppView>> {
    vec![
        RouteDefinition::new("/", HOME, AppView::Upload),
        RouteDefinition::new("/tasks", TASKS, AppView::TaskList),
    ]
}

pub fn app_table() -> Result<RouteTable<AppView>> {
    RouteTable::new(app_routes())
}

/// Base path baked in at build time through `BASE_URL`, if any
pub fn build_base() -> Option<&'static str> {
    option_env!("BASE_URL").filter(|base| !base.is_empty())
}
