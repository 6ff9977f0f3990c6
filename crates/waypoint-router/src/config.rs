//! Router configuration

use crate::location::normalize_base;

/// What the rendering layer hears when a location matches no route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissPolicy {
    /// Signal `RouteChange::NotFound` with the unmatched path
    #[default]
    NotFound,
    /// Signal `RouteChange::Cleared`, no view
    Silent,
}

/// Router configuration
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Prefix the app is served under, normalized (`""` or `/segment...`)
    pub base: String,
    /// Behavior on unmatched locations
    pub miss_policy: MissPolicy,
    /// Exact path equality; when off a single trailing `/` is ignored
    pub strict: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base: String::new(),
            miss_policy: MissPolicy::NotFound,
            strict: true,
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(mut self, base: impl AsRef<str>) -> Self {
        self.base = normalize_base(base.as_ref());
        self
    }

    pub fn miss_policy(mut self, policy: MissPolicy) -> Self {
        self.miss_policy = policy;
        self
    }

    pub fn silent_misses(self) -> Self {
        self.miss_policy(MissPolicy::Silent)
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
