//! Route definitions and the immutable route table

use crate::error::{DefinitionField, Error, Result};
use crate::location::validate_path;
use std::collections::HashSet;

/// One navigable screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition<V> {
    /// Literal path, relative to the base
    pub path: String,
    /// Symbolic name for programmatic navigation
    pub name: String,
    /// Opaque view handed to the rendering layer
    pub view: V,
}

impl<V> RouteDefinition<V> {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: V) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view,
        }
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason| Error::InvalidDefinition {
            path: self.path.clone(),
            reason,
        };

        validate_path(&self.path).map_err(invalid)?;
        if self.path.contains(['?', '#']) {
            return Err(invalid("route path must not carry a query or fragment"));
        }
        if self.path.len() > 1 && self.path.ends_with('/') {
            return Err(invalid("route path must not end with '/'"));
        }
        if self.name.is_empty() {
            return Err(invalid("route name is empty"));
        }
        Ok(())
    }
}

/// Ordered, validated sequence of routes
///
/// Built once at startup; there is no way to add or remove routes later.
///
/// # Example
/// ```
/// use waypoint_router::{RouteDefinition, RouteTable};
///
/// let table = RouteTable::new(vec![
///     RouteDefinition::new("/", "home", 0u32),
///     RouteDefinition::new("/tasks", "tasks", 1u32),
/// ])
/// .unwrap();
///
/// assert_eq!(table.find_path("/tasks", true).unwrap().name, "tasks");
/// assert!(table.by_name("nope").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<V> {
    routes: Vec<RouteDefinition<V>>,
}

impl<V> RouteTable<V> {
    /// Validate and freeze a list of routes.
    ///
    /// Rejects malformed definitions and any duplicated path or name.
    pub fn new(routes: Vec<RouteDefinition<V>>) -> Result<Self> {
        let mut paths = HashSet::with_capacity(routes.len());
        let mut names = HashSet::with_capacity(routes.len());

        for route in &routes {
            route.validate()?;
            if !paths.insert(route.path.as_str()) {
                return Err(Error::DuplicateDefinition {
                    field: DefinitionField::Path,
                    value: route.path.clone(),
                });
            }
            if !names.insert(route.name.as_str()) {
                return Err(Error::DuplicateDefinition {
                    field: DefinitionField::Name,
                    value: route.name.clone(),
                });
            }
        }

        Ok(Self { routes })
    }

    /// First route whose path equals `path`, in declaration order.
    ///
    /// With `strict` off, one trailing `/` on `path` is ignored.
    pub fn find_path(&self, path: &str, strict: bool) -> Option<&RouteDefinition<V>> {
        let candidate = if !strict && path.len() > 1 {
            path.strip_suffix('/').unwrap_or(path)
        } else {
            path
        };
        self.routes.iter().find(|r| r.path == candidate)
    }

    /// Route with the given name
    pub fn by_name(&self, name: &str) -> Option<&RouteDefinition<V>> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Route mounted at `/`
    pub fn home(&self) -> Option<&RouteDefinition<V>> {
        self.routes.iter().find(|r| r.path == "/")
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteDefinition<V>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<'a, V> IntoIterator for &'a RouteTable<V> {
    type Item = &'a RouteDefinition<V>;
    type IntoIter = std::slice::Iter<'a, RouteDefinition<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
