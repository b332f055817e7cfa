//! Ordered store of route declarations.

use std::sync::Arc;

use super::declaration::{HttpVerb, RouteDeclaration};

/// Append-only list of declarations, in declaration order.
#[derive(Debug, Default, Clone)]
pub struct RouteRegistry {
    routes: Vec<Arc<RouteDeclaration>>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, declaration: RouteDeclaration) -> Arc<RouteDeclaration> {
        let declaration = Arc::new(declaration);
        tracing::debug!(
            verb = %declaration.verb(),
            path = %declaration.path(),
            "Route registered"
        );
        self.routes.push(Arc::clone(&declaration));
        declaration
    }

    pub fn all(&self) -> &[Arc<RouteDeclaration>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn find(&self, verb: HttpVerb, path: &str) -> Option<&Arc<RouteDeclaration>> {
        self.routes
            .iter()
            .find(|route| route.verb() == verb && route.path() == path)
    }

    /// Declarations grouped by path template, groups in first-seen order.
    pub fn grouped(&self) -> Vec<(&str, Vec<&Arc<RouteDeclaration>>)> {
        let mut groups: Vec<(&str, Vec<&Arc<RouteDeclaration>>)> = Vec::new();
        for route in &self.routes {
            match groups.iter_mut().find(|(path, _)| *path == route.path()) {
                Some((_, members)) => members.push(route),
                None => groups.push((route.path(), vec![route])),
            }
        }
        groups
    }
}
