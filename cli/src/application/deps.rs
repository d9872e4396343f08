//! Dependency-tree discovery across related services.
//!
//! Read-only enrichment for the status view: the OS service manager still
//! resolves its own ordering for every start/stop command, so nothing here
//! feeds back into batch execution.

use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::application::ports::ServiceManager;
use crate::domain::error::ServiceError;

/// A service and its relationships: the services it depends on and the
/// services that depend on it, each expanded recursively.
#[derive(Debug)]
pub struct ServiceTree {
    pub name: String,
    pub display_name: Option<String>,
    pub depends_on: Vec<ServiceTree>,
    pub dependents: Vec<ServiceTree>,
}

/// Discover the relationship tree rooted at `name`.
///
/// A shared visited set guards against cycles in malformed service graphs:
/// a service already seen anywhere in the walk is skipped rather than
/// expanded again, so the recursion always terminates.
///
/// # Errors
///
/// Propagates the first `ServiceError` from the underlying lookups; a
/// missing display name alone is tolerated.
pub async fn discover(scm: &impl ServiceManager, name: &str) -> Result<ServiceTree, ServiceError> {
    let mut visited = HashSet::new();
    build(scm, name.to_string(), &mut visited).await
}

// Recursion through an async fn needs the boxed-future form.
fn build<'a, M: ServiceManager>(
    scm: &'a M,
    name: String,
    visited: &'a mut HashSet<String>,
) -> Pin<Box<dyn Future<Output = Result<ServiceTree, ServiceError>> + 'a>> {
    Box::pin(async move {
        visited.insert(name.clone());
        let display_name = scm.display_name(&name).await.ok();

        let mut depends_on = Vec::new();
        for dep in scm.dependencies(&name).await? {
            if visited.contains(&dep) {
                continue;
            }
            depends_on.push(build(scm, dep, &mut *visited).await?);
        }

        let mut dependents = Vec::new();
        for dep in scm.dependents(&name).await? {
            if visited.contains(&dep) {
                continue;
            }
            dependents.push(build(scm, dep, &mut *visited).await?);
        }

        Ok(ServiceTree {
            name,
            display_name,
            depends_on,
            dependents,
        })
    })
}

impl ServiceTree {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match &self.display_name {
            Some(display) => writeln!(f, "{indent}service: {} ({display})", self.name)?,
            None => writeln!(f, "{indent}service: {}", self.name)?,
        }
        if !self.depends_on.is_empty() {
            writeln!(f, "{indent}  depends on:")?;
            for child in &self.depends_on {
                child.write_node(f, depth + 2)?;
            }
        }
        if !self.dependents.is_empty() {
            writeln!(f, "{indent}  dependents:")?;
            for child in &self.dependents {
                child.write_node(f, depth + 2)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ServiceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, 0)
    }
}
