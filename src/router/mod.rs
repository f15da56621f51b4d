//! Binding a WADL resource tree onto a router.
//!
//! Each resource with an `id` is attached at its absolute URI pattern, the
//! concatenation of the paths of its ancestors and its own. The target bound
//! at that pattern is obtained from the identifier through a caller supplied
//! lookup. Resources without an `id` are skipped together with their
//! descendants.
//!
//! Absolute patterns are computed into a separate result; the parsed tree
//! keeps its relative paths.
//!
//! # Examples
//!
//! ```
//! use wadloxide::model::{ResourceInfo, ResourcesInfo};
//! use wadloxide::router::{attach_resources, RouteTable};
//!
//! let mut resources = ResourcesInfo::default();
//! resources.resources.push(
//!     ResourceInfo::new("items")
//!         .with_identifier("Items")
//!         .with_child(ResourceInfo::new("{id}").with_identifier("Item")),
//! );
//!
//! let mut table = RouteTable::new();
//! let count = attach_resources(&resources, &mut table, |id| Some(id.to_lowercase())).unwrap();
//! assert_eq!(count, 2);
//!
//! let found = table.find("items/42").unwrap();
//! assert_eq!(found.target, "item");
//! assert_eq!(found.variables, vec![("id".to_string(), "42".to_string())]);
//! ```

use crate::error::AttachError;
use crate::model::{ApplicationInfo, ResourceInfo, ResourcesInfo};

/// Joins a parent pattern and a child path with exactly one `/` between
/// them.
///
/// A separator is inserted only when neither side provides one, and one of
/// two provided separators is dropped. An empty parent leaves the child
/// unchanged.
///
/// ```
/// use wadloxide::router::compose_path;
///
/// assert_eq!(compose_path("items", "5"), "items/5");
/// assert_eq!(compose_path("items/", "/5"), "items/5");
/// assert_eq!(compose_path("", "items"), "items");
/// ```
#[must_use]
pub fn compose_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        return child.to_string();
    }
    if child.is_empty() {
        return parent.to_string();
    }
    match (parent.ends_with('/'), child.strip_prefix('/')) {
        (true, Some(rest)) => format!("{parent}{rest}"),
        (false, None) => format!("{parent}/{child}"),
        _ => format!("{parent}{child}"),
    }
}

/// A resource together with its absolute URI pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute<'a> {
    /// Paths of the ancestors and of the resource, joined.
    pub pattern: String,
    /// The resource attached at `pattern`.
    pub resource: &'a ResourceInfo,
}

impl ResolvedRoute<'_> {
    /// The identifier of the resource.
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.resource.identifier.as_deref().unwrap_or_default()
    }
}

/// Computes the absolute pattern of every attachable resource, parents
/// before their children, siblings in document order.
#[must_use]
pub fn resolve_routes(resources: &ResourcesInfo) -> Vec<ResolvedRoute<'_>> {
    let mut routes = Vec::new();
    for resource in &resources.resources {
        collect_routes(resource, "", &mut routes);
    }
    routes
}

fn collect_routes<'a>(
    resource: &'a ResourceInfo,
    parent: &str,
    routes: &mut Vec<ResolvedRoute<'a>>,
) {
    let path = resource.path.as_deref().unwrap_or_default();
    if resource.identifier.is_none() {
        log::warn!(
            "Unable to find the 'id' attribute of the resource element with this path attribute \"{path}\""
        );
        return;
    }
    let pattern = compose_path(parent, path);
    routes.push(ResolvedRoute {
        pattern: pattern.clone(),
        resource,
    });
    for child in &resource.child_resources {
        collect_routes(child, &pattern, routes);
    }
}

/// Something targets can be attached to under a URI pattern.
pub trait Router<T> {
    /// Binds `target` to `uri_pattern`.
    fn attach(&mut self, uri_pattern: &str, target: T);
}

/// Attaches every resource of `resources` with an identifier to `router`.
///
/// `lookup` maps a resource identifier to the target to bind. Returns the
/// number of routes attached.
///
/// # Errors
///
/// Returns [`AttachError::UnknownTarget`] for the first identifier `lookup`
/// has no target for. Routes attached before the failure stay attached.
pub fn attach_resources<T, R, F>(
    resources: &ResourcesInfo,
    router: &mut R,
    mut lookup: F,
) -> Result<usize, AttachError>
where
    R: Router<T> + ?Sized,
    F: FnMut(&str) -> Option<T>,
{
    let mut attached = 0;
    for route in resolve_routes(resources) {
        let identifier = route.identifier();
        let Some(target) = lookup(identifier) else {
            log::warn!(
                "Error during the attachment of the WADL application: no target for \"{identifier}\""
            );
            return Err(AttachError::UnknownTarget {
                identifier: identifier.to_string(),
                pattern: route.pattern,
            });
        };
        log::debug!("Attaching \"{identifier}\" to \"{}\"", route.pattern);
        router.attach(&route.pattern, target);
        attached += 1;
    }
    Ok(attached)
}

/// Attaches the resource tree of `application`, if any.
///
/// # Errors
///
/// As [`attach_resources`].
pub fn attach_application<T, R, F>(
    application: &ApplicationInfo,
    router: &mut R,
    lookup: F,
) -> Result<usize, AttachError>
where
    R: Router<T> + ?Sized,
    F: FnMut(&str) -> Option<T>,
{
    match &application.resources {
        Some(resources) => attach_resources(resources, router, lookup),
        None => Ok(0),
    }
}

/// The path under which the application is mounted on a host: the path
/// component of `resources/@base`.
///
/// A base that is not an absolute URI is returned as is. Returns `None`
/// when there is no base.
#[must_use]
pub fn mount_path(resources: &ResourcesInfo) -> Option<String> {
    let Some(base) = resources.base_ref.as_deref() else {
        log::warn!(
            "The WADL application has no base reference defined. Unable to guess the virtual host."
        );
        return None;
    };
    Some(match url::Url::parse(base) {
        Ok(url) => url.path().to_string(),
        Err(_) => base.to_string(),
    })
}

/// An in-memory router that matches request paths against URI templates.
///
/// Routes are tried in attachment order and the first match wins.
#[derive(Debug, Clone)]
pub struct RouteTable<T> {
    routes: Vec<(String, T)>,
}

/// A successful [`RouteTable::find`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, T> {
    /// The URI template that matched.
    pub pattern: &'a str,
    /// The target attached at `pattern`.
    pub target: &'a T,
    /// Values of the template variables, in template order.
    pub variables: Vec<(String, String)>,
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<T> RouteTable<T> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over `(pattern, target)` pairs in attachment order.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &T)> {
        self.routes.iter().map(|(p, t)| (p.as_str(), t))
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no route is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Finds the first route whose template matches `path`.
    ///
    /// Leading and trailing slashes are not significant. A `{name}`
    /// variable matches a non-empty part of a single segment.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<RouteMatch<'_, T>> {
        self.routes.iter().find_map(|(pattern, target)| {
            match_template(pattern, path).map(|variables| RouteMatch {
                pattern,
                target,
                variables,
            })
        })
    }
}

impl<T> Router<T> for RouteTable<T> {
    fn attach(&mut self, uri_pattern: &str, target: T) {
        self.routes.push((uri_pattern.to_string(), target));
    }
}

fn segments(path: &str) -> Vec<&str> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

fn match_template(template: &str, path: &str) -> Option<Vec<(String, String)>> {
    let template = segments(template);
    let path = segments(path);
    if template.len() != path.len() {
        return None;
    }
    let mut variables = Vec::new();
    for (pattern, segment) in template.iter().zip(&path) {
        match_segment(pattern, segment, &mut variables)?;
    }
    Some(variables)
}

/// Matches one path segment against a template segment such as `{id}` or
/// `{name}.{ext}`. Each variable extends up to the next literal.
fn match_segment(
    pattern: &str,
    segment: &str,
    variables: &mut Vec<(String, String)>,
) -> Option<()> {
    let mut pattern = pattern;
    let mut segment = segment;
    while !pattern.is_empty() {
        if let Some(rest) = pattern.strip_prefix('{') {
            let close = rest.find('}')?;
            let name = &rest[..close];
            pattern = &rest[close + 1..];
            let literal_end = pattern.find('{').unwrap_or(pattern.len());
            let literal = &pattern[..literal_end];
            let value_end = if literal.is_empty() {
                segment.len()
            } else {
                segment.find(literal)?
            };
            if value_end == 0 {
                return None;
            }
            variables.push((name.to_string(), segment[..value_end].to_string()));
            segment = &segment[value_end..];
        } else {
            let literal_end = pattern.find('{').unwrap_or(pattern.len());
            segment = segment.strip_prefix(&pattern[..literal_end])?;
            pattern = &pattern[literal_end..];
        }
    }
    segment.is_empty().then_some(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn tree() -> ResourcesInfo {
        ResourcesInfo {
            base_ref: Some("http://example.com/api/".to_string()),
            resources: vec![
                ResourceInfo::new("items")
                    .with_identifier("Items")
                    .with_child(ResourceInfo::new("{id}").with_identifier("Item").with_child(
                        ResourceInfo::new("/parts/").with_identifier("Parts"),
                    ))
                    .with_child(
                        ResourceInfo::new("hidden").with_child(
                            ResourceInfo::new("never").with_identifier("Never"),
                        ),
                    ),
                ResourceInfo::new("/orders").with_identifier("Orders"),
            ],
            documentations: vec![],
        }
    }

    #[test]
    fn test_compose_path() {
        assert_eq!(compose_path("items", "5"), "items/5");
        assert_eq!(compose_path("items/", "/5"), "items/5");
        assert_eq!(compose_path("items/", "5"), "items/5");
        assert_eq!(compose_path("items", "/5"), "items/5");
        assert_eq!(compose_path("", "/root"), "/root");
        assert_eq!(compose_path("items", ""), "items");
    }

    #[test]
    fn test_resolve_routes_preorder_without_mutation() {
        let resources = tree();
        let before = resources.clone();
        let routes = resolve_routes(&resources);
        let resolved: Vec<_> = routes
            .iter()
            .map(|r| (r.identifier(), r.pattern.as_str()))
            .collect();
        assert_eq!(
            resolved,
            vec![
                ("Items", "items"),
                ("Item", "items/{id}"),
                ("Parts", "items/{id}/parts/"),
                ("Orders", "/orders"),
            ]
        );
        assert_eq!(resources, before);
        assert_eq!(routes[1].resource.path.as_deref(), Some("{id}"));
    }

    #[test]
    fn test_attach_resources() {
        let resources = tree();
        let targets: HashMap<&str, u32> =
            [("Items", 1), ("Item", 2), ("Parts", 3), ("Orders", 4)].into();
        let mut table = RouteTable::new();
        let count =
            attach_resources(&resources, &mut table, |id| targets.get(id).copied()).unwrap();
        assert_eq!(count, 4);
        assert_eq!(table.len(), 4);
        let patterns: Vec<_> = table.routes().map(|(p, _)| p).collect();
        assert_eq!(patterns, vec!["items", "items/{id}", "items/{id}/parts/", "/orders"]);
    }

    #[test]
    fn test_unknown_target_aborts_without_rollback() {
        let resources = tree();
        let mut table = RouteTable::new();
        let err = attach_resources(&resources, &mut table, |id| {
            (id != "Parts").then(|| id.to_string())
        })
        .unwrap_err();
        assert_eq!(
            err,
            AttachError::UnknownTarget {
                identifier: "Parts".to_string(),
                pattern: "items/{id}/parts/".to_string(),
            }
        );
        assert_eq!(table.len(), 2);
        assert!(table.find("orders").is_none());
    }

    #[test]
    fn test_attach_application_without_resources() {
        let app = ApplicationInfo::default();
        let mut table: RouteTable<()> = RouteTable::new();
        assert_eq!(attach_application(&app, &mut table, |_| Some(())).unwrap(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_route_table_matching() {
        let mut table = RouteTable::new();
        table.attach("items", "list");
        table.attach("items/{id}", "item");
        table.attach("files/{name}.{ext}", "file");
        assert_eq!(table.find("/items/").unwrap().target, &"list");
        let item = table.find("items/7").unwrap();
        assert_eq!(item.pattern, "items/{id}");
        assert_eq!(item.variables, vec![("id".to_string(), "7".to_string())]);
        let file = table.find("files/report.pdf").unwrap();
        assert_eq!(
            file.variables,
            vec![
                ("name".to_string(), "report".to_string()),
                ("ext".to_string(), "pdf".to_string()),
            ]
        );
        assert!(table.find("files/.pdf").is_none());
        assert!(table.find("items/7/extra").is_none());
        assert!(table.find("other").is_none());
    }

    #[test]
    fn test_mount_path() {
        assert_eq!(mount_path(&tree()).as_deref(), Some("/api/"));
        let relative = ResourcesInfo {
            base_ref: Some("/svc".to_string()),
            ..ResourcesInfo::default()
        };
        assert_eq!(mount_path(&relative).as_deref(), Some("/svc"));
        assert_eq!(mount_path(&ResourcesInfo::default()), None);
    }
}
