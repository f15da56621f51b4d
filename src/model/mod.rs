//! In-memory WADL document model.
//!
//! Every WADL element has a matching `*Info` struct. Nodes own their
//! children directly: the resource tree is a strict tree (each child has a
//! single parent) and cross references (`resource_type`, `href`, `type`)
//! are kept as plain reference strings rather than links into the graph.
//!
//! All collections are plain `Vec`s initialised empty, so an absent element
//! and an empty list are the same thing. Nodes carry no synchronisation of
//! their own; share a graph between threads behind a lock of your choice.

mod application;
mod documentation;
mod method;
mod parameter;
mod representation;
mod resource;

use std::collections::BTreeMap;

pub use application::{ApplicationInfo, GrammarsInfo, IncludeInfo};
pub use documentation::{DocumentationInfo, MarkupAttribute, MarkupElement, MarkupNode};
pub use method::{MethodInfo, RequestInfo, ResponseInfo};
pub use parameter::{LinkInfo, OptionInfo, ParameterInfo, ParameterStyle};
pub use representation::{FaultInfo, RepresentationInfo};
pub use resource::{ResourceInfo, ResourceTypeInfo, ResourcesInfo};

/// The WADL namespace (2006/10 submission).
pub const WADL_NAMESPACE: &str = "http://research.sun.com/wadl/2006/10";

/// The namespace bound to the reserved `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Namespace declarations keyed by namespace URI, valued by prefix.
pub type NamespaceMap = BTreeMap<String, String>;

/// Access to the `<doc>` children of a WADL node.
pub trait Documented {
    /// The documentation entries in document order.
    fn documentations(&self) -> &[DocumentationInfo];

    /// Mutable access to the documentation entries.
    fn documentations_mut(&mut self) -> &mut Vec<DocumentationInfo>;

    /// The title of the first documentation entry, if any.
    fn title(&self) -> Option<&str> {
        self.documentations()
            .first()
            .and_then(|doc| doc.title.as_deref())
    }

    /// Appends a documentation entry holding `text`.
    fn add_documentation(&mut self, text: &str) {
        self.documentations_mut().push(DocumentationInfo::new(text));
    }
}

macro_rules! impl_documented {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Documented for $ty {
                fn documentations(&self) -> &[DocumentationInfo] {
                    &self.documentations
                }

                fn documentations_mut(&mut self) -> &mut Vec<DocumentationInfo> {
                    &mut self.documentations
                }
            }
        )+
    };
}

impl_documented!(
    ApplicationInfo,
    GrammarsInfo,
    IncludeInfo,
    LinkInfo,
    MethodInfo,
    OptionInfo,
    ParameterInfo,
    RepresentationInfo,
    RequestInfo,
    ResourceInfo,
    ResourceTypeInfo,
    ResourcesInfo,
    ResponseInfo,
);

impl Documented for FaultInfo {
    fn documentations(&self) -> &[DocumentationInfo] {
        &self.0.documentations
    }

    fn documentations_mut(&mut self) -> &mut Vec<DocumentationInfo> {
        &mut self.0.documentations
    }
}

/// Unions the namespaces implied by each documentation entry into `namespaces`.
fn update_documentation_namespaces(docs: &[DocumentationInfo], namespaces: &mut NamespaceMap) {
    for doc in docs {
        doc.update_namespaces(namespaces);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_collections_are_empty() {
        let resource = ResourceInfo::default();
        assert!(resource.child_resources.is_empty());
        assert!(resource.methods.is_empty());
        assert!(resource.parameters.is_empty());
        assert!(resource.resource_types.is_empty());
        assert!(resource.documentations().is_empty());

        let app = ApplicationInfo::default();
        assert!(app.resources.is_none());
        assert!(app.faults.is_empty());
        assert!(app.namespaces.is_empty());
    }

    #[test]
    fn test_repeated_access_yields_same_collection() {
        let mut resource = ResourceInfo::default();
        let first: *const Vec<MethodInfo> = &resource.methods;
        resource.methods.push(MethodInfo::new(http::Method::GET));
        let second: *const Vec<MethodInfo> = &resource.methods;
        assert_eq!(first, second);
        assert_eq!(resource.methods.len(), 1);
    }

    #[test]
    fn test_documented_title() {
        let mut option = OptionInfo::new("json");
        assert_eq!(option.title(), None);
        option.add_documentation("JSON output");
        option.documentations_mut()[0].title = Some("JSON".to_string());
        assert_eq!(option.title(), Some("JSON"));
        assert_eq!(
            option.documentations()[0].text_content.as_deref(),
            Some("JSON output")
        );
    }

    #[test]
    fn test_fault_documented_through_representation() {
        let mut fault = FaultInfo::default();
        fault.add_documentation("Not found");
        assert_eq!(fault.0.documentations.len(), 1);
    }
}
