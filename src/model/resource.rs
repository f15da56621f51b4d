//! The resource tree: `resources`, `resource` and `resource_type`.

use std::io::{self, Write};

use mime::Mime;

use super::parameter::write_documented;
use super::{
    update_documentation_namespaces, DocumentationInfo, MethodInfo, NamespaceMap, ParameterInfo,
};
use crate::serial::{Attributes, XmlWriter};

/// A `<resource>` element, addressed by a URI template relative to its parent.
///
/// Child resources are owned by their parent; the structure is a tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceInfo {
    /// Identifier (`id`).
    pub identifier: Option<String>,
    /// URI template, relative to the parent resource or to the base URI.
    pub path: Option<String>,
    /// Media type of the query component (`queryType`).
    pub query_type: Option<Mime>,
    /// References to the resource types this resource implements (`type`).
    pub resource_types: Vec<String>,
    /// Methods of the resource.
    pub methods: Vec<MethodInfo>,
    /// Parameters shared by all methods (typically template parameters).
    pub parameters: Vec<ParameterInfo>,
    /// Nested resources, in document order.
    pub child_resources: Vec<ResourceInfo>,
    /// Documentation entries.
    pub documentations: Vec<DocumentationInfo>,
}

impl ResourceInfo {
    /// Creates a resource at `path`.
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path: Some(path.to_string()),
            ..Self::default()
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: &str) -> Self {
        self.identifier = Some(identifier.to_string());
        self
    }

    /// Adds a child resource.
    #[must_use]
    pub fn with_child(mut self, child: ResourceInfo) -> Self {
        self.child_resources.push(child);
        self
    }

    /// Builds the attribute list of the element.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.add_optional("id", "xs:ID", self.identifier.as_deref());
        attributes.add_optional("path", "xs:string", self.path.as_deref());
        if let Some(query_type) = &self.query_type {
            attributes.add("queryType", "xs:string", query_type.to_string());
        }
        attributes.add_list("type", "xs:string", &self.resource_types);
        attributes
    }

    /// Unions the namespaces used by the documentation of this resource and
    /// its descendants into `namespaces`.
    pub fn update_namespaces(&self, namespaces: &mut NamespaceMap) {
        update_documentation_namespaces(&self.documentations, namespaces);
        for param in &self.parameters {
            param.update_namespaces(namespaces);
        }
        for child in &self.child_resources {
            child.update_namespaces(namespaces);
        }
        for method in &self.methods {
            method.update_namespaces(namespaces);
        }
    }

    /// Writes the `<resource>` element and its subtree.
    pub fn write_element<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        let attributes = self.attributes();
        if self.child_resources.is_empty()
            && self.documentations.is_empty()
            && self.methods.is_empty()
            && self.parameters.is_empty()
        {
            return writer.empty_element("resource", &attributes);
        }
        writer.start_element("resource", &attributes)?;
        for child in &self.child_resources {
            child.write_element(writer)?;
        }
        for doc in &self.documentations {
            doc.write_element(writer)?;
        }
        for method in &self.methods {
            method.write_element(writer)?;
        }
        for param in &self.parameters {
            param.write_element(writer)?;
        }
        writer.end_element("resource")
    }
}

/// A `<resource_type>` element: a reusable set of methods and parameters
/// that resources reference by identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceTypeInfo {
    /// Identifier (`id`).
    pub identifier: Option<String>,
    /// Methods of the type.
    pub methods: Vec<MethodInfo>,
    /// Parameters of the type.
    pub parameters: Vec<ParameterInfo>,
    /// Documentation entries.
    pub documentations: Vec<DocumentationInfo>,
}

impl ResourceTypeInfo {
    /// Creates a resource type called `identifier`.
    #[must_use]
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: Some(identifier.to_string()),
            ..Self::default()
        }
    }

    /// Unions the namespaces used by the documentation into `namespaces`.
    pub fn update_namespaces(&self, namespaces: &mut NamespaceMap) {
        update_documentation_namespaces(&self.documentations, namespaces);
        for param in &self.parameters {
            param.update_namespaces(namespaces);
        }
        for method in &self.methods {
            method.update_namespaces(namespaces);
        }
    }

    /// Writes the `<resource_type>` element.
    pub fn write_element<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        let mut attributes = Attributes::new();
        attributes.add_optional("id", "xs:ID", self.identifier.as_deref());
        if self.documentations.is_empty() && self.methods.is_empty() && self.parameters.is_empty()
        {
            return writer.empty_element("resource_type", &attributes);
        }
        writer.start_element("resource_type", &attributes)?;
        for doc in &self.documentations {
            doc.write_element(writer)?;
        }
        for param in &self.parameters {
            param.write_element(writer)?;
        }
        for method in &self.methods {
            method.write_element(writer)?;
        }
        writer.end_element("resource_type")
    }
}

/// A `<resources>` element: the root resources under a base URI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcesInfo {
    /// Base URI of the root resources (`base`).
    pub base_ref: Option<String>,
    /// Root resources, in document order.
    pub resources: Vec<ResourceInfo>,
    /// Documentation entries.
    pub documentations: Vec<DocumentationInfo>,
}

impl ResourcesInfo {
    /// Unions the namespaces used by the whole resource tree into `namespaces`.
    pub fn update_namespaces(&self, namespaces: &mut NamespaceMap) {
        update_documentation_namespaces(&self.documentations, namespaces);
        for resource in &self.resources {
            resource.update_namespaces(namespaces);
        }
    }

    /// Writes the `<resources>` element and the resource tree.
    pub fn write_element<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        let mut attributes = Attributes::new();
        attributes.add_optional("base", "xs:anyURI", self.base_ref.as_deref());
        if self.resources.is_empty() {
            return write_documented(writer, "resources", &attributes, &self.documentations);
        }
        writer.start_element("resources", &attributes)?;
        for doc in &self.documentations {
            doc.write_element(writer)?;
        }
        for resource in &self.resources {
            resource.write_element(writer)?;
        }
        writer.end_element("resources")
    }
}
