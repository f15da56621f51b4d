//! The document root and its grammar references.

use std::collections::BTreeSet;
use std::io::{self, Write};

use super::parameter::write_documented;
use super::{
    update_documentation_namespaces, DocumentationInfo, FaultInfo, MethodInfo, NamespaceMap,
    RepresentationInfo, ResourceInfo, ResourceTypeInfo, ResourcesInfo, WADL_NAMESPACE,
    XML_NAMESPACE,
};
use crate::serial::{Attributes, XmlWriter};

/// An `<include>` element: a reference to an external grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeInfo {
    /// Location of the grammar (`href`).
    pub target_ref: Option<String>,
    /// Documentation entries.
    pub documentations: Vec<DocumentationInfo>,
}

impl IncludeInfo {
    /// Creates an include of `href`.
    #[must_use]
    pub fn new(href: &str) -> Self {
        Self {
            target_ref: Some(href.to_string()),
            documentations: Vec::new(),
        }
    }

    /// Writes the `<include>` element.
    pub fn write_element<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        let mut attributes = Attributes::new();
        attributes.add_optional("href", "xs:anyURI", self.target_ref.as_deref());
        write_documented(writer, "include", &attributes, &self.documentations)
    }
}

/// A `<grammars>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammarsInfo {
    /// Documentation entries.
    pub documentations: Vec<DocumentationInfo>,
    /// Included grammars, in document order.
    pub includes: Vec<IncludeInfo>,
}

impl GrammarsInfo {
    /// Unions the namespaces used by the documentation into `namespaces`.
    pub fn update_namespaces(&self, namespaces: &mut NamespaceMap) {
        update_documentation_namespaces(&self.documentations, namespaces);
        for include in &self.includes {
            update_documentation_namespaces(&include.documentations, namespaces);
        }
    }

    /// Writes the `<grammars>` element.
    pub fn write_element<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        let attributes = Attributes::new();
        if self.includes.is_empty() {
            return write_documented(writer, "grammars", &attributes, &self.documentations);
        }
        writer.start_element("grammars", &attributes)?;
        for doc in &self.documentations {
            doc.write_element(writer)?;
        }
        for include in &self.includes {
            include.write_element(writer)?;
        }
        writer.end_element("grammars")
    }
}

/// The `<application>` root element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationInfo {
    /// Documentation entries.
    pub documentations: Vec<DocumentationInfo>,
    /// Grammar references.
    pub grammars: Option<GrammarsInfo>,
    /// The resource tree.
    pub resources: Option<ResourcesInfo>,
    /// Reusable resource types.
    pub resource_types: Vec<ResourceTypeInfo>,
    /// Methods declared at the top level, referenced by `href`.
    pub methods: Vec<MethodInfo>,
    /// Representations declared at the top level.
    pub representations: Vec<RepresentationInfo>,
    /// Faults declared at the top level.
    pub faults: Vec<FaultInfo>,
    /// Prefixed namespace declarations to place on the root element, keyed
    /// by URI. Namespaces used inside documentation markup are added
    /// automatically and need not be listed here.
    pub namespaces: NamespaceMap,
}

impl ApplicationInfo {
    /// Wraps a single resource into an application.
    ///
    /// The title of the resource's first documentation entry, if any,
    /// becomes the title of the application.
    #[must_use]
    pub fn from_resource(resource: ResourceInfo) -> Self {
        let mut application = Self::default();
        if let Some(title) = resource.documentations.first().and_then(|d| d.title.clone()) {
            application.documentations.push(DocumentationInfo {
                title: Some(title),
                ..DocumentationInfo::default()
            });
        }
        application.resources_mut().resources.push(resource);
        application
    }

    /// Returns the resource tree, creating an empty one if needed.
    pub fn resources_mut(&mut self) -> &mut ResourcesInfo {
        self.resources.get_or_insert_with(ResourcesInfo::default)
    }

    /// Returns the grammars element, creating an empty one if needed.
    pub fn grammars_mut(&mut self) -> &mut GrammarsInfo {
        self.grammars.get_or_insert_with(GrammarsInfo::default)
    }

    /// Unions the namespaces used by documentation markup anywhere in the
    /// document into `namespaces`.
    pub fn update_namespaces(&self, namespaces: &mut NamespaceMap) {
        update_documentation_namespaces(&self.documentations, namespaces);
        if let Some(grammars) = &self.grammars {
            grammars.update_namespaces(namespaces);
        }
        if let Some(resources) = &self.resources {
            resources.update_namespaces(namespaces);
        }
        for resource_type in &self.resource_types {
            resource_type.update_namespaces(namespaces);
        }
        for method in &self.methods {
            method.update_namespaces(namespaces);
        }
        for rep in &self.representations {
            rep.update_namespaces(namespaces);
        }
        for fault in &self.faults {
            fault.update_namespaces(namespaces);
        }
    }

    /// Returns the explicit namespace declarations merged with those implied
    /// by documentation markup.
    #[must_use]
    pub fn all_namespaces(&self) -> NamespaceMap {
        let mut namespaces = self.namespaces.clone();
        self.update_namespaces(&mut namespaces);
        namespaces
    }

    fn root_attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.add("xmlns", "CDATA", WADL_NAMESPACE);
        let mut prefixes = BTreeSet::new();
        for (uri, prefix) in &self.all_namespaces() {
            if prefix.is_empty()
                || prefix == "xml"
                || uri == WADL_NAMESPACE
                || uri == XML_NAMESPACE
                || !prefixes.insert(prefix.clone())
            {
                continue;
            }
            attributes.add(&format!("xmlns:{prefix}"), "CDATA", uri.as_str());
        }
        attributes
    }

    /// Writes the `<application>` element with the WADL namespace as the
    /// default namespace.
    pub fn write_element<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        let attributes = self.root_attributes();
        if self.documentations.is_empty()
            && self.grammars.is_none()
            && self.resources.is_none()
            && self.resource_types.is_empty()
            && self.methods.is_empty()
            && self.representations.is_empty()
            && self.faults.is_empty()
        {
            return writer.empty_element("application", &attributes);
        }
        writer.start_element("application", &attributes)?;
        for doc in &self.documentations {
            doc.write_element(writer)?;
        }
        if let Some(grammars) = &self.grammars {
            grammars.write_element(writer)?;
        }
        if let Some(resources) = &self.resources {
            resources.write_element(writer)?;
        }
        for resource_type in &self.resource_types {
            resource_type.write_element(writer)?;
        }
        for method in &self.methods {
            method.write_element(writer)?;
        }
        for rep in &self.representations {
            rep.write_element(writer)?;
        }
        for fault in &self.faults {
            fault.write_element(writer)?;
        }
        writer.end_element("application")
    }
}
