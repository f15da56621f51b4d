//! Parameters, their permitted values and related-resource links.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use super::{update_documentation_namespaces, DocumentationInfo, NamespaceMap};
use crate::error::AttributeError;
use crate::serial::{Attributes, XmlWriter};

/// Where a parameter travels in a request or response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterStyle {
    /// An HTTP header.
    Header,
    /// A matrix parameter of a path segment.
    Matrix,
    /// A plain parameter inside a representation.
    Plain,
    /// A query string parameter.
    Query,
    /// A URI template variable.
    Template,
}

impl ParameterStyle {
    /// The lowercase token used in the `style` attribute.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Matrix => "matrix",
            Self::Plain => "plain",
            Self::Query => "query",
            Self::Template => "template",
        }
    }
}

impl fmt::Display for ParameterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterStyle {
    type Err = AttributeError;

    /// Parses a style token, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::Header,
            Self::Matrix,
            Self::Plain,
            Self::Query,
            Self::Template,
        ]
        .into_iter()
        .find(|style| style.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| AttributeError::UnknownStyle(s.to_string()))
    }
}

/// A `<param>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterInfo {
    /// Identifier (`id`).
    pub identifier: Option<String>,
    /// Parameter name.
    pub name: Option<String>,
    /// Transmission style.
    pub style: Option<ParameterStyle>,
    /// XML Schema type of the value, as a `QName` such as `xsd:int`.
    pub param_type: Option<String>,
    /// Value used when the parameter is absent.
    pub default_value: Option<String>,
    /// The only value the parameter may take.
    pub fixed: Option<String>,
    /// Path to the value inside a representation.
    pub path: Option<String>,
    /// Whether the parameter must be present.
    pub required: bool,
    /// Whether the parameter may appear several times.
    pub repeating: bool,
    /// Link to the resource identified by the value.
    pub link: Option<LinkInfo>,
    /// Permitted values.
    pub options: Vec<OptionInfo>,
    /// Documentation entries.
    pub documentations: Vec<DocumentationInfo>,
}

impl ParameterInfo {
    /// Creates a parameter with a name and a style.
    #[must_use]
    pub fn new(name: &str, style: ParameterStyle) -> Self {
        Self {
            name: Some(name.to_string()),
            style: Some(style),
            ..Self::default()
        }
    }

    /// Builds the attribute list of the element.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.add_optional("id", "xs:ID", self.identifier.as_deref());
        attributes.add_optional("name", "xs:NMTOKEN", self.name.as_deref());
        if let Some(style) = self.style {
            attributes.add("style", "xs:string", style.as_str());
        }
        attributes.add_optional("type", "xs:QName", self.param_type.as_deref());
        attributes.add_optional("default", "xs:string", self.default_value.as_deref());
        attributes.add_optional("fixed", "xs:string", self.fixed.as_deref());
        attributes.add_optional("path", "xs:string", self.path.as_deref());
        attributes.add_flag("required", self.required);
        attributes.add_flag("repeating", self.repeating);
        attributes
    }

    /// Unions the namespaces used by the documentation into `namespaces`.
    pub fn update_namespaces(&self, namespaces: &mut NamespaceMap) {
        update_documentation_namespaces(&self.documentations, namespaces);
        for option in &self.options {
            option.update_namespaces(namespaces);
        }
        if let Some(link) = &self.link {
            link.update_namespaces(namespaces);
        }
    }

    /// Writes the `<param>` element.
    pub fn write_element<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        let attributes = self.attributes();
        if self.documentations.is_empty() && self.options.is_empty() && self.link.is_none() {
            return writer.empty_element("param", &attributes);
        }
        writer.start_element("param", &attributes)?;
        for doc in &self.documentations {
            doc.write_element(writer)?;
        }
        for option in &self.options {
            option.write_element(writer)?;
        }
        if let Some(link) = &self.link {
            link.write_element(writer)?;
        }
        writer.end_element("param")
    }
}

/// An `<option>` element: one permitted value of a parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionInfo {
    /// The permitted value.
    pub value: Option<String>,
    /// Documentation entries.
    pub documentations: Vec<DocumentationInfo>,
}

impl OptionInfo {
    /// Creates an option for `value`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            documentations: Vec::new(),
        }
    }

    /// Unions the namespaces used by the documentation into `namespaces`.
    pub fn update_namespaces(&self, namespaces: &mut NamespaceMap) {
        update_documentation_namespaces(&self.documentations, namespaces);
    }

    /// Writes the `<option>` element.
    pub fn write_element<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        let mut attributes = Attributes::new();
        attributes.add_optional("value", "xs:string", self.value.as_deref());
        write_documented(writer, "option", &attributes, &self.documentations)
    }
}

/// A `<link>` element: the value of a parameter identifies another resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkInfo {
    /// Relationship of the linked resource to the current one (`rel`).
    pub relationship: Option<String>,
    /// Reverse relationship (`rev`).
    pub reverse_relationship: Option<String>,
    /// Reference to the resource type of the linked resource.
    pub resource_type: Option<String>,
    /// Documentation entries.
    pub documentations: Vec<DocumentationInfo>,
}

impl LinkInfo {
    /// Unions the namespaces used by the documentation into `namespaces`.
    pub fn update_namespaces(&self, namespaces: &mut NamespaceMap) {
        update_documentation_namespaces(&self.documentations, namespaces);
    }

    /// Writes the `<link>` element.
    pub fn write_element<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        let mut attributes = Attributes::new();
        attributes.add_optional("resource_type", "xs:anyURI", self.resource_type.as_deref());
        attributes.add_optional("rel", "xs:token", self.relationship.as_deref());
        attributes.add_optional("rev", "xs:token", self.reverse_relationship.as_deref());
        write_documented(writer, "link", &attributes, &self.documentations)
    }
}

/// Writes an element whose only possible children are `<doc>` entries.
pub(super) fn write_documented<W: Write>(
    writer: &mut XmlWriter<W>,
    name: &str,
    attributes: &Attributes,
    documentations: &[DocumentationInfo],
) -> io::Result<()> {
    if documentations.is_empty() {
        return writer.empty_element(name, attributes);
    }
    writer.start_element(name, attributes)?;
    for doc in documentations {
        doc.write_element(writer)?;
    }
    writer.end_element(name)
}
