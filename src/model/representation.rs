//! Representations and faults.

use std::io::{self, Write};
use std::ops::{Deref, DerefMut};

use http::StatusCode;
use mime::Mime;

use super::{update_documentation_namespaces, DocumentationInfo, NamespaceMap, ParameterInfo};
use crate::serial::{Attributes, XmlWriter};

/// A `<representation>` element: the shape of a payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepresentationInfo {
    /// Identifier (`id`).
    pub identifier: Option<String>,
    /// Media type of the payload.
    pub media_type: Option<Mime>,
    /// Qualified name of the XML root element (`element`).
    pub xml_element: Option<String>,
    /// Profile references, in document order.
    pub profiles: Vec<String>,
    /// Statuses this representation is returned with, in document order.
    pub statuses: Vec<StatusCode>,
    /// Parameters embedded in the payload.
    pub parameters: Vec<ParameterInfo>,
    /// Documentation entries.
    pub documentations: Vec<DocumentationInfo>,
}

impl RepresentationInfo {
    /// Creates a representation for `media_type`.
    #[must_use]
    pub fn new(media_type: Mime) -> Self {
        Self {
            media_type: Some(media_type),
            ..Self::default()
        }
    }

    /// Builds the attribute list of the element.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.add_optional("id", "xs:ID", self.identifier.as_deref());
        attributes.add_optional("element", "xs:QName", self.xml_element.as_deref());
        if let Some(media_type) = &self.media_type {
            attributes.add("mediaType", "xs:string", media_type.to_string());
        }
        attributes.add_list("profile", "xs:string", &self.profiles);
        attributes.add_list(
            "status",
            "xs:string",
            self.statuses.iter().map(|s| s.as_u16().to_string()),
        );
        attributes
    }

    /// Unions the namespaces used by the documentation into `namespaces`.
    pub fn update_namespaces(&self, namespaces: &mut NamespaceMap) {
        update_documentation_namespaces(&self.documentations, namespaces);
        for param in &self.parameters {
            param.update_namespaces(namespaces);
        }
    }

    /// Writes the `<representation>` element.
    pub fn write_element<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        self.write_as(writer, "representation")
    }

    fn write_as<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> io::Result<()> {
        let attributes = self.attributes();
        if self.documentations.is_empty() && self.parameters.is_empty() {
            return writer.empty_element(name, &attributes);
        }
        writer.start_element(name, &attributes)?;
        for doc in &self.documentations {
            doc.write_element(writer)?;
        }
        for param in &self.parameters {
            param.write_element(writer)?;
        }
        writer.end_element(name)
    }
}

/// A `<fault>` element: a representation returned on an error condition.
///
/// It has the same shape as a [`RepresentationInfo`] and dereferences to one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaultInfo(pub RepresentationInfo);

impl FaultInfo {
    /// Creates a fault for `media_type` returned with `status`.
    #[must_use]
    pub fn new(media_type: Mime, status: StatusCode) -> Self {
        let mut representation = RepresentationInfo::new(media_type);
        representation.statuses.push(status);
        Self(representation)
    }

    /// Writes the `<fault>` element.
    pub fn write_element<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        self.0.write_as(writer, "fault")
    }
}

impl Deref for FaultInfo {
    type Target = RepresentationInfo;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for FaultInfo {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
