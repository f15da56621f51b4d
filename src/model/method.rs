//! Methods with their request and response descriptions.

use std::io::{self, Write};

use http::Method;

use super::{
    update_documentation_namespaces, DocumentationInfo, FaultInfo, NamespaceMap, ParameterInfo,
    RepresentationInfo,
};
use crate::serial::{Attributes, XmlWriter};

/// A `<request>` element: what a client sends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestInfo {
    /// Documentation entries.
    pub documentations: Vec<DocumentationInfo>,
    /// Request parameters (query, header, ...).
    pub parameters: Vec<ParameterInfo>,
    /// Accepted representations.
    pub representations: Vec<RepresentationInfo>,
}

impl RequestInfo {
    /// Unions the namespaces used by the documentation into `namespaces`.
    pub fn update_namespaces(&self, namespaces: &mut NamespaceMap) {
        update_documentation_namespaces(&self.documentations, namespaces);
        for param in &self.parameters {
            param.update_namespaces(namespaces);
        }
        for rep in &self.representations {
            rep.update_namespaces(namespaces);
        }
    }

    /// Writes the `<request>` element.
    pub fn write_element<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        let attributes = Attributes::new();
        if self.documentations.is_empty()
            && self.parameters.is_empty()
            && self.representations.is_empty()
        {
            return writer.empty_element("request", &attributes);
        }
        writer.start_element("request", &attributes)?;
        for doc in &self.documentations {
            doc.write_element(writer)?;
        }
        for param in &self.parameters {
            param.write_element(writer)?;
        }
        for rep in &self.representations {
            rep.write_element(writer)?;
        }
        writer.end_element("request")
    }
}

/// A `<response>` element: what a server returns, including error conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseInfo {
    /// Documentation entries.
    pub documentations: Vec<DocumentationInfo>,
    /// Response parameters (typically headers).
    pub parameters: Vec<ParameterInfo>,
    /// Returned representations.
    pub representations: Vec<RepresentationInfo>,
    /// Representations returned on error conditions.
    pub faults: Vec<FaultInfo>,
}

impl ResponseInfo {
    /// Unions the namespaces used by the documentation into `namespaces`.
    pub fn update_namespaces(&self, namespaces: &mut NamespaceMap) {
        update_documentation_namespaces(&self.documentations, namespaces);
        for param in &self.parameters {
            param.update_namespaces(namespaces);
        }
        for rep in &self.representations {
            rep.update_namespaces(namespaces);
        }
        for fault in &self.faults {
            fault.update_namespaces(namespaces);
        }
    }

    /// Writes the `<response>` element.
    pub fn write_element<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        let attributes = Attributes::new();
        if self.documentations.is_empty()
            && self.parameters.is_empty()
            && self.representations.is_empty()
            && self.faults.is_empty()
        {
            return writer.empty_element("response", &attributes);
        }
        writer.start_element("response", &attributes)?;
        for doc in &self.documentations {
            doc.write_element(writer)?;
        }
        for param in &self.parameters {
            param.write_element(writer)?;
        }
        for rep in &self.representations {
            rep.write_element(writer)?;
        }
        for fault in &self.faults {
            fault.write_element(writer)?;
        }
        writer.end_element("response")
    }
}

/// A `<method>` element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodInfo {
    /// Identifier (`id`).
    pub identifier: Option<String>,
    /// HTTP method token (`name`).
    pub name: Option<Method>,
    /// Reference to a method defined elsewhere (`href`).
    pub target_ref: Option<String>,
    /// The request description.
    pub request: Option<RequestInfo>,
    /// The response description.
    pub response: Option<ResponseInfo>,
    /// Documentation entries.
    pub documentations: Vec<DocumentationInfo>,
}

impl MethodInfo {
    /// Creates a method description for `name`.
    #[must_use]
    pub fn new(name: Method) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }

    /// Returns the request description, creating an empty one if needed.
    pub fn request_mut(&mut self) -> &mut RequestInfo {
        self.request.get_or_insert_with(RequestInfo::default)
    }

    /// Returns the response description, creating an empty one if needed.
    pub fn response_mut(&mut self) -> &mut ResponseInfo {
        self.response.get_or_insert_with(ResponseInfo::default)
    }

    /// Builds the attribute list of the element.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.add_optional("id", "xs:ID", self.identifier.as_deref());
        if let Some(name) = &self.name {
            attributes.add("name", "xs:NMTOKEN", name.as_str());
        }
        attributes.add_optional("href", "xs:anyURI", self.target_ref.as_deref());
        attributes
    }

    /// Unions the namespaces used by the documentation into `namespaces`.
    pub fn update_namespaces(&self, namespaces: &mut NamespaceMap) {
        update_documentation_namespaces(&self.documentations, namespaces);
        if let Some(request) = &self.request {
            request.update_namespaces(namespaces);
        }
        if let Some(response) = &self.response {
            response.update_namespaces(namespaces);
        }
    }

    /// Writes the `<method>` element.
    pub fn write_element<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        let attributes = self.attributes();
        if self.documentations.is_empty() && self.request.is_none() && self.response.is_none() {
            return writer.empty_element("method", &attributes);
        }
        writer.start_element("method", &attributes)?;
        for doc in &self.documentations {
            doc.write_element(writer)?;
        }
        if let Some(request) = &self.request {
            request.write_element(writer)?;
        }
        if let Some(response) = &self.response {
            response.write_element(writer)?;
        }
        writer.end_element("method")
    }
}
