//! The `<doc>` element and the markup it may embed.

use std::io::{self, Write};

use super::{NamespaceMap, XML_NAMESPACE};
use crate::serial::{Attributes, XmlWriter};
use crate::util::qname::QName;

/// Human-readable documentation attached to a WADL node.
///
/// The body is either plain text (`text_content`) or arbitrary XML markup
/// (`markup`). When both are set, the markup is written and the text is not.
///
/// Equality compares the [`normalized`](Self::normalized) forms, so two
/// entries are equal when they are written as the same `<doc>` element.
#[derive(Debug, Clone, Default, Eq)]
pub struct DocumentationInfo {
    /// Language of the documentation (`xml:lang`).
    pub language: Option<String>,
    /// Short title.
    pub title: Option<String>,
    /// Plain-text body.
    pub text_content: Option<String>,
    /// Mixed-content body.
    pub markup: Vec<MarkupNode>,
}

/// A node of embedded documentation markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    /// A nested element, typically XHTML.
    Element(MarkupElement),
    /// Character data.
    Text(String),
    /// A CDATA section.
    CData(String),
    /// A comment.
    Comment(String),
}

/// An element inside documentation markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupElement {
    /// Resolved element name.
    pub name: QName,
    /// Attributes in document order, namespace declarations excluded.
    pub attributes: Vec<MarkupAttribute>,
    /// Child nodes in document order.
    pub children: Vec<MarkupNode>,
}

/// An attribute of a [`MarkupElement`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupAttribute {
    /// Resolved attribute name.
    pub name: QName,
    /// Unescaped value.
    pub value: String,
}

impl DocumentationInfo {
    /// Creates a documentation entry with a plain-text body.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text_content: Some(text.to_string()),
            ..Self::default()
        }
    }

    /// Returns the canonical form of the entry.
    ///
    /// Adjacent text nodes of the markup are merged and empty ones removed.
    /// A markup body made of a single text node becomes `text_content`, and
    /// an empty `text_content` becomes `None`. `text_content` is dropped
    /// whenever markup is present, since the writer ignores it then.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut markup = merge_text(&self.markup);
        let text_content = match markup.as_mut_slice() {
            [] if self.markup.is_empty() => {
                self.text_content.clone().filter(|t| !t.is_empty())
            }
            [MarkupNode::Text(text)] => Some(std::mem::take(text)),
            _ => None,
        };
        if matches!(markup.as_slice(), [MarkupNode::Text(_)]) {
            markup.clear();
        }
        Self {
            language: self.language.clone(),
            title: self.title.clone(),
            text_content,
            markup,
        }
    }

    /// Returns the textual content: the markup's text nodes when markup is
    /// present, the plain-text body otherwise.
    #[must_use]
    pub fn text(&self) -> String {
        if self.markup.is_empty() {
            return self.text_content.clone().unwrap_or_default();
        }
        let mut out = String::new();
        for node in &self.markup {
            node.collect_text(&mut out);
        }
        out
    }

    /// Returns the namespaces declared by prefixed names in the markup.
    #[must_use]
    pub fn resolve_namespaces(&self) -> NamespaceMap {
        let mut namespaces = NamespaceMap::new();
        for node in &self.markup {
            node.collect_namespaces(&mut namespaces);
        }
        namespaces
    }

    /// Unions the namespaces used by the markup into `namespaces`.
    pub fn update_namespaces(&self, namespaces: &mut NamespaceMap) {
        namespaces.extend(self.resolve_namespaces());
    }

    /// Writes the `<doc>` element.
    ///
    /// A failure while writing the plain-text body is logged and does not
    /// interrupt the rest of the document.
    pub fn write_element<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        let mut attributes = Attributes::new();
        attributes.add_optional("xml:lang", "xs:language", self.language.as_deref());
        attributes.add_optional("title", "xs:string", self.title.as_deref());

        if !self.markup.is_empty() {
            writer.start_element("doc", &attributes)?;
            writer.begin_verbatim();
            let result = self.markup.iter().try_for_each(|node| node.write(writer));
            writer.end_verbatim();
            result?;
            writer.end_element("doc")
        } else if let Some(text) = self.text_content.as_deref().filter(|t| !t.is_empty()) {
            writer.start_element("doc", &attributes)?;
            if let Err(e) = writer.characters(text) {
                log::error!("Error when writing the documentation text: {e}");
            }
            writer.end_element("doc")
        } else {
            writer.empty_element("doc", &attributes)
        }
    }
}

impl PartialEq for DocumentationInfo {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.normalized(), other.normalized());
        a.language == b.language
            && a.title == b.title
            && a.text_content == b.text_content
            && a.markup == b.markup
    }
}

/// Copies `nodes`, merging adjacent text nodes at every level and dropping
/// empty ones.
fn merge_text(nodes: &[MarkupNode]) -> Vec<MarkupNode> {
    let mut out: Vec<MarkupNode> = Vec::with_capacity(nodes.len());
    for node in nodes {
        let node = match node {
            MarkupNode::Text(text) if text.is_empty() => continue,
            MarkupNode::Element(element) => MarkupNode::Element(MarkupElement {
                name: element.name.clone(),
                attributes: element.attributes.clone(),
                children: merge_text(&element.children),
            }),
            other => other.clone(),
        };
        if let MarkupNode::Text(text) = &node {
            if let Some(MarkupNode::Text(last)) = out.last_mut() {
                last.push_str(text);
                continue;
            }
        }
        out.push(node);
    }
    out
}

impl MarkupNode {
    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            Self::Text(text) | Self::CData(text) => out.push_str(text),
            Self::Comment(_) => {}
        }
    }

    fn collect_namespaces(&self, namespaces: &mut NamespaceMap) {
        if let Self::Element(element) = self {
            insert_prefixed(&element.name, namespaces);
            for attr in &element.attributes {
                insert_prefixed(&attr.name, namespaces);
            }
            for child in &element.children {
                child.collect_namespaces(namespaces);
            }
        }
    }

    fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        match self {
            Self::Element(element) => element.write(writer),
            Self::Text(text) => writer.characters(text),
            Self::CData(text) => writer.cdata(text),
            Self::Comment(text) => writer.comment(text),
        }
    }
}

impl MarkupElement {
    fn write<W: Write>(&self, writer: &mut XmlWriter<W>) -> io::Result<()> {
        let mut attributes = Attributes::new();
        let mut declared: Vec<(&str, &str)> = Vec::new();
        let names = std::iter::once(&self.name).chain(self.attributes.iter().map(|a| &a.name));
        for (index, name) in names.enumerate() {
            // Unprefixed attributes are never in a namespace.
            if index > 0 && name.prefix.is_none() {
                continue;
            }
            let prefix = name.prefix.as_deref().unwrap_or("");
            let uri = name.namespace.as_deref().unwrap_or("");
            if prefix == "xml" || declared.iter().any(|(p, _)| *p == prefix) {
                continue;
            }
            if writer.namespace_uri(prefix).unwrap_or("") != uri {
                let decl = if prefix.is_empty() {
                    "xmlns".to_string()
                } else {
                    format!("xmlns:{prefix}")
                };
                attributes.add(&decl, "CDATA", uri);
                declared.push((prefix, uri));
            }
        }
        for attr in &self.attributes {
            attributes.add(&attr.name.qualified(), "CDATA", attr.value.as_str());
        }

        let name = self.name.qualified();
        if self.children.is_empty() {
            writer.empty_element(&name, &attributes)
        } else {
            writer.start_element(&name, &attributes)?;
            for child in &self.children {
                child.write(writer)?;
            }
            writer.end_element(&name)
        }
    }
}

fn insert_prefixed(name: &QName, namespaces: &mut NamespaceMap) {
    if let (Some(prefix), Some(uri)) = (&name.prefix, &name.namespace) {
        if uri != XML_NAMESPACE {
            namespaces.insert(uri.clone(), prefix.clone());
        }
    }
}
