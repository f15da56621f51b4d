//! SAX2-style streaming event API over a namespace-aware XML tokenizer.
//!
//! The parser fires callbacks as it meets prefix mappings, elements, text,
//! CDATA sections and comments. Element and attribute names arrive already
//! resolved against the namespace declarations in scope. Self-closing tags
//! are reported as a start event immediately followed by an end event.
//!
//! Every callback may fail; the first error aborts the parse and is returned
//! by [`parse_sax`] with the source location of the offending event.
//!
//! # Examples
//!
//! ```
//! use wadloxide::error::ParseError;
//! use wadloxide::reader::ReadOptions;
//! use wadloxide::sax::{parse_sax, SaxAttribute, SaxHandler};
//!
//! struct Counter {
//!     elements: usize,
//! }
//!
//! impl SaxHandler for Counter {
//!     fn start_element(
//!         &mut self,
//!         _local_name: &str,
//!         _prefix: Option<&str>,
//!         _namespace: Option<&str>,
//!         _attributes: &[SaxAttribute],
//!     ) -> Result<(), ParseError> {
//!         self.elements += 1;
//!         Ok(())
//!     }
//! }
//!
//! let mut handler = Counter { elements: 0 };
//! parse_sax("<root><a/><b/><c/></root>", &ReadOptions::default(), &mut handler).unwrap();
//! assert_eq!(handler.elements, 4);
//! ```

use quick_xml::events::Event;
use quick_xml::name::{PrefixDeclaration, ResolveResult};
use quick_xml::NsReader;

use crate::error::{ParseError, ParseErrorKind, SourceLocation};
use crate::model::XML_NAMESPACE;
use crate::reader::ReadOptions;
use crate::util::qname::{split_qname, QName};

/// An attribute of a start tag, namespace declarations excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaxAttribute {
    /// Resolved attribute name. Unprefixed attributes have no namespace.
    pub name: QName,
    /// Unescaped value.
    pub value: String,
}

/// A SAX2 event handler.
///
/// All methods have default implementations that accept the event, so a
/// handler only overrides what it needs.
#[allow(unused_variables)]
pub trait SaxHandler {
    /// Called before any other event.
    fn start_document(&mut self) -> Result<(), ParseError> {
        Ok(())
    }

    /// Called after the root element has been closed.
    fn end_document(&mut self) -> Result<(), ParseError> {
        Ok(())
    }

    /// Called for each namespace declaration of an element, before its
    /// [`start_element`](Self::start_element). `prefix` is `None` for the
    /// default namespace.
    fn start_prefix_mapping(&mut self, prefix: Option<&str>, uri: &str) -> Result<(), ParseError> {
        Ok(())
    }

    /// Called for an element start tag.
    fn start_element(
        &mut self,
        local_name: &str,
        prefix: Option<&str>,
        namespace: Option<&str>,
        attributes: &[SaxAttribute],
    ) -> Result<(), ParseError> {
        Ok(())
    }

    /// Called for an element end tag.
    fn end_element(
        &mut self,
        local_name: &str,
        prefix: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<(), ParseError> {
        Ok(())
    }

    /// Called for character data inside the root element, with entity and
    /// character references already expanded.
    fn characters(&mut self, content: &str) -> Result<(), ParseError> {
        Ok(())
    }

    /// Called for a CDATA section.
    fn cdata(&mut self, content: &str) -> Result<(), ParseError> {
        Ok(())
    }

    /// Called for a comment inside the root element.
    fn comment(&mut self, content: &str) -> Result<(), ParseError> {
        Ok(())
    }
}

/// A handler that accepts every event and does nothing.
pub struct DefaultHandler;

impl SaxHandler for DefaultHandler {}

/// Parses XML from a string, firing events on `handler`.
///
/// The XML declaration, processing instructions and the document type
/// declaration are skipped.
///
/// # Errors
///
/// Returns a [`ParseError`] if the input is not well-formed, uses an
/// undeclared prefix, nests elements deeper than
/// [`ReadOptions::max_depth`], ends with unclosed elements, or if the
/// handler rejects an event.
pub fn parse_sax(
    input: &str,
    options: &ReadOptions,
    handler: &mut dyn SaxHandler,
) -> Result<(), ParseError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut reader = NsReader::from_str(input);
    let config = reader.config_mut();
    config.trim_text(false);
    config.expand_empty_elements = true;
    config.check_end_names = true;

    handler
        .start_document()
        .map_err(|e| locate(e, input, 0))?;

    let mut depth: u32 = 0;
    loop {
        let offset = to_offset(reader.buffer_position(), input);
        let (namespace, event) = match reader.read_resolved_event() {
            Ok((resolved, event)) => (
                namespace_uri(resolved).map_err(|e| locate(e, input, offset))?,
                event,
            ),
            Err(e) => {
                let at = to_offset(reader.error_position(), input);
                return Err(locate(ParseError::new(e), input, at));
            }
        };

        let result = match event {
            Event::Start(start) => {
                depth += 1;
                if depth > options.max_depth {
                    Err(ParseError::new(ParseErrorKind::DepthLimit(options.max_depth)))
                } else {
                    start_element(&reader, &start, namespace.as_deref(), handler)
                }
            }
            Event::End(end) => {
                depth = depth.saturating_sub(1);
                utf8(end.name().into_inner()).and_then(|raw| {
                    let (prefix, local) = split_qname(raw);
                    handler.end_element(local, prefix, namespace.as_deref())
                })
            }
            Event::Text(text) if depth > 0 => match text.unescape() {
                Ok(content) if content.is_empty() => Ok(()),
                Ok(content) => handler.characters(&content),
                Err(e) => Err(ParseError::new(e)),
            },
            Event::CData(cdata) => {
                let bytes = cdata.into_inner();
                utf8(&bytes).and_then(|content| handler.cdata(content))
            }
            Event::Comment(comment) if depth > 0 => {
                utf8(&comment).and_then(|content| handler.comment(content))
            }
            Event::Eof => {
                if depth > 0 {
                    return Err(locate(
                        ParseError::new(ParseErrorKind::UnexpectedEof),
                        input,
                        input.len(),
                    ));
                }
                break;
            }
            _ => Ok(()),
        };
        result.map_err(|e| locate(e, input, offset))?;
    }

    handler
        .end_document()
        .map_err(|e| locate(e, input, input.len()))
}

/// Reports the prefix mappings and the start tag of an element.
fn start_element(
    reader: &NsReader<&[u8]>,
    start: &quick_xml::events::BytesStart<'_>,
    namespace: Option<&str>,
    handler: &mut dyn SaxHandler,
) -> Result<(), ParseError> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ParseError::new(quick_xml::Error::from(e)))?;
        let value = attr.unescape_value().map_err(ParseError::new)?;
        match attr.key.as_namespace_binding() {
            Some(PrefixDeclaration::Default) => handler.start_prefix_mapping(None, &value)?,
            Some(PrefixDeclaration::Named(prefix)) => {
                handler.start_prefix_mapping(Some(utf8(prefix)?), &value)?;
            }
            None => attributes.push(SaxAttribute {
                name: attribute_name(reader, attr.key)?,
                value: value.into_owned(),
            }),
        }
    }

    let (prefix, local) = split_qname(utf8(start.name().into_inner())?);
    handler.start_element(local, prefix, namespace, &attributes)
}

fn attribute_name(
    reader: &NsReader<&[u8]>,
    key: quick_xml::name::QName<'_>,
) -> Result<QName, ParseError> {
    let (prefix, local) = split_qname(utf8(key.into_inner())?);
    let Some(prefix) = prefix else {
        return Ok(QName::local(local));
    };
    if prefix == "xml" {
        return Ok(QName::bound(Some(prefix), local, XML_NAMESPACE));
    }
    let (resolved, _) = reader.resolve_attribute(key);
    match namespace_uri(resolved)? {
        Some(uri) => Ok(QName::bound(Some(prefix), local, &uri)),
        None => Err(ParseError::new(ParseErrorKind::UnboundPrefix(
            prefix.to_string(),
        ))),
    }
}

fn namespace_uri(resolved: ResolveResult<'_>) -> Result<Option<String>, ParseError> {
    match resolved {
        ResolveResult::Bound(ns) => {
            let uri = utf8(ns.into_inner())?;
            Ok((!uri.is_empty()).then(|| uri.to_string()))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ParseError::new(ParseErrorKind::UnboundPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        ))),
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(bytes).map_err(ParseError::new)
}

fn to_offset(position: u64, input: &str) -> usize {
    usize::try_from(position).unwrap_or(input.len())
}

/// Attaches a source location to `error` unless it already has one.
fn locate(error: ParseError, input: &str, offset: usize) -> ParseError {
    if error.location == SourceLocation::default() {
        error.with_location(SourceLocation::from_offset(input, offset))
    } else {
        error
    }
}
