//! Error types and diagnostics for WADL processing.
//!
//! Parsing errors carry the source location (line, column, byte offset) and
//! the path of WADL elements enclosing the failure, e.g.
//! `/application/resources/resource/method`. Attribute conversion failures
//! keep the attribute name and the underlying cause as their source.

use std::fmt;

/// Source location within a WADL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number (in characters, not bytes).
    pub column: u32,
    /// 0-based byte offset from the start of the input.
    pub byte_offset: usize,
}

impl SourceLocation {
    /// Computes the line and column of `byte_offset` within `input`.
    ///
    /// Offsets past the end of the input are clamped to its length.
    #[must_use]
    pub fn from_offset(input: &str, byte_offset: usize) -> Self {
        let mut offset = byte_offset.min(input.len());
        while !input.is_char_boundary(offset) {
            offset -= 1;
        }
        let mut line: u32 = 1;
        let mut column: u32 = 1;
        for ch in input[..offset].chars() {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self {
            line,
            column,
            byte_offset: offset,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A failure to convert an attribute value into its typed form.
#[derive(Debug, thiserror::Error)]
pub enum AttributeError {
    /// The value is not one of `header`, `matrix`, `plain`, `query`, `template`.
    #[error("unknown parameter style `{0}`")]
    UnknownStyle(String),

    /// The value is not a valid `xs:boolean`.
    #[error("`{0}` is not a boolean")]
    InvalidBoolean(String),

    /// A status list entry is not an integer.
    #[error("`{value}` is not a status code")]
    InvalidStatusNumber {
        /// The offending list entry.
        value: String,
        /// Integer conversion failure.
        #[source]
        source: std::num::ParseIntError,
    },

    /// A status list entry is an integer outside the HTTP status range.
    #[error("`{value}` is not a status code")]
    InvalidStatus {
        /// The offending list entry.
        value: String,
        /// Range check failure.
        #[source]
        source: http::status::InvalidStatusCode,
    },

    /// The value is not a valid media type.
    #[error("`{value}` is not a media type")]
    InvalidMediaType {
        /// The offending value.
        value: String,
        /// Media type parsing failure.
        #[source]
        source: mime::FromStrError,
    },

    /// The value is not a valid HTTP method token.
    #[error("`{value}` is not a method name")]
    InvalidMethod {
        /// The offending value.
        value: String,
        /// Token validation failure.
        #[source]
        source: http::method::InvalidMethod,
    },
}

/// The cause of a [`ParseError`].
#[derive(Debug, thiserror::Error)]
pub enum ParseErrorKind {
    /// The input is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A name or text chunk is not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// A prefix is used without being bound to a namespace.
    #[error("unbound namespace prefix `{0}`")]
    UnboundPrefix(String),

    /// An attribute value could not be converted.
    #[error("invalid `{name}` attribute: {source}")]
    Attribute {
        /// The attribute name as written in the document.
        name: String,
        /// The conversion failure.
        #[source]
        source: AttributeError,
    },

    /// An element is not part of the WADL vocabulary and the reader is
    /// configured to reject such elements.
    #[error("unexpected element `{0}`")]
    UnexpectedElement(String),

    /// Elements are nested deeper than the configured limit.
    #[error("maximum nesting depth of {0} exceeded")]
    DepthLimit(u32),

    /// The input ended while elements were still open.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The document contains no `application` root element.
    #[error("no WADL application element found")]
    MissingApplication,
}

/// The error type returned when reading a WADL document fails.
#[derive(Debug)]
pub struct ParseError {
    /// The cause of the failure.
    pub kind: ParseErrorKind,
    /// Where in the source the failure was detected.
    pub location: SourceLocation,
    /// Path of the WADL elements open when the failure occurred.
    pub path: String,
}

impl ParseError {
    /// Creates an error with an unknown location and an empty path.
    #[must_use]
    pub fn new(kind: impl Into<ParseErrorKind>) -> Self {
        Self {
            kind: kind.into(),
            location: SourceLocation::default(),
            path: String::new(),
        }
    }

    /// Sets the element path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at {}", self.location)?;
        if !self.path.is_empty() {
            write!(f, " in {}", self.path)?;
        }
        write!(f, ": {}", self.kind)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Failures while binding a resource tree onto a router.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    /// No target is known for the identifier of a resource.
    #[error("no target found for resource `{identifier}` at `{pattern}`")]
    UnknownTarget {
        /// The `id` attribute of the resource.
        identifier: String,
        /// The resolved URI pattern of the resource.
        pattern: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location_display() {
        let loc = SourceLocation {
            line: 10,
            column: 5,
            byte_offset: 42,
        };
        assert_eq!(loc.to_string(), "10:5");
    }

    #[test]
    fn test_source_location_from_offset() {
        let input = "<a>\n  <b/>\n</a>";
        let loc = SourceLocation::from_offset(input, 6);
        assert_eq!(loc.line, 2);
        assert_eq!(loc.column, 3);
        assert_eq!(loc.byte_offset, 6);
    }

    #[test]
    fn test_source_location_clamps_offset() {
        let loc = SourceLocation::from_offset("ab", 99);
        assert_eq!(loc.byte_offset, 2);
        assert_eq!(loc.column, 3);
    }

    #[test]
    fn test_source_location_multibyte() {
        // 'é' is two bytes; offset 2 falls inside it.
        let loc = SourceLocation::from_offset("aé", 2);
        assert_eq!(loc.byte_offset, 1);
        assert_eq!(loc.column, 2);
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(ParseErrorKind::UnexpectedEof)
            .with_path("/application/resources")
            .with_location(SourceLocation {
                line: 1,
                column: 15,
                byte_offset: 14,
            });
        assert_eq!(
            err.to_string(),
            "parse error at 1:15 in /application/resources: unexpected end of input"
        );
    }

    #[test]
    fn test_parse_error_display_without_path() {
        let err = ParseError::new(ParseErrorKind::MissingApplication);
        assert_eq!(
            err.to_string(),
            "parse error at 0:0: no WADL application element found"
        );
    }

    #[test]
    fn test_attribute_error_source_chain() {
        let err = ParseError::new(ParseErrorKind::Attribute {
            name: "style".to_string(),
            source: AttributeError::UnknownStyle("cookie".to_string()),
        });
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("invalid `style` attribute: unknown parameter style `cookie`")
        );
    }

    #[test]
    fn test_attach_error_display() {
        let err = AttachError::UnknownTarget {
            identifier: "Orders".to_string(),
            pattern: "orders/{id}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no target found for resource `Orders` at `orders/{id}`"
        );
    }
}
