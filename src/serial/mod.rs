//! WADL serialization.
//!
//! Walks an [`ApplicationInfo`] graph top-down and renders it through an
//! [`XmlWriter`]. Each node builds its own attribute list and writes its
//! children in the order the WADL schema prescribes; this module adds the
//! document prolog and epilog.
//!
//! # Examples
//!
//! ```
//! use wadloxide::model::{ApplicationInfo, ResourceInfo};
//! use wadloxide::serial::{to_string, WriteOptions};
//!
//! let mut app = ApplicationInfo::default();
//! app.resources_mut().resources.push(ResourceInfo::new("items"));
//! let xml = to_string(&app, &WriteOptions::default().stylesheet(None));
//! assert!(xml.contains("<resource path=\"items\"/>"));
//! ```

pub mod xml;

use std::io::{self, Write};

pub use xml::{Attribute, Attributes, XmlWriter};

use crate::model::ApplicationInfo;

/// Options controlling WADL serialization output.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Whether to place element-only content on indented lines.
    /// Defaults to `true`.
    pub indent: bool,
    /// The indentation string used for each level. Defaults to three spaces.
    pub indent_str: String,
    /// Whether to start the document with an XML declaration.
    /// Defaults to `true`.
    pub xml_declaration: bool,
    /// The `href` of an `xml-stylesheet` processing instruction, if any.
    /// Defaults to `wadl_documentation.xsl`.
    pub stylesheet: Option<String>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: true,
            indent_str: "   ".to_string(),
            xml_declaration: true,
            stylesheet: Some("wadl_documentation.xsl".to_string()),
        }
    }
}

impl WriteOptions {
    /// Enables or disables indented output.
    #[must_use]
    pub fn indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the indentation string used for each nesting level.
    #[must_use]
    pub fn indent_str(mut self, s: &str) -> Self {
        self.indent_str = s.to_string();
        self
    }

    /// Enables or disables the XML declaration.
    #[must_use]
    pub fn xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }

    /// Sets or clears the stylesheet processing instruction.
    #[must_use]
    pub fn stylesheet(mut self, href: Option<&str>) -> Self {
        self.stylesheet = href.map(str::to_string);
        self
    }
}

/// Writes `application` as a complete WADL document.
///
/// # Errors
///
/// Returns the first I/O error raised by `out`, except for failures while
/// writing documentation text, which are logged and skipped.
pub fn write_document<W: Write>(
    application: &ApplicationInfo,
    out: &mut W,
    options: &WriteOptions,
) -> io::Result<()> {
    let mut writer = XmlWriter::new(out, options);
    if options.xml_declaration {
        writer.processing_instruction("xml", "version=\"1.0\" standalone=\"yes\"")?;
    }
    if let Some(href) = &options.stylesheet {
        writer.processing_instruction(
            "xml-stylesheet",
            &format!("type=\"text/xsl\" href=\"{href}\""),
        )?;
    }
    application.write_element(&mut writer)?;
    writer.end_document()
}

/// Serializes `application` to a string.
#[must_use]
pub fn to_string(application: &ApplicationInfo, options: &WriteOptions) -> String {
    let mut buffer = Vec::new();
    if let Err(e) = write_document(application, &mut buffer, options) {
        log::error!("Error when writing the WADL document: {e}");
    }
    String::from_utf8(buffer)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
