//! Streaming XML writer.
//!
//! `XmlWriter` receives start/end/empty element, character and markup events
//! and renders them as text. In data format mode (the default for WADL
//! documents) element-only content is placed on separate indented lines while
//! text content stays inline. Documentation markup is written verbatim so
//! that its whitespace survives a round trip.

use std::io::{self, Write};

use super::WriteOptions;

/// A single attribute: its qualified name, XML Schema type and value.
///
/// The schema type describes the attribute the way the WADL schema declares
/// it (`xs:ID`, `xs:anyURI`, ...). It is carried alongside the value for
/// consumers of the attribute list and is not rendered in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified attribute name, e.g. `id` or `xml:lang`.
    pub name: String,
    /// XML Schema type of the attribute.
    pub schema_type: &'static str,
    /// Unescaped attribute value.
    pub value: String,
}

/// An ordered attribute list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<Attribute>,
}

impl Attributes {
    /// Creates an empty attribute list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attribute unconditionally.
    pub fn add(&mut self, name: &str, schema_type: &'static str, value: impl Into<String>) {
        self.entries.push(Attribute {
            name: name.to_string(),
            schema_type,
            value: value.into(),
        });
    }

    /// Appends an attribute when `value` is present and non-empty.
    pub fn add_optional(&mut self, name: &str, schema_type: &'static str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.add(name, schema_type, value);
        }
    }

    /// Appends an `xs:boolean` attribute only when `flag` is `true`.
    pub fn add_flag(&mut self, name: &str, flag: bool) {
        if flag {
            self.add(name, "xs:boolean", "true");
        }
    }

    /// Appends a space-separated list attribute when `values` is non-empty.
    ///
    /// Values are joined in iteration order, without sorting or removing
    /// duplicates.
    pub fn add_list<I, S>(&mut self, name: &str, schema_type: &'static str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for value in values {
            if !joined.is_empty() {
                joined.push(' ');
            }
            joined.push_str(value.as_ref());
        }
        if !joined.is_empty() {
            self.add(name, schema_type, joined);
        }
    }

    /// Returns the value of the attribute called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns the schema type of the attribute called `name`.
    #[must_use]
    pub fn schema_type(&self, name: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.schema_type)
    }

    /// Iterates over the attributes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.entries.iter()
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// What the current element has seen so far, used to decide where
/// newlines and indentation go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Content {
    Nothing,
    Data,
    Element,
}

/// An event-driven XML writer over any [`io::Write`] sink.
pub struct XmlWriter<W: Write> {
    out: W,
    indent: bool,
    indent_str: String,
    depth: usize,
    state: Content,
    state_stack: Vec<Content>,
    verbatim: usize,
    /// Namespace declarations per open element, as `(prefix, uri)` with the
    /// empty prefix standing for the default namespace.
    scopes: Vec<Vec<(String, String)>>,
}

impl<W: Write> XmlWriter<W> {
    /// Creates a writer using the formatting settings of `options`.
    pub fn new(out: W, options: &WriteOptions) -> Self {
        Self {
            out,
            indent: options.indent,
            indent_str: options.indent_str.clone(),
            depth: 0,
            state: Content::Nothing,
            state_stack: Vec::new(),
            verbatim: 0,
            scopes: Vec::new(),
        }
    }

    /// Consumes the writer and returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn formatting(&self) -> bool {
        self.indent && self.verbatim == 0
    }

    fn newline_and_indent(&mut self) -> io::Result<()> {
        if self.depth > 0 {
            self.out.write_all(b"\n")?;
        }
        for _ in 0..self.depth {
            self.out.write_all(self.indent_str.as_bytes())?;
        }
        Ok(())
    }

    fn write_tag(&mut self, name: &str, attributes: &Attributes, empty: bool) -> io::Result<()> {
        let mut tag = String::with_capacity(name.len() + 2);
        tag.push('<');
        tag.push_str(name);
        for attr in attributes {
            tag.push(' ');
            tag.push_str(&attr.name);
            tag.push_str("=\"");
            write_escaped_attr(&mut tag, &attr.value);
            tag.push('"');
        }
        tag.push_str(if empty { "/>" } else { ">" });
        self.out.write_all(tag.as_bytes())
    }

    /// Writes a processing instruction followed by a line break.
    pub fn processing_instruction(&mut self, target: &str, data: &str) -> io::Result<()> {
        writeln!(self.out, "<?{target} {data}?>")
    }

    /// Opens an element. Namespace declarations among `attributes`
    /// (`xmlns`, `xmlns:prefix`) are in scope until the matching
    /// [`end_element`](Self::end_element).
    pub fn start_element(&mut self, name: &str, attributes: &Attributes) -> io::Result<()> {
        self.state_stack.push(Content::Element);
        self.state = Content::Nothing;
        if self.formatting() {
            self.newline_and_indent()?;
        }
        self.write_tag(name, attributes, false)?;
        self.depth += 1;
        self.scopes.push(namespace_declarations(attributes));
        Ok(())
    }

    /// Writes a self-closing element.
    pub fn empty_element(&mut self, name: &str, attributes: &Attributes) -> io::Result<()> {
        self.state = Content::Element;
        if self.formatting() {
            self.newline_and_indent()?;
        }
        self.write_tag(name, attributes, true)
    }

    /// Closes the most recently opened element.
    pub fn end_element(&mut self, name: &str) -> io::Result<()> {
        self.depth = self.depth.saturating_sub(1);
        if self.formatting() && self.state == Content::Element {
            self.out.write_all(b"\n")?;
            for _ in 0..self.depth {
                self.out.write_all(self.indent_str.as_bytes())?;
            }
        }
        write!(self.out, "</{name}>")?;
        self.state = self.state_stack.pop().unwrap_or(Content::Nothing);
        self.scopes.pop();
        Ok(())
    }

    /// Writes escaped character data.
    pub fn characters(&mut self, text: &str) -> io::Result<()> {
        self.state = Content::Data;
        let mut escaped = String::with_capacity(text.len());
        write_escaped_text(&mut escaped, text);
        self.out.write_all(escaped.as_bytes())
    }

    /// Writes a CDATA section. An embedded `]]>` is split across two sections.
    pub fn cdata(&mut self, text: &str) -> io::Result<()> {
        self.state = Content::Data;
        let body = text.replace("]]>", "]]]]><![CDATA[>");
        write!(self.out, "<![CDATA[{body}]]>")
    }

    /// Writes a comment.
    pub fn comment(&mut self, text: &str) -> io::Result<()> {
        self.state = Content::Data;
        write!(self.out, "<!--{text}-->")
    }

    /// Suspends formatting: until the matching
    /// [`end_verbatim`](Self::end_verbatim) no whitespace is inserted.
    pub fn begin_verbatim(&mut self) {
        self.verbatim += 1;
    }

    /// Resumes formatting. The enclosing element is treated as holding text
    /// so that its end tag stays on the same line.
    pub fn end_verbatim(&mut self) {
        self.verbatim = self.verbatim.saturating_sub(1);
        self.state = Content::Data;
    }

    /// Returns the namespace URI bound to `prefix` (empty for the default
    /// namespace) by the currently open elements.
    #[must_use]
    pub fn namespace_uri(&self, prefix: &str) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.iter())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// Terminates the document with a line break and flushes the sink.
    pub fn end_document(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

fn namespace_declarations(attributes: &Attributes) -> Vec<(String, String)> {
    attributes
        .iter()
        .filter_map(|attr| {
            if attr.name == "xmlns" {
                Some((String::new(), attr.value.clone()))
            } else {
                attr.name
                    .strip_prefix("xmlns:")
                    .map(|prefix| (prefix.to_string(), attr.value.clone()))
            }
        })
        .collect()
}

/// Writes a hexadecimal character reference (`&#xHH;`) for a Unicode code point.
fn write_hex_char_ref(out: &mut String, ch: char) {
    use std::fmt::Write;
    let _ = write!(out, "&#x{:X};", ch as u32);
}

/// Escapes text content:
/// - `<`, `>`, `&` are escaped with named entity references
/// - `\r` is encoded as `&#13;`
/// - `\t` and `\n` are passed through
/// - other control characters are hex-encoded
fn write_escaped_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            '\t' | '\n' => out.push(ch),
            c if (c as u32) < 0x20 => write_hex_char_ref(out, c),
            _ => out.push(ch),
        }
    }
}

/// Escapes attribute values: `<`, `>`, `&`, `"` as named references and
/// whitespace other than the space as character references, so that the
/// value survives attribute-value normalization on the way back in.
fn write_escaped_attr(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            c if (c as u32) < 0x20 => write_hex_char_ref(out, c),
            _ => out.push(ch),
        }
    }
}
