//! Streaming WADL reader.
//!
//! [`ContentReader`] is a [`SaxHandler`] that builds an [`ApplicationInfo`]
//! graph from start/end element events. It keeps a stack of frames, one per
//! open WADL element, each owning the node under construction. A start tag
//! pushes a frame; the matching end tag pops it and attaches the finished
//! node to the collection of the new top frame that corresponds to the
//! element kind. Because resources nest on the same stack, the nearest
//! enclosing resource is always the parent of a nested one.
//!
//! Elements outside the WADL namespace, and unknown names inside it, are
//! ignored by default. Everything inside `<doc>` is kept as documentation
//! markup.
//!
//! # Examples
//!
//! ```
//! use wadloxide::reader::parse_str;
//!
//! let app = parse_str(
//!     r#"<application xmlns="http://research.sun.com/wadl/2006/10">
//!          <resources base="http://example.com/">
//!            <resource id="R" path="p"><method name="GET"/></resource>
//!          </resources>
//!        </application>"#,
//! )
//! .unwrap();
//! let resources = app.resources.unwrap();
//! assert_eq!(resources.resources[0].methods[0].name, Some(http::Method::GET));
//! ```

use std::fmt;
use std::mem;

use http::{Method, StatusCode};
use mime::Mime;

use crate::error::{AttributeError, ParseError, ParseErrorKind, SourceLocation};
use crate::model::{
    ApplicationInfo, DocumentationInfo, Documented, FaultInfo, GrammarsInfo, IncludeInfo,
    LinkInfo, MarkupAttribute, MarkupElement, MarkupNode, MethodInfo, NamespaceMap, OptionInfo,
    ParameterInfo, ParameterStyle, RepresentationInfo, RequestInfo, ResourceInfo,
    ResourceTypeInfo, ResourcesInfo, ResponseInfo, WADL_NAMESPACE, XML_NAMESPACE,
};
use crate::sax::{parse_sax, SaxAttribute, SaxHandler};
use crate::util::qname::QName;

/// Default maximum element nesting depth.
const DEFAULT_MAX_DEPTH: u32 = 256;

/// What the reader does with elements it does not recognize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownElementPolicy {
    /// Skip the element; its WADL children are still read in the context
    /// of the enclosing WADL element.
    #[default]
    Ignore,
    /// Abort the parse with [`ParseErrorKind::UnexpectedElement`].
    Reject,
}

/// Options for reading WADL documents.
///
/// # Examples
///
/// ```
/// use wadloxide::reader::{ReadOptions, UnknownElementPolicy};
///
/// let opts = ReadOptions::default()
///     .max_depth(64)
///     .unknown_elements(UnknownElementPolicy::Reject);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Maximum element nesting depth (default: 256).
    pub max_depth: u32,
    /// Handling of unrecognized elements (default: ignore).
    pub unknown_elements: UnknownElementPolicy,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            unknown_elements: UnknownElementPolicy::Ignore,
        }
    }
}

impl ReadOptions {
    /// Sets the maximum element nesting depth.
    #[must_use]
    pub fn max_depth(mut self, max: u32) -> Self {
        self.max_depth = max;
        self
    }

    /// Sets the handling of unrecognized elements.
    #[must_use]
    pub fn unknown_elements(mut self, policy: UnknownElementPolicy) -> Self {
        self.unknown_elements = policy;
        self
    }
}

/// The kind of WADL element currently open in a [`ContentReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseState {
    /// `<application>`
    Application,
    /// `<doc>`
    Documentation,
    /// `<fault>`
    Fault,
    /// `<grammars>`
    Grammars,
    /// `<include>`
    Include,
    /// `<link>`
    Link,
    /// `<method>`
    Method,
    /// `<option>`
    Option,
    /// `<param>`
    Parameter,
    /// `<representation>`
    Representation,
    /// `<request>`
    Request,
    /// `<resource>`
    Resource,
    /// `<resources>`
    Resources,
    /// `<resource_type>`
    ResourceType,
    /// `<response>`
    Response,
    /// No WADL element is open.
    None,
}

impl ParseState {
    /// Maps a local name in the WADL namespace to its state.
    #[must_use]
    pub fn from_tag(local_name: &str) -> Option<Self> {
        Some(match local_name {
            "application" => Self::Application,
            "doc" => Self::Documentation,
            "fault" => Self::Fault,
            "grammars" => Self::Grammars,
            "include" => Self::Include,
            "link" => Self::Link,
            "method" => Self::Method,
            "option" => Self::Option,
            "param" => Self::Parameter,
            "representation" => Self::Representation,
            "request" => Self::Request,
            "resource" => Self::Resource,
            "resources" => Self::Resources,
            "resource_type" => Self::ResourceType,
            "response" => Self::Response,
            _ => return None,
        })
    }

    /// The element name of the state, `None` for [`ParseState::None`].
    #[must_use]
    pub fn tag_name(self) -> Option<&'static str> {
        Some(match self {
            Self::Application => "application",
            Self::Documentation => "doc",
            Self::Fault => "fault",
            Self::Grammars => "grammars",
            Self::Include => "include",
            Self::Link => "link",
            Self::Method => "method",
            Self::Option => "option",
            Self::Parameter => "param",
            Self::Representation => "representation",
            Self::Request => "request",
            Self::Resource => "resource",
            Self::Resources => "resources",
            Self::ResourceType => "resource_type",
            Self::Response => "response",
            Self::None => return None,
        })
    }
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name().unwrap_or("#document"))
    }
}

/// Accumulates the body of a `<doc>` element.
#[derive(Debug)]
struct DocumentationBuilder {
    doc: DocumentationInfo,
    open: Vec<MarkupElement>,
}

impl DocumentationBuilder {
    fn new(doc: DocumentationInfo) -> Self {
        Self {
            doc,
            open: Vec::new(),
        }
    }

    fn push_node(&mut self, node: MarkupNode) {
        let siblings = match self.open.last_mut() {
            Some(element) => &mut element.children,
            None => &mut self.doc.markup,
        };
        if let (MarkupNode::Text(text), Some(MarkupNode::Text(last))) = (&node, siblings.last_mut())
        {
            last.push_str(text);
            return;
        }
        siblings.push(node);
    }

    fn start(&mut self, element: MarkupElement) {
        self.open.push(element);
    }

    /// Closes the innermost markup element. Returns `false` when none is
    /// open, i.e. the end tag is the one of `<doc>` itself.
    fn end(&mut self) -> bool {
        match self.open.pop() {
            Some(element) => {
                self.push_node(MarkupNode::Element(element));
                true
            }
            None => false,
        }
    }

    /// Returns the normalized entry. A body made of text alone becomes the
    /// plain-text content.
    fn finish(self) -> DocumentationInfo {
        self.doc.normalized()
    }
}

/// A node under construction, one per open WADL element.
#[derive(Debug)]
enum Frame {
    Document,
    Application(ApplicationInfo),
    Documentation(DocumentationBuilder),
    Fault(FaultInfo),
    Grammars(GrammarsInfo),
    Include(IncludeInfo),
    Link(LinkInfo),
    Method(MethodInfo),
    Option(OptionInfo),
    Parameter(ParameterInfo),
    Representation(RepresentationInfo),
    Request(RequestInfo),
    Resource(ResourceInfo),
    Resources(ResourcesInfo),
    ResourceType(ResourceTypeInfo),
    Response(ResponseInfo),
}

impl Frame {
    fn state(&self) -> ParseState {
        match self {
            Self::Document => ParseState::None,
            Self::Application(_) => ParseState::Application,
            Self::Documentation(_) => ParseState::Documentation,
            Self::Fault(_) => ParseState::Fault,
            Self::Grammars(_) => ParseState::Grammars,
            Self::Include(_) => ParseState::Include,
            Self::Link(_) => ParseState::Link,
            Self::Method(_) => ParseState::Method,
            Self::Option(_) => ParseState::Option,
            Self::Parameter(_) => ParseState::Parameter,
            Self::Representation(_) => ParseState::Representation,
            Self::Request(_) => ParseState::Request,
            Self::Resource(_) => ParseState::Resource,
            Self::Resources(_) => ParseState::Resources,
            Self::ResourceType(_) => ParseState::ResourceType,
            Self::Response(_) => ParseState::Response,
        }
    }

    fn documentations_mut(&mut self) -> Option<&mut Vec<DocumentationInfo>> {
        Some(match self {
            Self::Document | Self::Documentation(_) => return None,
            Self::Application(n) => n.documentations_mut(),
            Self::Fault(n) => n.documentations_mut(),
            Self::Grammars(n) => n.documentations_mut(),
            Self::Include(n) => n.documentations_mut(),
            Self::Link(n) => n.documentations_mut(),
            Self::Method(n) => n.documentations_mut(),
            Self::Option(n) => n.documentations_mut(),
            Self::Parameter(n) => n.documentations_mut(),
            Self::Representation(n) => n.documentations_mut(),
            Self::Request(n) => n.documentations_mut(),
            Self::Resource(n) => n.documentations_mut(),
            Self::Resources(n) => n.documentations_mut(),
            Self::ResourceType(n) => n.documentations_mut(),
            Self::Response(n) => n.documentations_mut(),
        })
    }

    /// Creates the frame for a WADL start tag, converting its attributes.
    fn open(state: ParseState, attributes: &[SaxAttribute]) -> Result<Self, ParseErrorKind> {
        let attrs = AttributeSet(attributes);
        Ok(match state {
            ParseState::None => Self::Document,
            ParseState::Application => Self::Application(ApplicationInfo::default()),
            ParseState::Documentation => Self::Documentation(DocumentationBuilder::new(
                DocumentationInfo {
                    language: attrs.xml_lang(),
                    title: attrs.string("title"),
                    ..DocumentationInfo::default()
                },
            )),
            ParseState::Fault => Self::Fault(FaultInfo(attrs.representation()?)),
            ParseState::Grammars => Self::Grammars(GrammarsInfo::default()),
            ParseState::Include => Self::Include(IncludeInfo {
                target_ref: attrs.string("href"),
                ..IncludeInfo::default()
            }),
            ParseState::Link => Self::Link(LinkInfo {
                relationship: attrs.string("rel"),
                reverse_relationship: attrs.string("rev"),
                resource_type: attrs.string("resource_type"),
                ..LinkInfo::default()
            }),
            ParseState::Method => Self::Method(MethodInfo {
                identifier: attrs.string("id"),
                name: attrs.convert("name", parse_method)?,
                target_ref: attrs.string("href"),
                ..MethodInfo::default()
            }),
            ParseState::Option => Self::Option(OptionInfo {
                value: attrs.string("value"),
                ..OptionInfo::default()
            }),
            ParseState::Parameter => Self::Parameter(ParameterInfo {
                identifier: attrs.string("id"),
                name: attrs.string("name"),
                style: attrs.convert("style", str::parse::<ParameterStyle>)?,
                param_type: attrs.string("type"),
                default_value: attrs.string("default"),
                fixed: attrs.string("fixed"),
                path: attrs.string("path"),
                required: attrs.convert("required", parse_boolean)?.unwrap_or(false),
                repeating: attrs.convert("repeating", parse_boolean)?.unwrap_or(false),
                ..ParameterInfo::default()
            }),
            ParseState::Representation => Self::Representation(attrs.representation()?),
            ParseState::Request => Self::Request(RequestInfo::default()),
            ParseState::Resource => Self::Resource(ResourceInfo {
                identifier: attrs.string("id"),
                path: attrs.string("path"),
                query_type: attrs.convert("queryType", parse_media_type)?,
                resource_types: attrs.list("type"),
                ..ResourceInfo::default()
            }),
            ParseState::Resources => Self::Resources(ResourcesInfo {
                base_ref: attrs.string("base"),
                ..ResourcesInfo::default()
            }),
            ParseState::ResourceType => Self::ResourceType(ResourceTypeInfo {
                identifier: attrs.string("id"),
                ..ResourceTypeInfo::default()
            }),
            ParseState::Response => Self::Response(ResponseInfo::default()),
        })
    }
}

/// Typed access to the unqualified attributes of a start tag.
struct AttributeSet<'a>(&'a [SaxAttribute]);

impl AttributeSet<'_> {
    fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|a| a.name.namespace.is_none() && a.name.local_name == name)
            .map(|a| a.value.as_str())
    }

    fn string(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    fn xml_lang(&self) -> Option<String> {
        self.0
            .iter()
            .find(|a| {
                a.name.namespace.as_deref() == Some(XML_NAMESPACE) && a.name.local_name == "lang"
            })
            .map(|a| a.value.clone())
    }

    /// Splits a whitespace-separated list attribute, keeping order and
    /// duplicates.
    fn list(&self, name: &str) -> Vec<String> {
        self.get(name)
            .map(|v| v.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn convert<T>(
        &self,
        name: &str,
        parse: impl FnOnce(&str) -> Result<T, AttributeError>,
    ) -> Result<Option<T>, ParseErrorKind> {
        self.get(name)
            .map(|value| {
                parse(value).map_err(|source| ParseErrorKind::Attribute {
                    name: name.to_string(),
                    source,
                })
            })
            .transpose()
    }

    fn representation(&self) -> Result<RepresentationInfo, ParseErrorKind> {
        Ok(RepresentationInfo {
            identifier: self.string("id"),
            media_type: self.convert("mediaType", parse_media_type)?,
            xml_element: self.string("element"),
            profiles: self.list("profile"),
            statuses: self.convert("status", parse_statuses)?.unwrap_or_default(),
            ..RepresentationInfo::default()
        })
    }
}

/// Parses an `xs:boolean`.
fn parse_boolean(value: &str) -> Result<bool, AttributeError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(AttributeError::InvalidBoolean(value.to_string())),
    }
}

fn parse_media_type(value: &str) -> Result<Mime, AttributeError> {
    value
        .trim()
        .parse()
        .map_err(|source| AttributeError::InvalidMediaType {
            value: value.to_string(),
            source,
        })
}

fn parse_statuses(value: &str) -> Result<Vec<StatusCode>, AttributeError> {
    value
        .split_whitespace()
        .map(|token| {
            let code: u16 = token
                .parse()
                .map_err(|source| AttributeError::InvalidStatusNumber {
                    value: token.to_string(),
                    source,
                })?;
            StatusCode::from_u16(code).map_err(|source| AttributeError::InvalidStatus {
                value: token.to_string(),
                source,
            })
        })
        .collect()
}

fn parse_method(value: &str) -> Result<Method, AttributeError> {
    Method::from_bytes(value.trim().as_bytes()).map_err(|source| AttributeError::InvalidMethod {
        value: value.to_string(),
        source,
    })
}

/// Builds an [`ApplicationInfo`] from SAX events.
///
/// Feed it to [`parse_sax`] and collect the result with
/// [`into_application`](Self::into_application).
#[derive(Debug)]
pub struct ContentReader {
    options: ReadOptions,
    frames: Vec<Frame>,
    application: Option<ApplicationInfo>,
    namespaces: NamespaceMap,
}

impl Default for ContentReader {
    fn default() -> Self {
        Self::new(&ReadOptions::default())
    }
}

impl ContentReader {
    /// Creates a reader positioned before the document.
    #[must_use]
    pub fn new(options: &ReadOptions) -> Self {
        Self {
            options: options.clone(),
            frames: vec![Frame::Document],
            application: None,
            namespaces: NamespaceMap::new(),
        }
    }

    /// The kind of the innermost open WADL element.
    #[must_use]
    pub fn state(&self) -> ParseState {
        self.frames.last().map_or(ParseState::None, Frame::state)
    }

    /// The path of the open WADL elements, e.g. `/application/resources`.
    #[must_use]
    pub fn path(&self) -> String {
        let mut path = String::new();
        for frame in &self.frames {
            if let Some(name) = frame.state().tag_name() {
                path.push('/');
                path.push_str(name);
            }
        }
        path
    }

    /// Returns the application read so far, if its element has been closed.
    #[must_use]
    pub fn into_application(self) -> Option<ApplicationInfo> {
        self.application
    }

    fn documentation_builder(&mut self) -> Option<&mut DocumentationBuilder> {
        match self.frames.last_mut() {
            Some(Frame::Documentation(builder)) => Some(builder),
            _ => None,
        }
    }

    fn unexpected(&self, qualified: String) -> Result<(), ParseError> {
        match self.options.unknown_elements {
            UnknownElementPolicy::Ignore => {
                log::debug!("Ignoring unknown element <{qualified}> in {}", self.path());
                Ok(())
            }
            UnknownElementPolicy::Reject => {
                Err(ParseError::new(ParseErrorKind::UnexpectedElement(qualified))
                    .with_path(self.path()))
            }
        }
    }

    /// Attaches a finished node to the collection of the current top frame
    /// that holds nodes of its kind.
    fn attach(&mut self, child: Frame) {
        let child_state = child.state();
        let Some(parent) = self.frames.last_mut() else {
            return;
        };
        let parent_state = parent.state();
        let attached = match (parent, child) {
            (parent, Frame::Documentation(builder)) => match parent.documentations_mut() {
                Some(docs) => {
                    docs.push(builder.finish());
                    true
                }
                None => false,
            },
            (Frame::Document, Frame::Application(app)) => {
                self.application = Some(app);
                true
            }
            (Frame::Application(app), Frame::Grammars(grammars)) => {
                app.grammars = Some(grammars);
                true
            }
            (Frame::Application(app), Frame::Resources(resources)) => {
                app.resources = Some(resources);
                true
            }
            (Frame::Application(app), Frame::ResourceType(resource_type)) => {
                app.resource_types.push(resource_type);
                true
            }
            (Frame::Application(app), Frame::Method(method)) => {
                app.methods.push(method);
                true
            }
            (Frame::Application(app), Frame::Representation(rep)) => {
                app.representations.push(rep);
                true
            }
            (Frame::Application(app), Frame::Fault(fault)) => {
                app.faults.push(fault);
                true
            }
            (Frame::Grammars(grammars), Frame::Include(include)) => {
                grammars.includes.push(include);
                true
            }
            (Frame::Resources(resources), Frame::Resource(resource)) => {
                resources.resources.push(resource);
                true
            }
            (Frame::Resource(parent), Frame::Resource(resource)) => {
                parent.child_resources.push(resource);
                true
            }
            (Frame::Resource(resource), Frame::Method(method)) => {
                resource.methods.push(method);
                true
            }
            (Frame::ResourceType(resource_type), Frame::Method(method)) => {
                resource_type.methods.push(method);
                true
            }
            (Frame::Resource(resource), Frame::Parameter(param)) => {
                resource.parameters.push(param);
                true
            }
            // Parameters of resource types and responses go to their own
            // lists, not to the request of an enclosing method.
            (Frame::ResourceType(resource_type), Frame::Parameter(param)) => {
                resource_type.parameters.push(param);
                true
            }
            (Frame::Response(response), Frame::Parameter(param)) => {
                response.parameters.push(param);
                true
            }
            (Frame::Request(request), Frame::Parameter(param)) => {
                request.parameters.push(param);
                true
            }
            (Frame::Representation(rep), Frame::Parameter(param)) => {
                rep.parameters.push(param);
                true
            }
            (Frame::Fault(fault), Frame::Parameter(param)) => {
                fault.parameters.push(param);
                true
            }
            (Frame::Method(method), Frame::Request(request)) => {
                method.request = Some(request);
                true
            }
            (Frame::Method(method), Frame::Response(response)) => {
                method.response = Some(response);
                true
            }
            (Frame::Request(request), Frame::Representation(rep)) => {
                request.representations.push(rep);
                true
            }
            (Frame::Response(response), Frame::Representation(rep)) => {
                response.representations.push(rep);
                true
            }
            (Frame::Response(response), Frame::Fault(fault)) => {
                response.faults.push(fault);
                true
            }
            (Frame::Parameter(param), Frame::Option(option)) => {
                param.options.push(option);
                true
            }
            (Frame::Parameter(param), Frame::Link(link)) => {
                param.link = Some(link);
                true
            }
            _ => false,
        };
        if !attached {
            log::debug!("Dropping <{child_state}> found inside <{parent_state}>");
        }
    }
}

impl SaxHandler for ContentReader {
    fn start_prefix_mapping(&mut self, prefix: Option<&str>, uri: &str) -> Result<(), ParseError> {
        if self.documentation_builder().is_some() {
            return Ok(());
        }
        if let Some(prefix) = prefix {
            if !uri.is_empty() && uri != WADL_NAMESPACE {
                self.namespaces.insert(uri.to_string(), prefix.to_string());
            }
        }
        Ok(())
    }

    fn start_element(
        &mut self,
        local_name: &str,
        prefix: Option<&str>,
        namespace: Option<&str>,
        attributes: &[SaxAttribute],
    ) -> Result<(), ParseError> {
        if let Some(builder) = self.documentation_builder() {
            builder.start(MarkupElement {
                name: QName {
                    prefix: prefix.map(str::to_string),
                    local_name: local_name.to_string(),
                    namespace: namespace.map(str::to_string),
                },
                attributes: attributes
                    .iter()
                    .map(|a| MarkupAttribute {
                        name: a.name.clone(),
                        value: a.value.clone(),
                    })
                    .collect(),
                children: Vec::new(),
            });
            return Ok(());
        }

        let state = match namespace {
            Some(WADL_NAMESPACE) => ParseState::from_tag(local_name),
            _ => None,
        };
        let Some(state) = state else {
            let qualified = match prefix {
                Some(prefix) => format!("{prefix}:{local_name}"),
                None => local_name.to_string(),
            };
            return self.unexpected(qualified);
        };
        let frame = Frame::open(state, attributes).map_err(|kind| {
            ParseError::new(kind).with_path(format!("{}/{local_name}", self.path()))
        })?;
        self.frames.push(frame);
        Ok(())
    }

    fn end_element(
        &mut self,
        local_name: &str,
        _prefix: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<(), ParseError> {
        if let Some(builder) = self.documentation_builder() {
            if builder.end() {
                return Ok(());
            }
        }
        let known = namespace == Some(WADL_NAMESPACE) && ParseState::from_tag(local_name).is_some();
        if !known || self.frames.len() < 2 {
            return Ok(());
        }
        if let Some(frame) = self.frames.pop() {
            self.attach(frame);
        }
        Ok(())
    }

    fn characters(&mut self, content: &str) -> Result<(), ParseError> {
        if let Some(builder) = self.documentation_builder() {
            builder.push_node(MarkupNode::Text(content.to_string()));
        }
        Ok(())
    }

    fn cdata(&mut self, content: &str) -> Result<(), ParseError> {
        if let Some(builder) = self.documentation_builder() {
            builder.push_node(MarkupNode::CData(content.to_string()));
        }
        Ok(())
    }

    fn comment(&mut self, content: &str) -> Result<(), ParseError> {
        if let Some(builder) = self.documentation_builder() {
            builder.push_node(MarkupNode::Comment(content.to_string()));
        }
        Ok(())
    }

    /// Moves the recorded prefix declarations onto the application, minus
    /// those the documentation markup implies anyway.
    fn end_document(&mut self) -> Result<(), ParseError> {
        let mut declared = mem::take(&mut self.namespaces);
        if let Some(app) = self.application.as_mut() {
            let mut implied = NamespaceMap::new();
            app.update_namespaces(&mut implied);
            declared.retain(|uri, prefix| implied.get(uri) != Some(prefix));
            app.namespaces = declared;
        }
        Ok(())
    }
}

/// Parses a WADL document from a string with default options.
///
/// # Errors
///
/// Returns a [`ParseError`] if the document is not well-formed, an
/// attribute value cannot be converted, or no `application` element is
/// found.
pub fn parse_str(input: &str) -> Result<ApplicationInfo, ParseError> {
    parse_str_with_options(input, &ReadOptions::default())
}

/// Parses a WADL document from a string with the given options.
///
/// # Errors
///
/// As [`parse_str`]; with [`UnknownElementPolicy::Reject`] unknown
/// elements are errors too.
pub fn parse_str_with_options(
    input: &str,
    options: &ReadOptions,
) -> Result<ApplicationInfo, ParseError> {
    let mut reader = ContentReader::new(options);
    parse_sax(input, options, &mut reader)?;
    reader.into_application().ok_or_else(|| {
        ParseError::new(ParseErrorKind::MissingApplication)
            .with_location(SourceLocation::from_offset(input, input.len()))
    })
}

/// Parses a UTF-8 encoded WADL document.
///
/// # Errors
///
/// As [`parse_str_with_options`], plus [`ParseErrorKind::Encoding`] when
/// the input is not valid UTF-8.
pub fn parse_bytes(input: &[u8], options: &ReadOptions) -> Result<ApplicationInfo, ParseError> {
    match std::str::from_utf8(input) {
        Ok(text) => parse_str_with_options(text, options),
        Err(e) => {
            let valid = String::from_utf8_lossy(&input[..e.valid_up_to()]);
            Err(ParseError::new(e).with_location(SourceLocation::from_offset(&valid, valid.len())))
        }
    }
}
