//! Tests of the frame-stack reader driven directly through the SAX layer.

#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use wadloxide::error::{AttributeError, ParseErrorKind};
use wadloxide::reader::{
    parse_bytes, parse_str_with_options, ContentReader, ParseState, ReadOptions,
    UnknownElementPolicy,
};
use wadloxide::sax::{parse_sax, SaxAttribute, SaxHandler};
use wadloxide::{parse_str, ParseError};

const MINIMAL: &str = r#"<application xmlns="http://research.sun.com/wadl/2006/10"><resources><resource id="R" path="p"><method name="GET"/></resource></resources></application>"#;

/// Forwards events to a [`ContentReader`] and records its state after
/// every start and end tag.
struct StateTracker {
    reader: ContentReader,
    states: Vec<ParseState>,
}

impl SaxHandler for StateTracker {
    fn start_element(
        &mut self,
        local_name: &str,
        prefix: Option<&str>,
        namespace: Option<&str>,
        attributes: &[SaxAttribute],
    ) -> Result<(), ParseError> {
        self.reader
            .start_element(local_name, prefix, namespace, attributes)?;
        self.states.push(self.reader.state());
        Ok(())
    }

    fn end_element(
        &mut self,
        local_name: &str,
        prefix: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<(), ParseError> {
        self.reader.end_element(local_name, prefix, namespace)?;
        self.states.push(self.reader.state());
        Ok(())
    }

    fn end_document(&mut self) -> Result<(), ParseError> {
        self.reader.end_document()
    }
}

#[test]
fn test_minimal_document_state_stack() {
    let options = ReadOptions::default();
    let mut tracker = StateTracker {
        reader: ContentReader::new(&options),
        states: Vec::new(),
    };
    parse_sax(MINIMAL, &options, &mut tracker).unwrap();

    assert_eq!(
        tracker.states,
        vec![
            ParseState::Application,
            ParseState::Resources,
            ParseState::Resource,
            ParseState::Method,
            ParseState::Resource,
            ParseState::Resources,
            ParseState::Application,
            ParseState::None,
        ]
    );
    assert_eq!(tracker.reader.state(), ParseState::None);
    assert_eq!(tracker.reader.path(), "");

    let app = tracker.reader.into_application().unwrap();
    let resources = &app.resources.as_ref().unwrap().resources;
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].identifier.as_deref(), Some("R"));
    assert_eq!(resources[0].methods.len(), 1);
    assert_eq!(resources[0].methods[0].name, Some(http::Method::GET));
}

#[test]
fn test_foreign_wrapper_is_transparent() {
    let xml = r#"<application xmlns="http://research.sun.com/wadl/2006/10" xmlns:x="urn:x">
        <resources>
          <x:group>
            <resource id="A" path="a"/>
          </x:group>
        </resources>
      </application>"#;
    let app = parse_str(xml).unwrap();
    let resources = &app.resources.unwrap().resources;
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].path.as_deref(), Some("a"));
    assert_eq!(
        app.namespaces.get("urn:x").map(String::as_str),
        Some("x")
    );
}

#[test]
fn test_strict_mode_reports_element_path() {
    let xml = r#"<application xmlns="http://research.sun.com/wadl/2006/10">
  <resources>
    <resource path="a"><handler/></resource>
  </resources>
</application>"#;
    let options = ReadOptions::default().unknown_elements(UnknownElementPolicy::Reject);
    let err = parse_str_with_options(xml, &options).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::UnexpectedElement(ref name) if name == "handler"));
    assert_eq!(err.path, "/application/resources/resource");
    assert_eq!(err.location.line, 3);
}

#[test]
fn test_invalid_status_aborts_whole_parse() {
    let xml = r#"<application xmlns="http://research.sun.com/wadl/2006/10">
  <resources>
    <resource id="A" path="a">
      <method name="GET">
        <response><representation status="200 abc"/></response>
      </method>
    </resource>
  </resources>
</application>"#;
    let err = parse_str(xml).unwrap_err();
    match &err.kind {
        ParseErrorKind::Attribute { name, source } => {
            assert_eq!(name, "status");
            assert!(matches!(source, AttributeError::InvalidStatusNumber { value, .. } if value == "abc"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        err.path,
        "/application/resources/resource/method/response/representation"
    );
    assert_eq!(err.location.line, 5);
    assert!(err.to_string().starts_with("parse error at 5:"));
}

#[test]
fn test_unknown_style_is_an_error() {
    let xml = r#"<application xmlns="http://research.sun.com/wadl/2006/10">
  <method name="GET"><request><param name="q" style="cookie"/></request></method>
</application>"#;
    let err = parse_str(xml).unwrap_err();
    assert!(matches!(
        err.kind,
        ParseErrorKind::Attribute {
            source: AttributeError::UnknownStyle(_),
            ..
        }
    ));
    assert_eq!(err.path, "/application/method/request/param");
}

#[test]
fn test_depth_limit() {
    let open: String = (0..20).map(|_| "<resource>").collect();
    let close: String = (0..20).map(|_| "</resource>").collect();
    let xml = format!(
        "<application xmlns=\"http://research.sun.com/wadl/2006/10\"><resources>{open}{close}</resources></application>"
    );
    assert!(parse_str(&xml).is_ok());

    let options = ReadOptions::default().max_depth(10);
    let err = parse_str_with_options(&xml, &options).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::DepthLimit(10)));
}

#[test]
fn test_truncated_document() {
    let err = parse_str(&MINIMAL[..MINIMAL.len() - 20]).unwrap_err();
    assert!(matches!(
        err.kind,
        ParseErrorKind::UnexpectedEof | ParseErrorKind::Xml(_)
    ));
}

#[test]
fn test_non_wadl_root() {
    let err = parse_str("<application><resources/></application>").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::MissingApplication));
}

#[test]
fn test_parse_bytes_with_bom() {
    let mut input = vec![0xEF, 0xBB, 0xBF];
    input.extend_from_slice(MINIMAL.as_bytes());
    let app = parse_bytes(&input, &ReadOptions::default()).unwrap();
    assert!(app.resources.is_some());
}
