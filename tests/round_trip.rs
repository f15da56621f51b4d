//! Write-then-read tests: a graph serialized by the writer and parsed back
//! by the reader must come back structurally identical.

#![allow(clippy::unwrap_used)]

use http::{Method, StatusCode};
use pretty_assertions::assert_eq;

use wadloxide::model::{
    ApplicationInfo, DocumentationInfo, FaultInfo, IncludeInfo, LinkInfo, MarkupAttribute,
    MarkupElement, MarkupNode, MethodInfo, OptionInfo, ParameterInfo, ParameterStyle,
    RepresentationInfo, ResourceInfo, ResourceTypeInfo,
};
use wadloxide::util::qname::QName;
use wadloxide::{parse_str, to_string, Documented, WriteOptions};

const XHTML: &str = "http://www.w3.org/1999/xhtml";
const XSD: &str = "http://www.w3.org/2001/XMLSchema";

fn round_trip(app: &ApplicationInfo, options: &WriteOptions) -> ApplicationInfo {
    let xml = to_string(app, options);
    parse_str(&xml).unwrap_or_else(|e| panic!("{e}\n{xml}"))
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn page_param() -> ParameterInfo {
    let mut param = ParameterInfo::new("page", ParameterStyle::Query);
    param.param_type = Some("xsd:int".to_string());
    param.default_value = Some("1".to_string());
    param.required = true;
    param.add_documentation("Page number, starting at 1");
    param
}

fn sort_param() -> ParameterInfo {
    let mut param = ParameterInfo::new("sort", ParameterStyle::Query);
    param.options.push(OptionInfo::new("asc"));
    param.options.push(OptionInfo::new("desc"));
    param
}

fn item_representation() -> RepresentationInfo {
    let mut rep = RepresentationInfo::new(mime::APPLICATION_JSON);
    rep.identifier = Some("item".to_string());
    rep.profiles = vec!["http://a".to_string(), "http://b".to_string()];
    rep.statuses = vec![StatusCode::OK, StatusCode::CREATED];
    let mut owner = ParameterInfo::new("owner", ParameterStyle::Plain);
    owner.path = Some("/item/owner".to_string());
    owner.link = Some(LinkInfo {
        resource_type: Some("#user".to_string()),
        relationship: Some("owner".to_string()),
        ..LinkInfo::default()
    });
    rep.parameters.push(owner);
    rep
}

fn markup_doc() -> DocumentationInfo {
    DocumentationInfo {
        language: Some("en".to_string()),
        title: Some("Items".to_string()),
        text_content: None,
        markup: vec![
            MarkupNode::Text("The ".to_string()),
            MarkupNode::Element(MarkupElement {
                name: QName::bound(Some("html"), "a", XHTML),
                attributes: vec![MarkupAttribute {
                    name: QName::local("href"),
                    value: "http://example.com/?a=1&b=2".to_string(),
                }],
                children: vec![MarkupNode::Text("item".to_string())],
            }),
            MarkupNode::Text(" collection.".to_string()),
        ],
    }
}

fn inventory() -> ApplicationInfo {
    let mut get = MethodInfo::new(Method::GET);
    get.identifier = Some("listItems".to_string());
    get.request_mut().parameters.push(page_param());
    get.request_mut().parameters.push(sort_param());
    get.response_mut().representations.push(item_representation());
    let mut not_found = FaultInfo::new(mime::TEXT_PLAIN, StatusCode::NOT_FOUND);
    not_found.add_documentation("No such item");
    get.response_mut().faults.push(not_found);

    let mut post = MethodInfo::new(Method::POST);
    post.request_mut()
        .representations
        .push(RepresentationInfo::new(mime::APPLICATION_WWW_FORM_URLENCODED));

    let mut item = ResourceInfo::new("{id}").with_identifier("Item");
    item.parameters
        .push(ParameterInfo::new("id", ParameterStyle::Template));
    item.methods.push(MethodInfo::new(Method::DELETE));

    let mut items = ResourceInfo::new("items")
        .with_identifier("Items")
        .with_child(item);
    items.resource_types.push("#paged".to_string());
    items.query_type = Some(mime::APPLICATION_WWW_FORM_URLENCODED);
    items.documentations.push(markup_doc());
    items.methods.push(get);
    items.methods.push(post);

    let mut app = ApplicationInfo::default();
    app.add_documentation("Inventory service");
    app.grammars_mut()
        .includes
        .push(IncludeInfo::new("inventory.xsd"));
    app.resources_mut().base_ref = Some("http://example.com/api/".to_string());
    app.resources_mut().resources.push(items);

    let mut paged = ResourceTypeInfo::new("paged");
    paged.parameters.push(page_param());
    let mut head = MethodInfo::new(Method::HEAD);
    head.identifier = Some("head-check".to_string());
    paged.methods.push(head);
    app.resource_types.push(paged);

    let mut shared = MethodInfo::default();
    shared.target_ref = Some("#listItems".to_string());
    app.methods.push(shared);
    app.representations.push(item_representation());
    app.faults.push(FaultInfo::new(
        mime::TEXT_PLAIN,
        StatusCode::INTERNAL_SERVER_ERROR,
    ));
    app.namespaces.insert(XSD.to_string(), "xsd".to_string());
    app
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn test_full_graph_round_trip() {
    let app = inventory();
    assert_eq!(round_trip(&app, &WriteOptions::default()), app);
}

#[test]
fn test_round_trip_without_indentation() {
    let app = inventory();
    let options = WriteOptions::default()
        .indent(false)
        .xml_declaration(false)
        .stylesheet(None);
    assert_eq!(round_trip(&app, &options), app);
}

#[test]
fn test_round_trip_is_stable() {
    let app = inventory();
    let options = WriteOptions::default();
    let first = to_string(&app, &options);
    let second = to_string(&parse_str(&first).unwrap(), &options);
    assert_eq!(first, second);
}

#[test]
fn test_empty_application_round_trip() {
    let app = ApplicationInfo::default();
    assert_eq!(round_trip(&app, &WriteOptions::default()), app);
}

#[test]
fn test_markup_namespace_declared_once_on_root() {
    let mut app = ApplicationInfo::default();
    app.documentations.push(markup_doc());
    let xml = to_string(&app, &WriteOptions::default().indent(false));
    assert_eq!(xml.matches("xmlns:html=").count(), 1);
    assert!(xml.contains("<html:a href=\"http://example.com/?a=1&amp;b=2\">item</html:a>"));

    let parsed = parse_str(&xml).unwrap();
    assert!(parsed.namespaces.is_empty());
    assert_eq!(parsed, app);
}

// ---------------------------------------------------------------------------
// Attribute encoding
// ---------------------------------------------------------------------------

#[test]
fn test_profiles_join_and_split_in_order() {
    let mut app = ApplicationInfo::default();
    app.representations.push(item_representation());
    let xml = to_string(&app, &WriteOptions::default());
    assert!(xml.contains("profile=\"http://a http://b\""));
    assert!(xml.contains("status=\"200 201\""));

    let parsed = parse_str(&xml).unwrap();
    assert_eq!(
        parsed.representations[0].profiles,
        vec!["http://a".to_string(), "http://b".to_string()]
    );
    assert_eq!(
        parsed.representations[0].statuses,
        vec![StatusCode::OK, StatusCode::CREATED]
    );
}

#[test]
fn test_unset_optional_attributes_omitted() {
    let mut app = ApplicationInfo::default();
    let mut resource = ResourceInfo::new("a").with_identifier("A");
    let mut method = MethodInfo::new(Method::GET);
    method
        .request_mut()
        .parameters
        .push(ParameterInfo::new("q", ParameterStyle::Query));
    resource.methods.push(method);
    app.resources_mut().resources.push(resource);
    let xml = to_string(&app, &WriteOptions::default().indent(false));
    assert!(xml.contains("<param name=\"q\" style=\"query\"/>"));
    assert!(!xml.contains("required"));
    assert!(!xml.contains("repeating"));
    assert!(!xml.contains("base="));
    assert!(!xml.contains("queryType"));
    assert!(!xml.contains("type=\"\""));
}

#[test]
fn test_flags_written_only_when_true() {
    let mut param = ParameterInfo::new("q", ParameterStyle::Header);
    param.repeating = true;
    let mut method = MethodInfo::new(Method::GET);
    method.request_mut().parameters.push(param);
    let mut app = ApplicationInfo::default();
    app.methods.push(method);
    let xml = to_string(&app, &WriteOptions::default().indent(false));
    assert!(xml.contains("<param name=\"q\" style=\"header\" repeating=\"true\"/>"));

    let parsed = parse_str(&xml).unwrap();
    let param = &parsed.methods[0].request.as_ref().unwrap().parameters[0];
    assert!(param.repeating);
    assert!(!param.required);
}

#[test]
fn test_text_documentation_escaped() {
    let mut app = ApplicationInfo::default();
    app.add_documentation("a < b && c > d");
    let xml = to_string(&app, &WriteOptions::default());
    assert!(xml.contains("<doc>a &lt; b &amp;&amp; c &gt; d</doc>"));
    assert_eq!(
        parse_str(&xml).unwrap().documentations[0]
            .text_content
            .as_deref(),
        Some("a < b && c > d")
    );
}

// ---------------------------------------------------------------------------
// Documentation bodies
// ---------------------------------------------------------------------------

fn with_doc(doc: DocumentationInfo) -> ApplicationInfo {
    let mut app = ApplicationInfo::default();
    app.documentations.push(doc);
    app
}

#[test]
fn test_text_only_markup_round_trip() {
    let app = with_doc(DocumentationInfo {
        markup: vec![MarkupNode::Text("hello".to_string())],
        ..DocumentationInfo::default()
    });
    let parsed = round_trip(&app, &WriteOptions::default());
    assert_eq!(parsed, app);
    assert_eq!(parsed.documentations[0].text_content.as_deref(), Some("hello"));
    assert!(parsed.documentations[0].markup.is_empty());
}

#[test]
fn test_adjacent_text_nodes_round_trip() {
    let app = with_doc(DocumentationInfo {
        markup: vec![
            MarkupNode::Text("a".to_string()),
            MarkupNode::Text("b".to_string()),
        ],
        ..DocumentationInfo::default()
    });
    let parsed = round_trip(&app, &WriteOptions::default());
    assert_eq!(parsed, app);
    assert_eq!(parsed.documentations[0].text(), "ab");
}

#[test]
fn test_empty_text_body_round_trip() {
    let mut doc = DocumentationInfo::new("");
    doc.title = Some("Untitled body".to_string());
    let app = with_doc(doc);
    let xml = to_string(&app, &WriteOptions::default());
    assert!(xml.contains("<doc title=\"Untitled body\"/>"));

    let parsed = parse_str(&xml).unwrap();
    assert_eq!(parsed, app);
    assert_eq!(parsed.documentations[0].text_content, None);
}
