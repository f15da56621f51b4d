//! Attaching parsed WADL resource trees to routers.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use pretty_assertions::assert_eq;

use wadloxide::router::{
    attach_application, attach_resources, compose_path, mount_path, resolve_routes, RouteTable,
    Router,
};
use wadloxide::{parse_str, AttachError};

const STORE: &str = r#"<?xml version="1.0"?>
<application xmlns="http://research.sun.com/wadl/2006/10">
  <resources base="http://shop.example.com/v1/">
    <resource id="Orders" path="orders/">
      <resource id="Order" path="/{orderId}">
        <resource id="Lines" path="lines"/>
      </resource>
    </resource>
    <resource path="internal">
      <resource id="Hidden" path="hidden"/>
    </resource>
    <resource id="Catalog" path="catalog">
      <resource id="Product" path="{sku}.{format}"/>
    </resource>
  </resources>
</application>"#;

/// Records every attachment in call order.
#[derive(Default)]
struct Recorder {
    calls: Vec<(String, &'static str)>,
}

impl Router<&'static str> for Recorder {
    fn attach(&mut self, uri_pattern: &str, target: &'static str) {
        self.calls.push((uri_pattern.to_string(), target));
    }
}

fn handlers() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("Orders", "OrdersHandler"),
        ("Order", "OrderHandler"),
        ("Lines", "LinesHandler"),
        ("Catalog", "CatalogHandler"),
        ("Product", "ProductHandler"),
    ])
}

#[test]
fn test_compose_single_separator() {
    assert_eq!(compose_path("items", "5"), "items/5");
    assert_eq!(compose_path("items/", "/5"), "items/5");
    assert_eq!(compose_path("items/", "5"), "items/5");
    assert_eq!(compose_path("items", "/5"), "items/5");
}

#[test]
fn test_attach_parsed_application() {
    let app = parse_str(STORE).unwrap();
    let handlers = handlers();
    let mut recorder = Recorder::default();
    let count = attach_application(&app, &mut recorder, |id| handlers.get(id).copied()).unwrap();

    assert_eq!(count, 5);
    assert_eq!(
        recorder.calls,
        vec![
            ("orders/".to_string(), "OrdersHandler"),
            ("orders/{orderId}".to_string(), "OrderHandler"),
            ("orders/{orderId}/lines".to_string(), "LinesHandler"),
            ("catalog".to_string(), "CatalogHandler"),
            ("catalog/{sku}.{format}".to_string(), "ProductHandler"),
        ]
    );
}

#[test]
fn test_root_patterns_stay_relative() {
    let app = parse_str(
        r#"<application xmlns="http://research.sun.com/wadl/2006/10">
  <resources><resource id="Items" path="items"/></resources>
</application>"#,
    )
    .unwrap();
    let routes = resolve_routes(app.resources.as_ref().unwrap());
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].pattern, "items");

    let mut table = RouteTable::new();
    attach_application(&app, &mut table, |id| Some(id.to_string())).unwrap();
    assert_eq!(table.find("/items").unwrap().target, "Items");
    assert_eq!(table.find("items").unwrap().target, "Items");
}

#[test]
fn test_attachment_keeps_relative_paths() {
    let app = parse_str(STORE).unwrap();
    let before = app.clone();
    let resources = app.resources.as_ref().unwrap();
    let routes = resolve_routes(resources);
    assert_eq!(routes[1].pattern, "orders/{orderId}");
    assert_eq!(routes[1].resource.path.as_deref(), Some("/{orderId}"));
    assert_eq!(app, before);
}

#[test]
fn test_missing_target_abandons_attachment() {
    let app = parse_str(STORE).unwrap();
    let mut table = RouteTable::new();
    let err = attach_application(&app, &mut table, |id| {
        (id != "Lines").then(|| id.to_string())
    })
    .unwrap_err();

    assert_eq!(
        err,
        AttachError::UnknownTarget {
            identifier: "Lines".to_string(),
            pattern: "orders/{orderId}/lines".to_string(),
        }
    );
    // Routes bound before the failure are not rolled back.
    assert_eq!(table.len(), 2);
}

#[test]
fn test_route_table_dispatch() {
    let app = parse_str(STORE).unwrap();
    let mut table = RouteTable::new();
    attach_resources(app.resources.as_ref().unwrap(), &mut table, |id| {
        Some(id.to_string())
    })
    .unwrap();

    let found = table.find("/orders/17/lines").unwrap();
    assert_eq!(found.target, "Lines");
    assert_eq!(
        found.variables,
        vec![("orderId".to_string(), "17".to_string())]
    );

    let found = table.find("catalog/widget.json").unwrap();
    assert_eq!(found.pattern, "catalog/{sku}.{format}");
    assert_eq!(
        found.variables,
        vec![
            ("sku".to_string(), "widget".to_string()),
            ("format".to_string(), "json".to_string()),
        ]
    );

    assert!(table.find("internal/hidden").is_none());
    assert!(table.find("orders/17/lines/3").is_none());
}

#[test]
fn test_mount_path_from_base() {
    let app = parse_str(STORE).unwrap();
    assert_eq!(
        mount_path(app.resources.as_ref().unwrap()).as_deref(),
        Some("/v1/")
    );
}
