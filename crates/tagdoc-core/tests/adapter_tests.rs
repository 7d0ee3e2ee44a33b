use std::sync::Arc;
use std::thread;

use http::StatusCode;
use serde_json::{Value, json};

use tagdoc_core::config::DEFAULT_NAME;
use tagdoc_core::descriptor::ServiceDescriptor;
use tagdoc_core::grouping::TagGroup;
use tagdoc_core::{DocAdapter, Outcome, Protocol, parse};

const BOOKSTORE: &str = include_str!("fixtures/bookstore.yaml");

fn bookstore() -> Value {
    parse::from_yaml(BOOKSTORE).expect("should parse bookstore.yaml")
}

fn ok_body(outcome: Outcome) -> Value {
    match outcome {
        Outcome::Handled { status, body } => {
            assert_eq!(status, StatusCode::OK);
            body
        }
        Outcome::NotHandled => panic!("expected handled outcome"),
    }
}

#[test]
fn swagger_json_returns_document_verbatim() {
    for prefix in ["", "/docs", "/api/v1/ui"] {
        let adapter = DocAdapter::new(bookstore(), "Bookstore");
        let path = format!("{prefix}/swagger.json");
        assert_eq!(ok_body(adapter.classify(prefix, &path, None)), bookstore());
    }
}

#[test]
fn swagger_json_is_idempotent() {
    let adapter = DocAdapter::new(bookstore(), "Bookstore");
    let first = serde_json::to_string(&ok_body(adapter.classify("/docs", "/docs/swagger.json", None))).unwrap();
    let second = serde_json::to_string(&ok_body(adapter.classify("/docs", "/docs/swagger.json", None))).unwrap();
    assert_eq!(first, second);
}

#[test]
fn services_json_lists_one_descriptor() {
    let adapter = DocAdapter::new(bookstore(), "Bookstore");
    let body = ok_body(adapter.classify("/docs", "/services.json", None));
    let services: Vec<ServiceDescriptor> = serde_json::from_value(body).unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].name, "Bookstore");
    assert_eq!(services[0].url, "/docs/swagger.json");
    assert_eq!(services[0].swagger_version, "3.0.0");
}

#[test]
fn other_paths_are_not_handled() {
    let adapter = DocAdapter::new(bookstore(), "Bookstore");
    for path in [
        "/",
        "/index.html",
        "/swagger.json",
        "/docs/swagger.json/",
        "/docs/services.json",
        "/swagger-resources",
        "/api-docs/books",
    ] {
        assert_eq!(
            adapter.classify("/docs", path, None),
            Outcome::NotHandled,
            "{path} should fall through"
        );
    }
}

#[test]
fn default_adapter_serves_empty_document() {
    let adapter = DocAdapter::default();
    let services = ok_body(adapter.classify("", "/services.json", None));
    assert_eq!(services[0]["name"], DEFAULT_NAME);
    assert_eq!(ok_body(adapter.classify("", "/swagger.json", None)), json!({}));
}

#[test]
fn null_document_yields_structured_error() {
    let adapter = DocAdapter::new(Value::Null, "Bookstore").with_protocol(Protocol::Both);
    for path in ["/services.json", "/swagger.json", "/api-docs/books", "/elsewhere"] {
        match adapter.classify("", path, None) {
            Outcome::Handled { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert!(body["error"].is_string());
                assert!(body["message"].is_string());
            }
            Outcome::NotHandled => panic!("{path} should report the configuration error"),
        }
    }
}

#[test]
fn legacy_filter_by_group() {
    let doc = json!({
        "openapi": "3.0.0",
        "paths": {
            "/a": { "get": { "tags": ["X"] } },
            "/b": { "get": { "tags": ["Y"] } }
        }
    });
    let adapter = DocAdapter::new(doc.clone(), "n").with_protocol(Protocol::Legacy);

    let x = ok_body(adapter.classify("", "/api-docs/X", Some("groupName=X")));
    let paths = x["paths"].as_object().unwrap();
    assert!(paths.contains_key("/a"));
    assert!(!paths.contains_key("/b"));

    let all = ok_body(adapter.classify(
        "",
        "/api-docs/%E5%85%A8%E9%83%A8",
        Some("groupName=%E5%85%A8%E9%83%A8"),
    ));
    let paths = all["paths"].as_object().unwrap();
    assert!(paths.contains_key("/a"));
    assert!(paths.contains_key("/b"));
    assert_eq!(all, doc);
}

#[test]
fn legacy_requests_for_different_groups_do_not_interfere() {
    let adapter = DocAdapter::new(bookstore(), "Bookstore").with_protocol(Protocol::Legacy);

    let admin = ok_body(adapter.classify("", "/api-docs/admin", Some("groupName=admin")));
    let admin_paths: Vec<&str> = admin["paths"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(admin_paths, ["/books", "/books/{id}"]);
    assert!(admin["paths"]["/books"].get("get").is_none());
    assert!(admin["paths"]["/books/{id}"].get("parameters").is_some());

    let authors = ok_body(adapter.classify("", "/api-docs/authors", Some("groupName=authors")));
    assert_eq!(authors["paths"].as_object().unwrap().len(), 1);
    assert!(authors["components"]["schemas"].get("Book").is_some());

    let all = ok_body(adapter.classify("", "/api-docs/x", None));
    assert_eq!(all, bookstore());
}

#[test]
fn legacy_swagger_resources_lists_groups() {
    let adapter = DocAdapter::new(bookstore(), "Bookstore").with_protocol(Protocol::Legacy);
    let body = ok_body(adapter.classify("/ui", "/swagger-resources", None));
    let groups: Vec<TagGroup> = serde_json::from_value(body).unwrap();
    let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["全部", "books", "admin", "authors"]);
    assert_eq!(groups[3].url, "/ui/api-docs/authors");
}

#[test]
fn legacy_swagger_config_embeds_groups() {
    let adapter = DocAdapter::new(bookstore(), "Bookstore").with_protocol(Protocol::Legacy);
    let body = ok_body(adapter.classify("", "/v3/api-docs/swagger-config", None));
    assert_eq!(body["info"]["title"], "Bookstore");
    assert_eq!(body["urls"].as_array().unwrap().len(), 4);
    assert_eq!(body["urls"][0]["servicePath"], "");

    let plain = ok_body(
        DocAdapter::new(bookstore(), "Bookstore")
            .with_protocol(Protocol::Both)
            .classify("", "/swagger.json", None),
    );
    assert!(plain.get("urls").is_none());
}

fn path_keys(body: &Value) -> Vec<String> {
    body["paths"].as_object().unwrap().keys().cloned().collect()
}

#[test]
fn legacy_repeated_group_name_uses_first() {
    let adapter = DocAdapter::new(bookstore(), "Bookstore").with_protocol(Protocol::Legacy);
    let single = ok_body(adapter.classify("", "/api-docs/admin", Some("groupName=admin")));
    let repeated = ok_body(adapter.classify(
        "",
        "/api-docs/admin",
        Some("groupName=admin&groupName=admin"),
    ));
    assert_eq!(path_keys(&repeated), ["/books", "/books/{id}"]);
    assert_eq!(repeated, single);
}

#[test]
fn concurrent_group_requests_match_sequential_results() {
    let adapter = Arc::new(DocAdapter::new(bookstore(), "Bookstore").with_protocol(Protocol::Both));
    let queries = [
        "groupName=books",
        "groupName=admin",
        "groupName=authors",
        "groupName=%E5%85%A8%E9%83%A8",
    ];
    let expected: Vec<Value> = queries
        .iter()
        .map(|&query| ok_body(adapter.classify("", "/api-docs/x", Some(query))))
        .collect();

    thread::scope(|scope| {
        for _ in 0..4 {
            for (&query, want) in queries.iter().zip(&expected) {
                let adapter = Arc::clone(&adapter);
                scope.spawn(move || {
                    for _ in 0..25 {
                        let got = ok_body(adapter.classify("", "/api-docs/x", Some(query)));
                        assert_eq!(&got, want, "{query}");
                    }
                });
            }
        }
    });

    assert_eq!(*adapter.document().unwrap(), bookstore());
    assert_eq!(ok_body(adapter.classify("", "/swagger.json", None)), bookstore());
}
