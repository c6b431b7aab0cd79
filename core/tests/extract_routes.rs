//! End-to-end extraction over a YAML metadata document: a base
//! interface declaring the shared contract, a concrete implementation
//! refining parts of it, and a sibling resource with body parameters.

use pretty_assertions::assert_eq;
use restmap_core::{
    extract_routes, AppError, HttpMethod, MetadataRegistry, ParameterKind,
};

const METADATA: &str = r#"
classes:
  - name: com.example.rest.EchoApi
    kind: interface
    annotations:
      - kind: path
        value: /test
      - kind: produces
        media: [application/json]
    methods:
      - name: echo
        annotations:
          - kind: get
          - kind: path
            value: /echo
      - name: update
        annotations:
          - kind: put
          - kind: path
            value: /update/{id}
        params:
          - name: id
            type: Long
            annotations:
              - kind: pathParam
                value: id
          - name: entity
            type: com.example.rest.Dummy

  - name: com.example.rest.EchoRest
    implements: [com.example.rest.EchoApi]
    methods:
      - name: echo
        annotations:
          - kind: produces
            media: [text/plain]
      - name: update
        params:
          - name: id
            type: Long
          - name: entity
            type: com.example.rest.Dummy

  - name: com.example.rest.PostRest
    annotations:
      - kind: path
        value: /post
    methods:
      - name: accept
        annotations:
          - kind: post
          - kind: path
            value: /json
          - kind: consumes
            media: [application/json]
        params:
          - name: json
            type: com.example.rest.Dummy
          - name: header
            type: String
            annotations:
              - kind: headerParam
                value: X-Test
"#;

#[test]
fn extracts_inherited_and_refined_routes() {
    let registry = MetadataRegistry::from_yaml(METADATA).unwrap();
    let routes = extract_routes(&registry, "com.example.rest.EchoRest").unwrap();

    assert_eq!(routes.len(), 2);

    // echo: verb and path come from the interface, the local produces
    // declaration overrides the interface default.
    let (echo, echo_handler) = routes
        .iter()
        .find(|(d, _)| d.path() == Some("/test/echo"))
        .expect("echo route missing");
    assert_eq!(echo.method(), Some(HttpMethod::Get));
    assert_eq!(echo.produces(), ["text/plain".to_string()]);
    assert_eq!(echo_handler.class, "com.example.rest.EchoRest");
    assert_eq!(echo_handler.signature(), "echo()");

    // update: the concrete override declares nothing; everything fills
    // in from the interface, including the parameter bindings. The
    // un-annotated Dummy parameter becomes the implicit body.
    let (update, update_handler) = routes
        .iter()
        .find(|(d, _)| d.path() == Some("/test/update/{id}"))
        .expect("update route missing");
    assert_eq!(update.method(), Some(HttpMethod::Put));
    assert_eq!(update.produces(), ["application/json".to_string()]);

    let params = update.parameters();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].kind, ParameterKind::Path);
    assert_eq!(params[0].name, "id");
    assert_eq!(params[1].kind, ParameterKind::Body);
    assert_eq!(params[1].name, "com.example.rest.Dummy");
    assert_eq!(
        update_handler.signature(),
        "update(Long id, com.example.rest.Dummy entity)"
    );
}

#[test]
fn extracts_body_and_header_bindings() {
    let registry = MetadataRegistry::from_yaml(METADATA).unwrap();
    let routes = extract_routes(&registry, "com.example.rest.PostRest").unwrap();

    assert_eq!(routes.len(), 1);
    let (def, _) = routes.first().unwrap();

    assert_eq!(def.method(), Some(HttpMethod::Post));
    assert_eq!(def.path(), Some("/post/json"));
    assert_eq!(def.consumes(), ["application/json".to_string()]);
    assert!(def.produces().is_empty());

    let body = &def.parameters()[0];
    assert_eq!(body.kind, ParameterKind::Body);
    assert_eq!(body.name, "com.example.rest.Dummy");
    assert_eq!(body.data_type, "com.example.rest.Dummy");
    assert_eq!(body.default_value, None);

    let header = &def.parameters()[1];
    assert_eq!(header.kind, ParameterKind::Header);
    assert_eq!(header.name, "X-Test");
    assert_eq!(header.data_type, "String");
}

#[test]
fn extraction_results_are_structurally_equal_across_calls() {
    let registry = MetadataRegistry::from_yaml(METADATA).unwrap();

    for class in [
        "com.example.rest.EchoRest",
        "com.example.rest.PostRest",
    ] {
        let first = extract_routes(&registry, class).unwrap();
        let second = extract_routes(&registry, class).unwrap();
        assert_eq!(first.len(), second.len(), "{}", class);
        for ((da, ha), (db, hb)) in first.iter().zip(second.iter()) {
            assert_eq!(da, db);
            assert_eq!(da.parameters(), db.parameters());
            assert_eq!(ha, hb);
        }
    }
}

#[test]
fn interface_extraction_stands_alone() {
    // The interface itself is a valid extraction target; its abstract
    // methods are route candidates in their own right.
    let registry = MetadataRegistry::from_yaml(METADATA).unwrap();
    let routes = extract_routes(&registry, "com.example.rest.EchoApi").unwrap();

    assert_eq!(routes.len(), 2);
    let (echo, handler) = routes.first().unwrap();
    assert_eq!(echo.path(), Some("/test/echo"));
    assert_eq!(echo.produces(), ["application/json".to_string()]);
    assert_eq!(handler.class, "com.example.rest.EchoApi");
}

#[test]
fn missing_class_aborts_extraction() {
    let registry = MetadataRegistry::from_yaml(METADATA).unwrap();
    let err = extract_routes(&registry, "com.example.rest.Ghost").unwrap_err();
    assert!(matches!(err, AppError::MissingClass(_)));
}
