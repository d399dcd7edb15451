/// Integration tests for loading Kong declarative configs from disk
use kong_route_tester::models::Configuration;
use kong_route_tester::parsers::{load, ConfigErrorKind, ConfigParser, KongParser};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("kong-test-")
        .suffix(".yaml")
        .tempfile()
        .expect("Should create temp file");
    file.write_all(contents.as_bytes()).expect("Should write test file");
    file
}

fn load_str(contents: &str) -> Configuration {
    let file = write_config(contents);
    load(file.path()).expect("Config should load")
}

#[test]
fn test_read_kong_config() {
    let config = load_str(
        r#"_format_version: "1.1"
services:
  - name: test-service
    url: http://localhost:8080
    plugins:
      - name: auth
    routes:
      - name: test-route
        paths:
          - /api/v1/test
        methods: ["GET", "POST"]
        plugins:
          - name: rate-limiting
            config:
              minute: 100
"#,
    );

    assert_eq!(config.services.len(), 1);
    let service = &config.services[0];
    assert_eq!(service.name, "test-service");
    assert_eq!(service.url, "http://localhost:8080");
    assert_eq!(service.plugins.len(), 1);
    assert_eq!(service.plugins[0].name, "auth");

    assert_eq!(service.routes.len(), 1);
    let route = &service.routes[0];
    assert_eq!(route.name, "test-route");
    assert_eq!(route.paths, vec!["/api/v1/test"]);
    assert_eq!(route.methods, vec!["GET", "POST"]);
    assert_eq!(route.plugins.len(), 1);
    assert_eq!(route.plugins[0].name, "rate-limiting");
    assert_eq!(route.plugins[0].config["minute"], serde_json::json!(100));
}

#[test]
fn test_read_kong_config_with_templating() {
    std::env::set_var("KRT_PARSER_TEST_SERVICE_URL", "http://test.example.com");
    let config = load_str(
        r#"_format_version: "1.1"
services:
  - name: templated-service
    url: ${KRT_PARSER_TEST_SERVICE_URL}
    routes:
      - name: templated-route
        paths:
          - /api/v1/templated
"#,
    );
    std::env::remove_var("KRT_PARSER_TEST_SERVICE_URL");

    assert_eq!(config.services[0].url, "http://test.example.com");
}

#[test]
fn test_unset_template_variables_use_fallbacks() {
    let config = load_str(
        r#"services:
  - name: billing
    url: ${KRT_PARSER_UNSET_BILLING_SERVICE_ADDRESS:=http://billing.local}
  - name: search
    url: ${KRT_PARSER_UNSET_SEARCH_URL:=http://search.local}
"#,
    );

    assert_eq!(config.services[0].url, "http://services.sms.community:10000");
    assert_eq!(config.services[1].url, "http://placeholder");
}

#[test]
fn test_regex_paths_survive_loading() {
    let config = load_str(
        r#"services:
  - name: users
    routes:
      - name: profile
        regex_priority: 10
        hosts: ["api.example.com"]
        paths:
          - "/api/v1/users/(?<user_id>[^/]+)/profile"
"#,
    );

    let route = &config.services[0].routes[0];
    assert_eq!(route.paths[0], "/api/v1/users/(?<user_id>[^/]+)/profile");
    assert_eq!(route.priority, 10);
    assert_eq!(route.hosts, vec!["api.example.com"]);
    assert!(route.methods.is_empty());
}

#[test]
fn test_missing_file_is_not_found() {
    let err = load("non-existent-file.yaml").unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::NotFound);
    assert!(err.to_string().contains("non-existent-file.yaml"));
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let file = write_config(
        "invalid: yaml: content:\n    - missing: bracket\n  malformed",
    );
    let err = KongParser.parse(file.path()).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::ParseError);
}

#[test]
fn test_non_utf8_file_is_parse_error() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("Should create temp file");
    file.write_all(b"services:\n  - name: \xff\xfe\n")
        .expect("Should write test file");

    let err = load(file.path()).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::ParseError);
    assert!(err.to_string().contains("UTF-8"));
}

#[test]
fn test_wrong_route_shape_is_parse_error() {
    let file = write_config("services:\n  - name: svc\n    routes:\n      - name: r\n        paths: 42\n");
    let err = load(file.path()).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::ParseError);
}

#[test]
fn test_json_config_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("Should create temp file");
    file.write_all(br#"{"_format_version": "3.0", "services": [{"name": "svc", "routes": [{"name": "r", "paths": ["/x"], "methods": ["DELETE"]}]}]}"#)
        .expect("Should write test file");

    let config = load(file.path()).expect("JSON config should load");
    assert_eq!(config.services[0].routes[0].methods, vec!["DELETE"]);
}
