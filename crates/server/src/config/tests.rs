use super::*;

#[test]
fn empty_document_uses_defaults() {
    let config = CatalogConfig::from_toml("").unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.shutdown_timeout_seconds, 30);
    assert_eq!(config.assets.root, "data/images");
    assert_eq!(config.assets.public_prefix, "/images");
    assert_eq!(config.assets.default_extension, "png");
    assert_eq!(config.assets.max_upload_bytes, 10 * 1024 * 1024);
    assert!(config.assets.serve_static);
    assert!(config.catalog.seed_demo_products);
    assert!(!config.telemetry.enabled);
}

#[test]
fn custom_sections() {
    let toml = r#"
        [server]
        host = "0.0.0.0"
        port = 3000

        [assets]
        root = "/srv/catalog/images"
        public_prefix = "/static/photos"
        default_extension = "jpeg"
        max_upload_bytes = 1048576
        serve_static = false

        [catalog]
        seed_demo_products = false
    "#;

    let config = CatalogConfig::from_toml(toml).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.shutdown_timeout_seconds, 30);
    assert_eq!(config.assets.root, "/srv/catalog/images");
    assert_eq!(config.assets.public_prefix, "/static/photos");
    assert_eq!(config.assets.default_extension, "jpeg");
    assert_eq!(config.assets.max_upload_bytes, 1_048_576);
    assert!(!config.assets.serve_static);
    assert!(!config.catalog.seed_demo_products);
}

#[test]
fn telemetry_section() {
    let toml = r#"
        [telemetry]
        enabled = true
        endpoint = "http://collector:4318"
        protocol = "http"
        sample_ratio = 0.25

        [telemetry.resource_attributes]
        "deployment.environment" = "staging"
    "#;

    let config = CatalogConfig::from_toml(toml).unwrap();
    assert!(config.telemetry.enabled);
    assert_eq!(config.telemetry.endpoint, "http://collector:4318");
    assert_eq!(config.telemetry.protocol, "http");
    assert_eq!(config.telemetry.service_name, "catalog");
    assert!((config.telemetry.sample_ratio - 0.25).abs() < f64::EPSILON);
    assert_eq!(
        config
            .telemetry
            .resource_attributes
            .get("deployment.environment")
            .map(String::as_str),
        Some("staging")
    );
}

#[test]
fn root_prefix_is_rejected() {
    let err = CatalogConfig::from_toml("[assets]\npublic_prefix = \"/\"").unwrap_err();
    assert!(matches!(err, ServerError::Config(msg) if msg.contains("public_prefix")));
}

#[test]
fn traversal_prefix_is_rejected() {
    let err = CatalogConfig::from_toml("[assets]\npublic_prefix = \"/a/../b\"").unwrap_err();
    assert!(matches!(err, ServerError::Config(_)));
}

#[test]
fn bad_default_extension_is_rejected() {
    let err = CatalogConfig::from_toml("[assets]\ndefault_extension = \"p/ng\"").unwrap_err();
    assert!(matches!(err, ServerError::Config(msg) if msg.contains("default_extension")));

    assert!(CatalogConfig::from_toml("[assets]\ndefault_extension = \".png\"").is_ok());
}

#[test]
fn invalid_toml_is_a_config_error() {
    let err = CatalogConfig::from_toml("[server\nport = 1").unwrap_err();
    assert!(matches!(err, ServerError::Config(_)));
}

#[test]
fn wrong_type_is_a_config_error() {
    let err = CatalogConfig::from_toml("[server]\nport = \"eighty\"").unwrap_err();
    assert!(matches!(err, ServerError::Config(_)));
}
