use docchat::infrastructure::observability::TracingConfig;

#[test]
fn given_level_when_building_filter_then_crate_logs_at_debug() {
    let config = TracingConfig::new("test", "warn", false);

    assert_eq!(config.default_filter(), "warn,docchat=debug,tower_http=debug");
}

#[test]
fn given_json_requested_when_creating_then_json_is_enabled() {
    let config = TracingConfig::new("production", "info", true);

    assert!(config.json_format);
    assert_eq!(config.environment, "production");
}
