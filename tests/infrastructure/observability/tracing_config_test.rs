use mediaforge::infrastructure::observability::TracingConfig;
use mediaforge::presentation::Environment;
use mediaforge::presentation::config::LoggingSettings;

#[test]
fn given_logging_settings_when_building_config_then_fields_are_copied() {
    let logging = LoggingSettings {
        level: "warn".to_string(),
        enable_json: true,
    };

    let config = TracingConfig::new(&Environment::Prod, &logging);

    assert_eq!(config.environment, "Prod");
    assert!(config.json_format);
    assert_eq!(
        config.default_directives(),
        "warn,mediaforge=debug,tower_http=debug"
    );
}

#[test]
fn given_default_config_when_created_then_environment_is_set() {
    let config = TracingConfig::default();

    assert!(!config.environment.is_empty());
    assert_eq!(config.level, "info");
}
