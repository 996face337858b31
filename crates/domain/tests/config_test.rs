use ferrous_collector_domain::config::{LogFormat, OutputMode};
use ferrous_collector_domain::{CliOverrides, Config, ConfigError};

#[test]
fn test_defaults() {
    let config = Config::default();

    assert_eq!(config.global.identity, "collector");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Text);
    assert!(config.collectors.udp.enable);
    assert_eq!(config.collectors.udp.listen_port, 6000);
    assert!(!config.collectors.tcp.enable);
    assert!(config.subprocessors.filtering.log_queries);
    assert!(config.subprocessors.filtering.log_replies);
    assert!(config.subprocessors.filtering.drop_rcodes.is_empty());
    assert!(config.loggers.stdout.enable);
    assert!(!config.loggers.influxdb.enable);
    assert_eq!(config.loggers.influxdb.bucket, "db_dns");
    assert_eq!(config.queue.channel_buffer_size, 512);
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_toml_partial_sections() {
    let config = Config::from_toml(
        r#"
        [global]
        identity = "edge-01"

        [subprocessors.filtering]
        log_queries = false
        drop_rcodes = ["NXDOMAIN", "SERVFAIL"]

        [loggers.stdout]
        mode = "json"

        [loggers.influxdb]
        enable = true
        auth_token = "secret"
        "#,
    )
    .unwrap();

    assert_eq!(config.global.identity, "edge-01");
    assert!(!config.subprocessors.filtering.log_queries);
    assert!(config.subprocessors.filtering.log_replies);
    assert_eq!(
        config.subprocessors.filtering.drop_rcodes,
        vec!["NXDOMAIN".to_string(), "SERVFAIL".to_string()]
    );
    assert_eq!(config.loggers.stdout.mode, OutputMode::Json);
    assert!(config.loggers.influxdb.enable);
    assert_eq!(config.loggers.influxdb.server_url, "http://localhost:8086");
    assert_eq!(config.loggers.influxdb.organization, "dnscollector");
    assert_eq!(config.collectors.udp.listen_port, 6000);
}

#[test]
fn test_parse_error() {
    let err = Config::from_toml("[queue]\nchannel_buffer_size = \"many\"").unwrap_err();

    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_validate_rejects_zero_queue() {
    let mut config = Config::default();
    config.queue.channel_buffer_size = 0;

    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validate_requires_collector_and_logger() {
    let mut config = Config::default();
    config.collectors.udp.enable = false;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

    let mut config = Config::default();
    config.loggers.stdout.enable = false;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validate_influxdb_settings() {
    let mut config = Config::default();
    config.loggers.influxdb.enable = true;
    config.loggers.influxdb.server_url = "  ".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

    config.loggers.influxdb.server_url = "http://influx:8086".to_string();
    config.loggers.influxdb.batch_size = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_load_explicit_path_with_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collector.toml");
    std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

    let config = Config::load(
        path.to_str(),
        CliOverrides {
            log_level: Some("debug".to_string()),
            identity: Some("edge-01".to_string()),
        },
    )
    .unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.global.identity, "edge-01");
}

#[test]
fn test_load_missing_explicit_path() {
    let err = Config::load(Some("/nonexistent/collector.toml"), CliOverrides::default()).unwrap_err();

    assert!(matches!(&err, ConfigError::FileRead { path, .. } if path == "/nonexistent/collector.toml"));
    assert!(err
        .to_string()
        .starts_with("cannot read collector config /nonexistent/collector.toml: "));
}

#[test]
fn test_save_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("collector.toml");

    let err = Config::default().save(path.to_str().unwrap()).unwrap_err();

    assert!(matches!(err, ConfigError::FileWrite { .. }));
    assert!(err.to_string().starts_with("cannot write collector config "));
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");
    let mut config = Config::default();
    config.global.identity = "saved".to_string();
    config.subprocessors.filtering.drop_rcodes = vec!["REFUSED".to_string()];

    config.save(path.to_str().unwrap()).unwrap();
    let reloaded = Config::load(path.to_str(), CliOverrides::default()).unwrap();

    assert_eq!(reloaded.global.identity, "saved");
    assert_eq!(reloaded.subprocessors.filtering.drop_rcodes, vec!["REFUSED".to_string()]);
}
