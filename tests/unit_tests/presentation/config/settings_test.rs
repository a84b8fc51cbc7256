use docrelay::application::services::ExecutionMode;
use docrelay::infrastructure::storage::{StoreFactory, StoreFactoryError};
use docrelay::presentation::config::{
    DispatchSettings, EngineKind, Environment, SalesforceSettings, Settings, StoreProvider,
};

const MB: u64 = 1024 * 1024;

#[test]
fn given_no_settings_file_when_loading_then_defaults_apply() {
    let settings = Settings::load(Environment::Test).unwrap();

    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.dispatch.async_threshold_mb, 20);
    assert_eq!(settings.dispatch.request_budget_secs, 25);
    assert_eq!(settings.registry.completed_sweep_secs, 3600);
    assert_eq!(settings.registry.failed_sweep_secs, 600);
    assert_eq!(settings.transform.engine, EngineKind::Ghostscript);
    assert_eq!(settings.transform.base_dpi, 150.0);
    assert!(settings.transform.temp_dir.is_none());
    assert_eq!(settings.stores.provider, StoreProvider::Remote);
}

#[test]
fn given_default_dispatch_settings_when_just_below_threshold_then_runs_inline() {
    let policy = Settings::load(Environment::Test).unwrap().dispatch.policy();

    assert_eq!(policy.decide(Some(17 * MB)), ExecutionMode::Sync);
    assert_eq!(policy.decide(Some(19 * MB)), ExecutionMode::Sync);
    assert_eq!(policy.decide(Some(20 * MB)), ExecutionMode::Async);
}

#[test]
fn given_default_dispatch_settings_when_estimating_threshold_size_then_within_budget() {
    let settings = Settings::load(Environment::Test).unwrap();
    let policy = settings.dispatch.policy();

    let estimate = policy.estimated_duration(policy.async_threshold_bytes());

    assert!(estimate.as_secs() <= settings.dispatch.request_budget_secs);
}

#[test]
fn given_defaults_when_building_sweep_delays_then_hour_and_ten_minutes() {
    let settings = Settings::load(Environment::Test).unwrap();

    let sweep = settings.registry.sweep_delays();

    assert_eq!(sweep.completed.as_secs(), 60 * 60);
    assert_eq!(sweep.failed.as_secs(), 10 * 60);
}

#[test]
fn given_dispatch_settings_when_building_policy_then_threshold_in_bytes() {
    let settings = DispatchSettings {
        async_threshold_mb: 20,
        seconds_per_mb: 1.0,
        request_budget_secs: 25,
    };

    assert_eq!(settings.policy().async_threshold_bytes(), 20 * MB);
}

#[test]
fn given_salesforce_settings_when_debug_formatted_then_secret_is_redacted() {
    let settings = SalesforceSettings {
        instance_url: "https://example.my.salesforce.com".into(),
        client_id: "client".into(),
        client_secret: "very-secret".into(),
        api_version: "v58.0".into(),
        max_payload_mb: 50,
        fetch_timeout_secs: 25,
    };

    let rendered = format!("{settings:?}");

    assert!(!rendered.contains("very-secret"));
    assert_eq!(settings.max_payload_bytes(), 50 * MB);
}

#[test]
fn given_remote_provider_without_credentials_when_creating_stores_then_missing_settings() {
    let mut settings = Settings::load(Environment::Test).unwrap();
    settings.stores.provider = StoreProvider::Remote;
    settings.salesforce = None;

    let result = StoreFactory::create(&settings);

    assert!(matches!(
        result,
        Err(StoreFactoryError::MissingSettings("salesforce"))
    ));
}

#[test]
fn given_mock_provider_when_creating_stores_then_succeeds_without_credentials() {
    let mut settings = Settings::load(Environment::Test).unwrap();
    settings.stores.provider = StoreProvider::Mock;

    assert!(StoreFactory::create(&settings).is_ok());
}
