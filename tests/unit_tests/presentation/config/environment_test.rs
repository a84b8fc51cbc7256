use docrelay::presentation::config::Environment;

#[test]
fn given_production_alias_when_parsing_then_prod() {
    assert_eq!(
        Environment::try_from("Production".to_string()),
        Ok(Environment::Prod)
    );
}

#[test]
fn given_unknown_name_when_parsing_then_error() {
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_environment_when_displayed_then_matches_settings_file_suffix() {
    assert_eq!(Environment::Local.to_string(), "local");
    assert_eq!(Environment::Prod.as_str(), "prod");
}
