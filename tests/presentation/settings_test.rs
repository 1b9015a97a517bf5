use batchdash::application::services::AverageBasis;
use batchdash::presentation::{Environment, Settings};

#[test]
fn given_environment_names_when_parsing_then_accepts_aliases() {
    assert_eq!(
        Environment::try_from("production".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(
        Environment::try_from(" Dev ".to_string()),
        Ok(Environment::Local)
    );
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_environment_when_naming_settings_file_then_uses_env_suffix() {
    assert_eq!(Environment::Test.settings_file(), "appsettings.test");
}

#[test]
fn given_default_settings_when_reading_then_match_dashboard_defaults() {
    let settings = Settings::default();

    assert_eq!(settings.server.socket_addr().unwrap().port(), 3000);
    assert_eq!(settings.polling.logs_interval().as_secs(), 10);
    assert_eq!(settings.polling.jobs_refresh_interval().as_secs(), 5);
    assert_eq!(settings.stats.average_basis, AverageBasis::InstanceSeconds);
    assert_eq!(settings.upstream.timeout().as_secs(), 30);
}

#[test]
fn given_unparseable_host_when_building_address_then_returns_error() {
    let mut settings = Settings::default();
    settings.server.host = "not an address".to_string();

    assert!(settings.server.socket_addr().is_err());
}

#[test]
fn given_no_settings_file_when_loading_then_falls_back_to_defaults() {
    let settings = Settings::load(Environment::Test).unwrap();

    assert_eq!(settings.polling.logs_interval_seconds, 10);
}
