use base::requests::entities::RetrySettings;
use base::settings::{Settings, DEFAULT_STOREFRONT_API_URL};
use std::collections::HashMap;
use std::path::PathBuf;

fn lookup_from(vars: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
    move |name| vars.get(name).map(|value| value.to_string())
}

#[test]
fn should_use_defaults_when_nothing_is_set() {
    let settings = Settings::from_lookup(lookup_from(HashMap::new())).unwrap();

    assert_eq!(settings.api_url, DEFAULT_STOREFRONT_API_URL);
    assert_eq!(settings.tenant_subdomain, None);
    assert_eq!(settings.retry_settings, RetrySettings::default());
    assert_eq!(settings.target_logger, "storefront");
    assert_eq!(settings.log_file, None);
}

#[test]
fn should_read_all_settings() {
    let settings = Settings::from_lookup(lookup_from(HashMap::from([
        ("STOREFRONT_API_URL", "https://api.example.com/"),
        ("TENANT_SUBDOMAIN", "gym"),
        ("STORAGE_DIR", "/tmp/storefront"),
        ("NUMBER_OF_REQUEST_RETRIES", "5"),
        ("SECONDS_TO_SLEEP_BEFORE_REQUEST_RETRY", " 2 "),
        ("TARGET_LOGGER", "shop"),
        ("LOG_FILE", "shop.log"),
    ])))
    .unwrap();

    assert_eq!(
        settings,
        Settings {
            api_url: String::from("https://api.example.com"),
            tenant_subdomain: Some(String::from("gym")),
            storage_dir: PathBuf::from("/tmp/storefront"),
            retry_settings: RetrySettings {
                number_of_request_retries: 5,
                seconds_to_sleep_before_request_retry: 2,
            },
            target_logger: String::from("shop"),
            log_file: Some(PathBuf::from("shop.log")),
        }
    );
}

#[test]
fn should_treat_blank_values_as_unset() {
    let settings = Settings::from_lookup(lookup_from(HashMap::from([
        ("TENANT_SUBDOMAIN", ""),
        ("NUMBER_OF_REQUEST_RETRIES", "  "),
    ])))
    .unwrap();

    assert_eq!(settings.tenant_subdomain, None);
    assert_eq!(settings.retry_settings, RetrySettings::default());
}

#[test]
fn should_return_error_on_invalid_number() {
    let res = Settings::from_lookup(lookup_from(HashMap::from([(
        "NUMBER_OF_REQUEST_RETRIES",
        "many",
    )])));

    assert!(res.is_err());
}
