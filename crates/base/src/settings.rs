use anyhow::{Context, Result};
use std::path::PathBuf;
use std::str::FromStr;

use crate::entities::{DEFAULT_TARGET_LOGGER, TARGET_LOGGER_ENV};
use crate::helpers::non_empty;
use crate::requests::entities::RetrySettings;

pub const STOREFRONT_API_URL_ENV: &str = "STOREFRONT_API_URL";
pub const TENANT_SUBDOMAIN_ENV: &str = "TENANT_SUBDOMAIN";
pub const STORAGE_DIR_ENV: &str = "STORAGE_DIR";
pub const NUMBER_OF_REQUEST_RETRIES_ENV: &str = "NUMBER_OF_REQUEST_RETRIES";
pub const SECONDS_TO_SLEEP_BEFORE_REQUEST_RETRY_ENV: &str =
    "SECONDS_TO_SLEEP_BEFORE_REQUEST_RETRY";
pub const LOG_FILE_ENV: &str = "LOG_FILE";

pub const DEFAULT_STOREFRONT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_STORAGE_DIR: &str = ".storefront";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub tenant_subdomain: Option<String>,
    pub storage_dir: PathBuf,
    pub retry_settings: RetrySettings,
    pub target_logger: String,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Reads the settings from the process environment, loading `.env` first if it exists.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| dotenv::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RetrySettings::default();

        Ok(Self {
            api_url: non_empty(lookup(STOREFRONT_API_URL_ENV))
                .unwrap_or_else(|| DEFAULT_STOREFRONT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            tenant_subdomain: non_empty(lookup(TENANT_SUBDOMAIN_ENV)),
            storage_dir: non_empty(lookup(STORAGE_DIR_ENV))
                .unwrap_or_else(|| DEFAULT_STORAGE_DIR.to_string())
                .into(),
            retry_settings: RetrySettings {
                number_of_request_retries: parse_or(
                    &lookup,
                    NUMBER_OF_REQUEST_RETRIES_ENV,
                    defaults.number_of_request_retries,
                )?,
                seconds_to_sleep_before_request_retry: parse_or(
                    &lookup,
                    SECONDS_TO_SLEEP_BEFORE_REQUEST_RETRY_ENV,
                    defaults.seconds_to_sleep_before_request_retry,
                )?,
            },
            target_logger: non_empty(lookup(TARGET_LOGGER_ENV))
                .unwrap_or_else(|| DEFAULT_TARGET_LOGGER.to_string()),
            log_file: non_empty(lookup(LOG_FILE_ENV)).map(PathBuf::from),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty(lookup(name)) {
        Some(value) => value
            .trim()
            .parse()
            .context(format!("invalid value of {}: {}", name, value)),
        None => Ok(default),
    }
}
