use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum HttpRequestMethod {
    #[default]
    Get,
    Post,
}

pub type Headers = HashMap<String, String>;
pub type Queries = HashMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct HttpRequestData {
    pub method: HttpRequestMethod,
    pub url: String,
    pub headers: Option<Headers>,
    pub queries: Option<Queries>,
    pub body: Option<Value>,
}

impl HttpRequestData {
    pub fn new(method: HttpRequestMethod, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .get_or_insert_with(Default::default)
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_query(mut self, name: &str, value: &str) -> Self {
        self.queries
            .get_or_insert_with(Default::default)
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()
            .and_then(|headers| headers.get(name))
            .map(String::as_str)
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.queries
            .as_ref()
            .and_then(|queries| queries.get(name))
            .map(String::as_str)
    }
}

pub type StatusCode = u16;

pub const UNAUTHORIZED: StatusCode = 401;

#[derive(Debug, Error)]
#[error("request to {url} failed with a code {code}: {body}")]
pub struct HttpStatusError {
    pub url: String,
    pub code: StatusCode,
    pub body: String,
}

impl HttpStatusError {
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.code)
    }
}

/// Finds an `HttpStatusError` anywhere in the error chain.
pub fn find_status_error(error: &anyhow::Error) -> Option<&HttpStatusError> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<HttpStatusError>())
}

pub type NumberOfRetries = u32;
pub type SecondsToSleep = u32;

pub const DEFAULT_NUMBER_OF_REQUEST_RETRIES: NumberOfRetries = 3;
pub const DEFAULT_NUMBER_OF_SECONDS_TO_SLEEP_BEFORE_REQUEST_RETRY: SecondsToSleep = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySettings {
    pub number_of_request_retries: NumberOfRetries,
    pub seconds_to_sleep_before_request_retry: SecondsToSleep,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            number_of_request_retries: DEFAULT_NUMBER_OF_REQUEST_RETRIES,
            seconds_to_sleep_before_request_retry:
                DEFAULT_NUMBER_OF_SECONDS_TO_SLEEP_BEFORE_REQUEST_RETRY,
        }
    }
}

#[derive(Default)]
pub struct HttpRequestWithRetriesParams<'a> {
    pub req_entity_name: &'a str,
    pub target_logger: &'a str,
    pub number_of_retries: NumberOfRetries,
    pub seconds_to_sleep: SecondsToSleep,
}
