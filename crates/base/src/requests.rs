use crate::requests::api::SyncHttpRequest;
use crate::requests::entities::{find_status_error, HttpRequestData, HttpRequestWithRetriesParams};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::{thread, time};

pub mod api;
pub mod entities;
pub mod ureq;

/// Sends the request, retrying failures up to `number_of_retries` times,
/// and deserializes the response body. Client errors (4xx) are returned
/// right away since repeating the same request will not change the answer.
pub fn http_request_with_retries<T: DeserializeOwned>(
    req_data: HttpRequestData,
    req_params: HttpRequestWithRetriesParams,
    request_api: &impl SyncHttpRequest,
) -> Result<T> {
    let mut current_request_try = 1;

    loop {
        let response = request_api.call(req_data.clone());

        match response {
            Ok(body) => {
                return serde_json::from_str(&body).context(format!(
                    "an error occurred on deserializing {}",
                    req_params.req_entity_name
                ));
            }
            Err(e) => {
                log::error!(
                    target: req_params.target_logger,
                    "an error occurred on a {} try to request {}: {:?}",
                    current_request_try, req_params.req_entity_name, e
                );

                let is_client_error =
                    find_status_error(&e).map_or(false, |status| status.is_client_error());

                if is_client_error {
                    return Err(e.context(format!(
                        "the request of {} was rejected",
                        req_params.req_entity_name
                    )));
                }

                if current_request_try <= req_params.number_of_retries {
                    thread::sleep(time::Duration::from_secs(
                        req_params.seconds_to_sleep as u64,
                    ));

                    current_request_try += 1;
                    continue;
                } else {
                    return Err(e.context(format!(
                        "an error occurred after {} retries on requesting {}",
                        req_params.number_of_retries, req_params.req_entity_name
                    )));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::entities::HttpStatusError;
    use anyhow::bail;
    use serde::Deserialize;
    use std::cell::RefCell;

    #[derive(Default)]
    struct HttpErrorRequest {
        number_of_requests: RefCell<u32>,
    }

    impl SyncHttpRequest for HttpErrorRequest {
        fn call(&self, _req: HttpRequestData) -> Result<String> {
            *self.number_of_requests.borrow_mut() += 1;
            bail!("error")
        }
    }

    struct HttpStatusErrorRequest {
        code: u16,
        number_of_requests: RefCell<u32>,
    }

    impl SyncHttpRequest for HttpStatusErrorRequest {
        fn call(&self, req: HttpRequestData) -> Result<String> {
            *self.number_of_requests.borrow_mut() += 1;
            Err(HttpStatusError {
                url: req.url,
                code: self.code,
                body: String::from(r#"{"message":"rejected"}"#),
            }
            .into())
        }
    }

    #[derive(Default)]
    struct HttpSuccessfulRequest {
        number_of_requests: RefCell<u32>,
    }

    impl SyncHttpRequest for HttpSuccessfulRequest {
        fn call(&self, _req: HttpRequestData) -> Result<String> {
            *self.number_of_requests.borrow_mut() += 1;
            Ok(String::from(r#"{"name":"success"}"#))
        }
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Named {
        name: String,
    }

    #[test]
    fn should_return_an_error_after_request_retries() {
        let number_of_retries = 3;

        let http_request: HttpErrorRequest = Default::default();

        let res: Result<Named> = http_request_with_retries(
            Default::default(),
            HttpRequestWithRetriesParams {
                number_of_retries,
                seconds_to_sleep: 0,
                ..Default::default()
            },
            &http_request,
        );

        assert!(
            res.is_err(),
            "the request should be completed with an error"
        );

        let expected_number_of_requests = number_of_retries + 1;
        assert_eq!(
            *http_request.number_of_requests.borrow(),
            expected_number_of_requests
        );
    }

    #[test]
    fn should_not_retry_client_errors() {
        let http_request = HttpStatusErrorRequest {
            code: 404,
            number_of_requests: RefCell::new(0),
        };

        let res: Result<Named> = http_request_with_retries(
            HttpRequestData {
                url: String::from("http://localhost/api/items/products/1"),
                ..Default::default()
            },
            HttpRequestWithRetriesParams {
                number_of_retries: 3,
                seconds_to_sleep: 0,
                ..Default::default()
            },
            &http_request,
        );

        let error = res.unwrap_err();
        assert_eq!(find_status_error(&error).unwrap().code, 404);
        assert_eq!(*http_request.number_of_requests.borrow(), 1);
    }

    #[test]
    fn should_retry_server_errors() {
        let http_request = HttpStatusErrorRequest {
            code: 503,
            number_of_requests: RefCell::new(0),
        };

        let res: Result<Named> = http_request_with_retries(
            Default::default(),
            HttpRequestWithRetriesParams {
                number_of_retries: 2,
                seconds_to_sleep: 0,
                ..Default::default()
            },
            &http_request,
        );

        assert_eq!(find_status_error(&res.unwrap_err()).unwrap().code, 503);
        assert_eq!(*http_request.number_of_requests.borrow(), 3);
    }

    #[test]
    fn should_successfully_request_item() {
        let http_request: HttpSuccessfulRequest = Default::default();

        let res: Result<Named> =
            http_request_with_retries(Default::default(), Default::default(), &http_request);

        assert_eq!(*http_request.number_of_requests.borrow(), 1);
        assert_eq!(
            res.unwrap(),
            Named {
                name: String::from("success")
            }
        );
    }

    #[test]
    fn should_return_an_error_on_unexpected_response_body() {
        struct HtmlRequest;

        impl SyncHttpRequest for HtmlRequest {
            fn call(&self, _req: HttpRequestData) -> Result<String> {
                Ok(String::from("<html></html>"))
            }
        }

        let res: Result<Named> =
            http_request_with_retries(Default::default(), Default::default(), &HtmlRequest);

        assert!(res.is_err());
    }
}
