use anyhow::{Context, Result};
use base::requests::api::SyncHttpRequest;
use base::requests::entities::{
    find_status_error, HttpRequestData, HttpRequestMethod, HttpRequestWithRetriesParams,
    RetrySettings, UNAUTHORIZED,
};
use base::requests::http_request_with_retries;
use base::settings::Settings;
use base::storage::LocalStorage;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{AuthApi, CheckoutApi, StorefrontApi};
use crate::entities::{
    AuthResponse, CreateOrderRequest, CreatePaymentRequest, LoginRequest, Order, Payment, Product,
    RegisterRequest, Service, Slot, TenantConfig, User,
};
use crate::helpers::format_date;

pub const TOKEN_STORAGE_KEY: &str = "token";

const TENANT_HEADER: &str = "X-Tenant-Subdomain";
const AUTHORIZATION_HEADER: &str = "Authorization";
const CONTENT_TYPE_HEADER: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Client of the storefront backend. The session token is kept in the same
/// local storage as the cart, so a session survives restarts.
pub struct HttpStorefrontApi<'a, R, S>
where
    R: SyncHttpRequest,
    S: LocalStorage,
{
    api_url: String,
    tenant_subdomain: Option<String>,
    target_logger: String,
    retry_settings: RetrySettings,
    request_api: &'a R,
    storage: &'a S,
}

impl<'a, R, S> HttpStorefrontApi<'a, R, S>
where
    R: SyncHttpRequest,
    S: LocalStorage,
{
    pub fn new(settings: &Settings, request_api: &'a R, storage: &'a S) -> Self {
        Self {
            api_url: settings.api_url.clone(),
            tenant_subdomain: settings.tenant_subdomain.clone(),
            target_logger: settings.target_logger.clone(),
            retry_settings: settings.retry_settings,
            request_api,
            storage,
        }
    }

    fn request_data(&self, method: HttpRequestMethod, path: &str) -> Result<HttpRequestData> {
        let mut req_data = HttpRequestData::new(method, &format!("{}{}", self.api_url, path))
            .with_header(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE);

        if let Some(subdomain) = &self.tenant_subdomain {
            req_data = req_data.with_header(TENANT_HEADER, subdomain);
        }

        let token = self
            .storage
            .get_item(TOKEN_STORAGE_KEY)
            .context("an error occurred on reading the session token")?;

        if let Some(token) = token {
            req_data = req_data.with_header(AUTHORIZATION_HEADER, &format!("Bearer {}", token));
        }

        Ok(req_data)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, req_entity_name: &str) -> Result<T> {
        let req_data = self.request_data(HttpRequestMethod::Get, path)?;
        self.send(req_data, req_entity_name)
    }

    fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        req_entity_name: &str,
    ) -> Result<T> {
        let body = serde_json::to_value(body)
            .context(format!("an error occurred on serializing {}", req_entity_name))?;

        let req_data = self
            .request_data(HttpRequestMethod::Post, path)?
            .with_json_body(body);

        self.send(req_data, req_entity_name)
    }

    fn send<T: DeserializeOwned>(&self, req_data: HttpRequestData, req_entity_name: &str) -> Result<T> {
        // orders and payments must not be created twice
        let number_of_retries = match req_data.method {
            HttpRequestMethod::Get => self.retry_settings.number_of_request_retries,
            HttpRequestMethod::Post => 0,
        };

        let req_params = HttpRequestWithRetriesParams {
            req_entity_name,
            target_logger: &self.target_logger,
            number_of_retries,
            seconds_to_sleep: self.retry_settings.seconds_to_sleep_before_request_retry,
        };

        http_request_with_retries(req_data, req_params, self.request_api).map_err(|e| {
            let is_unauthorized =
                find_status_error(&e).map_or(false, |status| status.code == UNAUTHORIZED);

            if is_unauthorized {
                self.drop_session();
            }

            e
        })
    }

    fn drop_session(&self) {
        log::warn!(
            target: &self.target_logger,
            "unauthorized, the session token may be expired and is removed"
        );

        if let Err(e) = self.storage.remove_item(TOKEN_STORAGE_KEY) {
            log::error!(
                target: &self.target_logger,
                "an error occurred on removing the session token: {:?}",
                e
            );
        }
    }
}

impl<'a, R, S> StorefrontApi for HttpStorefrontApi<'a, R, S>
where
    R: SyncHttpRequest,
    S: LocalStorage,
{
    fn get_current_config(&self) -> Result<TenantConfig> {
        self.get("/api/config/current", "the tenant config")
    }

    fn get_products(&self) -> Result<Vec<Product>> {
        self.get("/api/items/products", "the products")
    }

    fn get_services(&self) -> Result<Vec<Service>> {
        self.get("/api/items/services", "the services")
    }

    fn get_product(&self, id: &str) -> Result<Product> {
        self.get(
            &format!("/api/items/products/{}", id),
            &format!("the product {}", id),
        )
    }

    fn get_service(&self, id: &str) -> Result<Service> {
        self.get(
            &format!("/api/items/services/{}", id),
            &format!("the service {}", id),
        )
    }

    fn get_available_slots(&self, service_id: &str, date: NaiveDate) -> Result<Vec<Slot>> {
        let date = format_date(date);

        let req_data = self
            .request_data(HttpRequestMethod::Get, "/api/bookings/available")?
            .with_query("serviceId", service_id)
            .with_query("date", &date);

        self.send(
            req_data,
            &format!("the available slots of {} on {}", service_id, date),
        )
    }
}

impl<'a, R, S> AuthApi for HttpStorefrontApi<'a, R, S>
where
    R: SyncHttpRequest,
    S: LocalStorage,
{
    fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: AuthResponse = self.post("/api/auth/login", &request, "the login")?;

        self.storage
            .set_item(TOKEN_STORAGE_KEY, &response.token)
            .context("an error occurred on saving the session token")?;

        log::info!(target: &self.target_logger, "logged in as {}", email);

        Ok(response)
    }

    fn register(&self, request: &RegisterRequest) -> Result<User> {
        self.post("/api/auth/register", request, "the registration")
    }

    fn get_current_user(&self) -> Result<User> {
        self.get("/api/auth/me", "the current user")
    }

    fn logout(&self) -> Result<()> {
        self.storage
            .remove_item(TOKEN_STORAGE_KEY)
            .context("an error occurred on removing the session token")
    }

    fn is_logged_in(&self) -> Result<bool> {
        Ok(self.storage.get_item(TOKEN_STORAGE_KEY)?.is_some())
    }
}

impl<'a, R, S> CheckoutApi for HttpStorefrontApi<'a, R, S>
where
    R: SyncHttpRequest,
    S: LocalStorage,
{
    fn create_order(&self, request: &CreateOrderRequest) -> Result<Order> {
        self.post("/api/orders", request, "the order")
    }

    fn create_payment(&self, request: &CreatePaymentRequest) -> Result<Payment> {
        self.post(
            "/api/payments",
            request,
            &format!("the payment of the order {}", request.order_id),
        )
    }
}
