use anyhow::Result;
use chrono::NaiveDate;

use crate::entities::{
    AuthResponse, CreateOrderRequest, CreatePaymentRequest, Order, Payment, Product,
    RegisterRequest, Service, Slot, TenantConfig, User,
};

/// Public catalog and tenant data; no authentication needed.
pub trait StorefrontApi {
    fn get_current_config(&self) -> Result<TenantConfig>;
    fn get_products(&self) -> Result<Vec<Product>>;
    fn get_services(&self) -> Result<Vec<Service>>;
    fn get_product(&self, id: &str) -> Result<Product>;
    fn get_service(&self, id: &str) -> Result<Service>;
    fn get_available_slots(&self, service_id: &str, date: NaiveDate) -> Result<Vec<Slot>>;
}

pub trait AuthApi {
    /// Logs in and keeps the returned token for the following requests.
    fn login(&self, email: &str, password: &str) -> Result<AuthResponse>;
    fn register(&self, request: &RegisterRequest) -> Result<User>;
    fn get_current_user(&self) -> Result<User>;
    fn logout(&self) -> Result<()>;
    fn is_logged_in(&self) -> Result<bool>;
}

pub trait CheckoutApi {
    fn create_order(&self, request: &CreateOrderRequest) -> Result<Order>;
    fn create_payment(&self, request: &CreatePaymentRequest) -> Result<Payment>;
}
