pub mod api;
pub mod booking;
pub mod checkout;
pub mod entities;
pub mod errors;
pub mod helpers;
pub mod http_storefront_api;

pub use crate::api::{AuthApi, CheckoutApi, StorefrontApi};
pub use crate::checkout::{checkout, complete_redirected_checkout, CheckoutOutcome};
pub use crate::errors::ValidationError;
pub use crate::http_storefront_api::{HttpStorefrontApi, TOKEN_STORAGE_KEY};
