use anyhow::Result;
use base::helpers::non_empty;
use base::notifier::{NotificationLevel, Notifier};
use base::requests::entities::find_status_error;
use base::storage::LocalStorage;
use cart::CartStore;
use serde_json::Value;

use crate::api::CheckoutApi;
use crate::entities::{
    CreateOrderRequest, CreatePaymentRequest, Order, Payment, PaymentLink, PaymentMethod,
};
use crate::errors::ValidationError;

const DEFAULT_CHECKOUT_ERROR_MESSAGE: &str = "an error occurred on processing the payment";

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// The order is placed and the cart is cleared.
    Completed { order: Order, payment: Payment },
    /// The customer has to finish paying on the provider's page. The cart is
    /// kept until [`complete_redirected_checkout`] is called.
    RedirectToPayment {
        order: Order,
        payment: Payment,
        payment_link: PaymentLink,
    },
}

/// Places an order for everything in the cart and starts its payment.
pub fn checkout<S, A, N>(
    cart: &mut CartStore<'_, S>,
    api: &A,
    notifier: &N,
    payment_method: PaymentMethod,
    notes: Option<String>,
) -> Result<CheckoutOutcome>
where
    S: LocalStorage,
    A: CheckoutApi,
    N: Notifier,
{
    if cart.is_empty() {
        let error = ValidationError::EmptyCart;
        let message = error.to_string();

        return Err(with_notification(notifier, error.into(), &message));
    }

    let order_request =
        CreateOrderRequest::from_cart_lines(cart.lines(), payment_method, non_empty(notes));

    let order = match api.create_order(&order_request) {
        Ok(order) => order,
        Err(e) => return Err(report_failure(notifier, e, "creating the order")),
    };

    let payment_request = CreatePaymentRequest {
        order_id: order.id.clone(),
        method: payment_method,
    };

    let payment = match api.create_payment(&payment_request) {
        Ok(payment) => payment,
        Err(e) => {
            return Err(report_failure(
                notifier,
                e,
                &format!("creating the payment of the order {}", order.id),
            ))
        }
    };

    let payment_link = non_empty(payment.payment_link.clone());

    match (payment_method, payment_link) {
        (PaymentMethod::MercadoPago, Some(payment_link)) => Ok(CheckoutOutcome::RedirectToPayment {
            order,
            payment,
            payment_link,
        }),
        _ => {
            cart.clear_cart()?;
            notifier.send_message(
                NotificationLevel::Success,
                &format!("the order {} was created successfully", order.id),
            )?;

            Ok(CheckoutOutcome::Completed { order, payment })
        }
    }
}

/// Called when the customer comes back from a successful external payment.
pub fn complete_redirected_checkout<S: LocalStorage>(cart: &mut CartStore<'_, S>) -> Result<()> {
    cart.clear_cart()
}

fn report_failure<N: Notifier>(notifier: &N, error: anyhow::Error, action: &str) -> anyhow::Error {
    let message = backend_message(&error)
        .unwrap_or_else(|| String::from(DEFAULT_CHECKOUT_ERROR_MESSAGE));

    let error = error.context(format!("an error occurred on {}", action));

    with_notification(notifier, error, &message)
}

/// Reports the error message to the customer; a failed report is attached to the error.
fn with_notification<N: Notifier>(notifier: &N, error: anyhow::Error, message: &str) -> anyhow::Error {
    match notifier.send_message(NotificationLevel::Error, message) {
        Ok(()) => error,
        Err(notify_error) => error.context(format!(
            "the failure couldn't be reported to the customer: {}",
            notify_error
        )),
    }
}

/// The backend explains rejections in a `message` or `error` field.
fn backend_message(error: &anyhow::Error) -> Option<String> {
    let status = find_status_error(error)?;
    let body: Value = serde_json::from_str(&status.body).ok()?;

    ["message", "error"]
        .iter()
        .find_map(|field| body.get(*field).and_then(Value::as_str))
        .map(String::from)
}
