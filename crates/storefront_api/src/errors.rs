use chrono::NaiveTime;
use thiserror::Error;

/// Problems with what the customer entered. They are reported back, never fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("the cart is empty")]
    EmptyCart,
    #[error("a date and a time slot have to be selected")]
    MissingBookingSelection,
    #[error("the slot starting at {start_time} has no free spots")]
    SlotIsFull { start_time: NaiveTime },
}
