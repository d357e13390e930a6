use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub type ItemId = String;
pub type ItemName = String;
pub type Price = Decimal;
pub type Quantity = u32;
pub type Stock = u32;

pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

pub const TARGET_LOGGER_ENV: &str = "TARGET_LOGGER";
pub const DEFAULT_TARGET_LOGGER: &str = "storefront";

/// Kind of a catalog item. Only products carry stock.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    #[default]
    Product,
    Service,
}

impl FromStr for ItemType {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "PRODUCT" => Ok(Self::Product),
            "SERVICE" => Ok(Self::Service),
            _ => anyhow::bail!("invalid item type: {}", input),
        }
    }
}

impl Display for ItemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            ItemType::Product => write!(f, "PRODUCT"),
            ItemType::Service => write!(f, "SERVICE"),
        }
    }
}
