use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use base::entities::{ItemId, ItemName, ItemType, Price, Quantity, Stock};
use cart::{CartLine, NewCartItem};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::helpers::{format_date, format_time, null_as_default, optional_slot_time, slot_time};

pub type Email = String;
pub type AuthToken = String;
pub type OrderId = String;
pub type PaymentId = String;
pub type PaymentLink = String;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingConfig {
    pub logo: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: HashMap<String, Value>,
}

impl BrandingConfig {
    pub fn is_feature_enabled(&self, feature: &str) -> bool {
        matches!(self.features.get(feature), Some(Value::Bool(true)))
    }
}

/// Branding and feature flags of the tenant the storefront is served for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantConfig {
    pub id: Option<String>,
    pub subdomain: String,
    pub business_name: String,
    #[serde(rename = "type")]
    pub business_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: BrandingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ItemId,
    pub name: ItemName,
    pub description: Option<String>,
    pub price: Price,
    pub category: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub active: bool,
    pub stock: Option<Stock>,
    pub sku: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
}

impl Product {
    pub fn to_cart_item(&self) -> NewCartItem {
        NewCartItem::product(&self.id, &self.name, self.price, self.stock)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: ItemId,
    pub name: ItemName,
    pub description: Option<String>,
    pub price: Price,
    pub category: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub active: bool,
    pub duration_minutes: Option<u32>,
    pub schedule_type: Option<String>,
    pub max_capacity: Option<u32>,
    #[serde(default)]
    pub requires_booking: bool,
    /// Weekday names such as `MONDAY`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub available_days: Vec<String>,
}

impl Service {
    pub fn to_cart_item(&self) -> NewCartItem {
        NewCartItem::service(&self.id, &self.name, self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub tenant_id: Option<String>,
    pub tenant_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Email,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: Email,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: AuthToken,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    MercadoPago,
    BankTransfer,
    Cash,
}

impl FromStr for PaymentMethod {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_uppercase().replace('-', "_").as_str() {
            "MERCADO_PAGO" => Ok(Self::MercadoPago),
            "BANK_TRANSFER" => Ok(Self::BankTransfer),
            "CASH" => Ok(Self::Cash),
            _ => anyhow::bail!("invalid payment method: {}", input),
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            PaymentMethod::MercadoPago => write!(f, "MERCADO_PAGO"),
            PaymentMethod::BankTransfer => write!(f, "BANK_TRANSFER"),
            PaymentMethod::Cash => write!(f, "CASH"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub item_id: ItemId,
    pub quantity: Quantity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_time: Option<String>,
}

impl From<&CartLine> for OrderItemRequest {
    fn from(line: &CartLine) -> Self {
        Self {
            item_id: line.id.clone(),
            quantity: line.quantity,
            booking_date: line.booking_date.clone(),
            booking_time: line.booking_time.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateOrderRequest {
    pub fn from_cart_lines(
        lines: &[CartLine],
        payment_method: PaymentMethod,
        notes: Option<String>,
    ) -> Self {
        Self {
            items: lines.iter().map(OrderItemRequest::from).collect(),
            payment_method,
            notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Option<String>,
    pub item_id: ItemId,
    pub item_name: Option<ItemName>,
    pub item_type: Option<ItemType>,
    pub quantity: Quantity,
    pub price_at_purchase: Option<Price>,
    pub subtotal: Option<Price>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub tenant_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<OrderItem>,
    pub total: Option<Price>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub order_id: OrderId,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub method: Option<String>,
    pub status: Option<String>,
    pub amount: Option<Price>,
    pub external_id: Option<String>,
    pub payment_link: Option<PaymentLink>,
    pub receipt_url: Option<String>,
    pub receipt_notes: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub confirmed_at: Option<NaiveDateTime>,
}

pub type Spots = i32;

/// A bookable time interval of a service on some date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(with = "slot_time")]
    pub start_time: NaiveTime,
    #[serde(default, with = "optional_slot_time")]
    pub end_time: Option<NaiveTime>,
    pub date: Option<NaiveDate>,
    pub available_spots: Spots,
    pub total_capacity: Spots,
}

impl Slot {
    pub fn is_available(&self) -> bool {
        self.available_spots > 0
    }
}

/// A date and start time picked for a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingSelection {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl BookingSelection {
    pub fn date_str(&self) -> String {
        format_date(self.date)
    }

    pub fn time_str(&self) -> String {
        format_time(self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn should_deserialize_tenant_config_with_nulls() {
        let json = r##"{
            "id": "t1",
            "subdomain": "gym",
            "businessName": "Iron Gym",
            "type": "GYM",
            "config": {
                "logo": null,
                "primaryColor": "#111111",
                "secondaryColor": null,
                "categories": null,
                "features": {"booking": true, "delivery": false}
            }
        }"##;

        let config: TenantConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.business_type.as_deref(), Some("GYM"));
        assert!(config.config.categories.is_empty());
        assert!(config.config.is_feature_enabled("booking"));
        assert!(!config.config.is_feature_enabled("delivery"));
        assert!(!config.config.is_feature_enabled("shipping"));
    }

    #[test]
    fn should_deserialize_product_and_build_cart_item() {
        let json = r#"{
            "id": "p1", "name": "Protein", "description": "whey", "price": 25.5,
            "category": "supplements", "imageUrl": null, "active": true,
            "itemType": "PRODUCT", "createdAt": "2024-11-01T10:00:00", "stock": 4,
            "sku": "PRT-1", "type": "PHYSICAL"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        let item = product.to_cart_item();

        assert_eq!(item.price, dec!(25.5));
        assert_eq!(item.stock, Some(4));
        assert_eq!(item.item_type, ItemType::Product);
    }

    #[test]
    fn should_deserialize_slots_with_short_and_long_times() {
        let json = r#"[
            {"startTime": "09:00:00", "endTime": "10:00:00", "date": "2024-11-15",
             "availableSpots": 3, "totalCapacity": 5},
            {"startTime": "10:00", "availableSpots": 0, "totalCapacity": 5}
        ]"#;

        let slots: Vec<Slot> = serde_json::from_str(json).unwrap();

        assert_eq!(slots[0].start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(slots[0].end_time, NaiveTime::from_hms_opt(10, 0, 0));
        assert!(slots[0].is_available());
        assert_eq!(slots[1].end_time, None);
        assert!(!slots[1].is_available());
    }

    #[test]
    fn should_serialize_order_request_the_way_the_backend_expects() {
        let lines = vec![
            NewCartItem::product("p1", "Protein", dec!(25.5), Some(4)),
            NewCartItem::service("s1", "Yoga", dec!(15)).with_booking("2024-11-15", "14:00"),
        ]
        .into_iter()
        .map(|item| CartLine {
            id: item.id,
            name: item.name,
            price: item.price,
            quantity: 2,
            stock: item.stock,
            item_type: item.item_type,
            booking_date: item.booking_date,
            booking_time: item.booking_time,
        })
        .collect::<Vec<_>>();

        let request = CreateOrderRequest::from_cart_lines(&lines, PaymentMethod::MercadoPago, None);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "items": [
                    {"itemId": "p1", "quantity": 2},
                    {"itemId": "s1", "quantity": 2, "bookingDate": "2024-11-15", "bookingTime": "14:00"}
                ],
                "paymentMethod": "MERCADO_PAGO"
            })
        );
    }

    #[test]
    fn should_parse_payment_method() {
        assert_eq!(
            "mercado-pago".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::MercadoPago
        );
        assert_eq!(
            "BANK_TRANSFER".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::BankTransfer
        );
        assert!("card".parse::<PaymentMethod>().is_err());
    }
}
