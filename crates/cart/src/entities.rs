use base::entities::{ItemId, ItemName, ItemType, Price, Quantity, Stock};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type BookingDate = String;
pub type BookingTime = String;

/// One entry of the cart. This is also the persisted form of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: ItemId,
    pub name: ItemName,
    pub price: Price,
    pub quantity: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<Stock>,
    #[serde(default)]
    pub item_type: ItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<BookingDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_time: Option<BookingTime>,
}

impl CartLine {
    pub fn key(&self) -> LineKey {
        LineKey {
            item_id: self.id.clone(),
            booking_date: self.booking_date.clone(),
            booking_time: self.booking_time.clone(),
        }
    }

    pub fn has_key(&self, key: &LineKey) -> bool {
        self.id == key.item_id
            && self.booking_date == key.booking_date
            && self.booking_time == key.booking_time
    }

    /// `price × quantity`, capped at the bounds of `Price`.
    pub fn subtotal(&self) -> Price {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    pub fn checked_subtotal(&self) -> Option<Price> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Identity of a cart line. Bookings of one service on different slots are different lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub item_id: ItemId,
    pub booking_date: Option<BookingDate>,
    pub booking_time: Option<BookingTime>,
}

impl LineKey {
    pub fn item(item_id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            booking_date: None,
            booking_time: None,
        }
    }

    pub fn booking(item_id: &str, date: &str, time: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            booking_date: Some(date.to_string()),
            booking_time: Some(time.to_string()),
        }
    }
}

impl From<&str> for LineKey {
    fn from(item_id: &str) -> Self {
        Self::item(item_id)
    }
}

impl Display for LineKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.item_id)?;

        if let Some(date) = &self.booking_date {
            write!(f, " @ {}", date)?;
        }

        if let Some(time) = &self.booking_time {
            write!(f, " {}", time)?;
        }

        Ok(())
    }
}

/// What a caller passes to add an item to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub id: ItemId,
    pub name: ItemName,
    pub price: Price,
    pub stock: Option<Stock>,
    pub item_type: ItemType,
    pub booking_date: Option<BookingDate>,
    pub booking_time: Option<BookingTime>,
}

impl NewCartItem {
    pub fn product(id: &str, name: &str, price: Price, stock: Option<Stock>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
            stock,
            item_type: ItemType::Product,
            booking_date: None,
            booking_time: None,
        }
    }

    pub fn service(id: &str, name: &str, price: Price) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
            stock: None,
            item_type: ItemType::Service,
            booking_date: None,
            booking_time: None,
        }
    }

    pub fn with_booking(mut self, date: &str, time: &str) -> Self {
        self.booking_date = Some(date.to_string());
        self.booking_time = Some(time.to_string());
        self
    }

    pub fn key(&self) -> LineKey {
        LineKey {
            item_id: self.id.clone(),
            booking_date: self.booking_date.clone(),
            booking_time: self.booking_time.clone(),
        }
    }

    pub(crate) fn into_line(self, quantity: Quantity) -> CartLine {
        CartLine {
            id: self.id,
            name: self.name,
            price: self.price,
            quantity,
            stock: self.stock,
            item_type: self.item_type,
            booking_date: self.booking_date,
            booking_time: self.booking_time,
        }
    }
}

pub type RequestedQuantity = u64;

/// Returned when a requested quantity was capped to the available stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockWarning {
    pub key: LineKey,
    pub name: ItemName,
    pub stock: Stock,
    pub requested: RequestedQuantity,
}

impl Display for StockWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "insufficient stock for {}: stock {}, requested {}",
            self.name, self.stock, self.requested
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn should_deserialize_lines_saved_with_whole_catalog_items() {
        let json = r#"[
            {"id": "p1", "name": "Protein", "price": 25.5, "quantity": 2, "stock": 4,
             "itemType": "PRODUCT", "description": "whey", "imageUrl": "/p1.png", "active": true},
            {"id": "s1", "name": "Yoga", "price": "10", "quantity": 1, "stock": null,
             "itemType": "SERVICE", "bookingDate": "2024-11-15", "bookingTime": "14:00"}
        ]"#;

        let lines: Vec<CartLine> = serde_json::from_str(json).unwrap();

        assert_eq!(lines[0].price, dec!(25.5));
        assert_eq!(lines[0].stock, Some(4));
        assert_eq!(lines[1].stock, None);
        assert_eq!(lines[1].key(), LineKey::booking("s1", "2024-11-15", "14:00"));
    }

    #[test]
    fn should_default_missing_item_type_to_product() {
        let lines: Vec<CartLine> =
            serde_json::from_str(r#"[{"id": "1", "name": "Mat", "price": 3, "quantity": 1}]"#)
                .unwrap();

        assert_eq!(lines[0].item_type, ItemType::Product);
        assert_eq!(lines[0].key(), LineKey::from("1"));
    }

    #[test]
    fn should_compute_subtotal() {
        let line = NewCartItem::product("1", "Mat", dec!(12.5), None).into_line(3);

        assert_eq!(line.subtotal(), dec!(37.5));
    }
}
