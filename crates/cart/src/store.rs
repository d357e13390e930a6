use std::collections::HashSet;

use anyhow::{Context, Result};
use base::entities::{Price, Quantity, Stock};
use base::storage::LocalStorage;

use crate::entities::{CartLine, LineKey, NewCartItem, RequestedQuantity, StockWarning};


pub const CART_STORAGE_KEY: &str = "cart";

pub type TotalItems = u64;

/// The in-progress order before checkout.
///
/// Lines live in memory and every mutation writes the whole snapshot to the
/// storage under [`CART_STORAGE_KEY`]. The last writer wins when several
/// sessions share one storage; [`CartStore::reload`] picks up their writes.
pub struct CartStore<'a, S: LocalStorage> {
    lines: Vec<CartLine>,
    storage: &'a S,
    target_logger: String,
    // lines differ from the persisted snapshot
    dirty: bool,
}

impl<'a, S: LocalStorage> CartStore<'a, S> {
    /// Rehydrates the cart from the storage. Never fails: an unreadable or
    /// malformed snapshot gives an empty cart.
    pub fn init(storage: &'a S, target_logger: &str) -> Self {
        let mut store = Self {
            lines: Vec::new(),
            storage,
            target_logger: target_logger.to_string(),
            dirty: false,
        };

        store.lines = store.load_lines();

        log::debug!(
            target: &store.target_logger,
            "the cart is initialized with {} lines",
            store.lines.len()
        );

        store
    }

    /// Flushes changes that haven't reached the storage yet and gives the
    /// storage back. A purged cart stays purged.
    pub fn teardown(mut self) -> Result<()> {
        if self.dirty {
            self.persist()?;
        }

        Ok(())
    }

    /// Replaces the in-memory cart with the persisted snapshot.
    pub fn reload(&mut self) {
        self.lines = self.load_lines();
        self.dirty = false;
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.has_key(key))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn add_one_to_cart(&mut self, item: NewCartItem) -> Result<Option<StockWarning>> {
        self.add_to_cart(item, 1)
    }

    /// Adds `quantity` of the item, merging into the line with the same key.
    /// The resulting quantity is capped at the item's stock; a warning is
    /// returned when that happens.
    pub fn add_to_cart(
        &mut self,
        item: NewCartItem,
        quantity: Quantity,
    ) -> Result<Option<StockWarning>> {
        if quantity == 0 {
            log::warn!(
                target: &self.target_logger,
                "adding zero items of {} is ignored",
                item.id
            );
            return Ok(None);
        }

        let key = item.key();
        let position = self.lines.iter().position(|line| line.has_key(&key));

        let current_quantity = position
            .and_then(|i| self.lines.get(i))
            .map_or(0, |line| line.quantity);
        let requested = RequestedQuantity::from(current_quantity) + RequestedQuantity::from(quantity);

        let (new_quantity, warning) = self.clamp_to_stock(&key, &item.name, item.stock, requested);

        match position {
            Some(i) if new_quantity == 0 => {
                self.lines.remove(i);
            }
            Some(i) => {
                if let Some(line) = self.lines.get_mut(i) {
                    line.name = item.name;
                    line.price = item.price;
                    line.stock = item.stock;
                    line.quantity = new_quantity;
                }
            }
            None if new_quantity == 0 => {}
            None => self.lines.push(item.into_line(new_quantity)),
        }

        self.persist()?;

        Ok(warning)
    }

    /// Removes the line; an absent key is not an error.
    pub fn remove_from_cart(&mut self, key: &LineKey) -> Result<()> {
        let number_of_lines = self.lines.len();
        self.lines.retain(|line| !line.has_key(key));

        if self.lines.len() != number_of_lines {
            self.persist()?;
        }

        Ok(())
    }

    /// Sets the quantity of the line, capped at its stock. A quantity of zero
    /// or below removes the line.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> Result<Option<StockWarning>> {
        if quantity <= 0 {
            self.remove_from_cart(key)?;
            return Ok(None);
        }

        let (name, stock) = match self.line(key) {
            Some(line) => (line.name.clone(), line.stock),
            None => return Ok(None),
        };

        let requested = quantity.unsigned_abs();
        let (new_quantity, warning) = self.clamp_to_stock(key, &name, stock, requested);

        if new_quantity == 0 {
            self.lines.retain(|line| !line.has_key(key));
        } else if let Some(line) = self.lines.iter_mut().find(|line| line.has_key(key)) {
            line.quantity = new_quantity;
        }

        self.persist()?;

        Ok(warning)
    }

    /// Empties the cart and purges the persisted snapshot.
    pub fn clear_cart(&mut self) -> Result<()> {
        self.lines.clear();
        self.dirty = true;

        self.storage
            .remove_item(CART_STORAGE_KEY)
            .context("an error occurred on purging the persisted cart")?;

        self.dirty = false;

        Ok(())
    }

    /// Σ(price × quantity) over all lines. A total beyond the range of
    /// `Price` is capped at its bounds.
    pub fn total(&self) -> Price {
        let total = self.lines.iter().try_fold(Price::ZERO, |total, line| {
            line.checked_subtotal()
                .and_then(|subtotal| total.checked_add(subtotal))
        });

        match total {
            Some(total) => total,
            None => {
                log::warn!(
                    target: &self.target_logger,
                    "the cart total overflows and is capped"
                );

                self.lines
                    .iter()
                    .map(CartLine::subtotal)
                    .fold(Price::ZERO, Price::saturating_add)
            }
        }
    }

    /// Σ(quantity) over all lines.
    pub fn total_items(&self) -> TotalItems {
        self.lines
            .iter()
            .map(|line| TotalItems::from(line.quantity))
            .sum()
    }

    fn clamp_to_stock(
        &self,
        key: &LineKey,
        name: &str,
        stock: Option<Stock>,
        requested: RequestedQuantity,
    ) -> (Quantity, Option<StockWarning>) {
        match stock {
            Some(stock) if requested > RequestedQuantity::from(stock) => {
                let warning = StockWarning {
                    key: key.clone(),
                    name: name.to_string(),
                    stock,
                    requested,
                };

                log::warn!(target: &self.target_logger, "{}", warning);

                (stock, Some(warning))
            }
            _ => (
                Quantity::try_from(requested).unwrap_or(Quantity::MAX),
                None,
            ),
        }
    }

    fn persist(&mut self) -> Result<()> {
        self.dirty = true;

        let snapshot = serde_json::to_string(&self.lines)
            .context("an error occurred on serializing the cart")?;

        self.storage
            .set_item(CART_STORAGE_KEY, &snapshot)
            .context("an error occurred on persisting the cart")?;

        self.dirty = false;

        Ok(())
    }

    fn load_lines(&self) -> Vec<CartLine> {
        let snapshot = match self.storage.get_item(CART_STORAGE_KEY) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!(
                    target: &self.target_logger,
                    "the persisted cart can't be read, starting with an empty cart: {:?}",
                    e
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<CartLine>>(&snapshot) {
            Ok(lines) => self.normalize(lines),
            Err(e) => {
                log::warn!(
                    target: &self.target_logger,
                    "the persisted cart is malformed, starting with an empty cart: {}",
                    e
                );
                Vec::new()
            }
        }
    }

    /// Restores the line invariants on a snapshot that may have been written
    /// by someone else: unique keys, quantity ≥ 1, quantity ≤ stock.
    fn normalize(&self, lines: Vec<CartLine>) -> Vec<CartLine> {
        let number_of_lines = lines.len();
        let mut keys = HashSet::new();

        let normalized: Vec<CartLine> = lines
            .into_iter()
            .filter(|line| keys.insert(line.key()))
            .filter_map(|mut line| {
                if let Some(stock) = line.stock {
                    line.quantity = line.quantity.min(stock);
                }

                (line.quantity > 0).then(|| line)
            })
            .collect();

        if normalized.len() != number_of_lines {
            log::warn!(
                target: &self.target_logger,
                "{} invalid lines were dropped from the persisted cart",
                number_of_lines - normalized.len()
            );
        }

        normalized
    }
}
