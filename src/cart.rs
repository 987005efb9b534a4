/// The cauldron: client-side shopping cart state.
///
/// A reactive list of product lines keyed by product id. Every mutation goes
/// through the signal, so any view reading the cauldron re-renders, and the
/// whole cart is mirrored to localStorage so a reload keeps the brew.
use crate::currency::{self, Currency};
use crate::models::product::Product;
use leptos::logging::log;
use leptos::*;
use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "cauldronware.cauldron";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CauldronLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: String, // Display price as it came from the catalog
    pub quantity: u32,
}

/// Shared cart handle. Copy-cheap, hand it to any component.
#[derive(Clone, Copy)]
pub struct Cauldron {
    lines: RwSignal<Vec<CauldronLine>>,
}

impl Cauldron {
    /// Creates the cauldron, restoring whatever a previous session stored.
    pub fn new() -> Self {
        let cauldron = Self {
            lines: create_rw_signal(load_lines()),
        };
        log!(
            "[CAULDRON] Restored {} lines from storage",
            cauldron.lines.get_untracked().len()
        );
        cauldron
    }

    /// Reactive read of the current lines.
    pub fn lines(&self) -> Vec<CauldronLine> {
        self.lines.get()
    }

    /// Drops a product into the cauldron, bumping the quantity when it is
    /// already brewing.
    pub fn add(&self, product: &Product) {
        self.lines.update(|lines| {
            match lines.iter_mut().find(|l| l.product_id == product.id) {
                Some(line) => line.quantity += 1,
                None => lines.push(CauldronLine {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    unit_price: product.price.clone(),
                    quantity: 1,
                }),
            }
        });
        self.persist();
    }

    pub fn increment(&self, product_id: &str) {
        self.lines.update(|lines| {
            if let Some(line) = lines.iter_mut().find(|l| l.product_id == product_id) {
                line.quantity += 1;
            }
        });
        self.persist();
    }

    /// Decrements a line; the line disappears when it reaches zero.
    pub fn decrement(&self, product_id: &str) {
        self.lines.update(|lines| {
            if let Some(line) = lines.iter_mut().find(|l| l.product_id == product_id) {
                line.quantity -= 1;
            }
            lines.retain(|l| l.quantity > 0);
        });
        self.persist();
    }

    pub fn remove(&self, product_id: &str) {
        self.lines
            .update(|lines| lines.retain(|l| l.product_id != product_id));
        self.persist();
    }

    pub fn clear(&self) {
        self.lines.update(|lines| lines.clear());
        self.persist();
    }

    /// Total number of items across all lines.
    pub fn count(&self) -> u32 {
        self.lines.with(|lines| lines.iter().map(|l| l.quantity).sum())
    }

    /// Cart total in cents, converted into `target`. `None` when a line
    /// price does not parse.
    pub fn total_cents(&self, target: Currency) -> Option<i64> {
        self.lines.with(|lines| {
            currency::total_in(
                lines.iter().map(|l| (l.unit_price.as_str(), l.quantity)),
                target,
            )
        })
    }

    /// Display total in the target currency, or a dash when unpriceable.
    pub fn total_display(&self, target: Currency) -> String {
        match self.total_cents(target) {
            Some(cents) => currency::format_price(cents, target),
            None => "—".to_string(),
        }
    }

    fn persist(&self) {
        let lines = self.lines.get_untracked();
        if let Some(storage) = storage() {
            match serde_json::to_string(&lines) {
                Ok(json) => {
                    let _ = storage.set_item(STORAGE_KEY, &json);
                }
                Err(e) => log!("[CAULDRON] Failed to serialize cart: {}", e),
            }
        }
    }
}

impl Default for Cauldron {
    fn default() -> Self {
        Self::new()
    }
}

fn load_lines() -> Vec<CauldronLine> {
    storage()
        .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten())
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

// localStorage only exists in the browser; the server render sees an empty
// cauldron and never writes.
#[cfg(target_arch = "wasm32")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(not(target_arch = "wasm32"))]
fn storage() -> Option<web_sys::Storage> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_product(name: &str, price: &str) -> Product {
        Product {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            price: price.into(),
            image: String::new(),
            category: String::new(),
        }
    }

    fn with_runtime(f: impl FnOnce()) {
        let runtime = create_runtime();
        f();
        runtime.dispose();
    }

    #[test]
    fn test_add_merges_duplicate_products() {
        with_runtime(|| {
            let cauldron = Cauldron::new();
            let product = test_product("Mandrake Elixir", "10,00€");

            cauldron.add(&product);
            cauldron.add(&product);

            let lines = cauldron.lines.get_untracked();
            assert_eq!(lines.len(), 1);
            assert_eq!(lines[0].quantity, 2);
            assert_eq!(cauldron.count(), 2);
        });
    }

    #[test]
    fn test_decrement_removes_at_zero() {
        with_runtime(|| {
            let cauldron = Cauldron::new();
            let product = test_product("Black Salt", "4,00€");

            cauldron.add(&product);
            cauldron.decrement(&product.id);

            assert!(cauldron.lines.get_untracked().is_empty());
            assert_eq!(cauldron.count(), 0);
        });
    }

    #[test]
    fn test_remove_and_clear() {
        with_runtime(|| {
            let cauldron = Cauldron::new();
            let salt = test_product("Black Salt", "4,00€");
            let sage = test_product("Imported Sage", "$5.00");

            cauldron.add(&salt);
            cauldron.add(&sage);
            cauldron.remove(&salt.id);
            assert_eq!(cauldron.lines.get_untracked().len(), 1);

            cauldron.clear();
            assert!(cauldron.lines.get_untracked().is_empty());
        });
    }

    #[test]
    fn test_total_converts_across_currencies() {
        with_runtime(|| {
            let cauldron = Cauldron::new();
            cauldron.add(&test_product("Mandrake Elixir", "10,00€"));
            cauldron.add(&test_product("Imported Sage", "$10.80"));

            // $10.80 equals 10,00€ under the fixed rate table
            assert_eq!(cauldron.total_cents(Currency::Eur), Some(2000));
            assert_eq!(cauldron.total_display(Currency::Eur), "20,00€");
        });
    }

    #[test]
    fn test_total_with_unpriceable_line() {
        with_runtime(|| {
            let cauldron = Cauldron::new();
            cauldron.add(&test_product("Mystery Brew", "ask the raven"));
            assert_eq!(cauldron.total_cents(Currency::Eur), None);
            assert_eq!(cauldron.total_display(Currency::Eur), "—");
        });
    }
}
