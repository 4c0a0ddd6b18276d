//! Shopping cart held for the lifetime of the browser tab.
use crate::catalog::Product;
use crate::language::Localized;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product line in the cart. `quantity` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: Localized,
    pub price: Money,
    pub quantity: u32,
    pub image: String,
    pub brand: String,
}

impl CartItem {
    /// A single unit of a catalog product at its current price.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
            image: product.image.clone(),
            brand: product.brand.clone(),
        }
    }

    #[must_use]
    pub const fn subtotal(&self) -> Money {
        self.price.times(self.quantity)
    }
}

/// Ordered list of cart lines.
///
/// Adding a product that is already present grows the existing line instead
/// of creating a duplicate, so every product id appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartItem] {
        &self.lines
    }

    #[must_use]
    pub fn find_line(&self, id: &str) -> Option<&CartItem> {
        self.lines.iter().find(|line| line.id == id)
    }

    fn find_line_mut(&mut self, id: &str) -> Option<&mut CartItem> {
        self.lines.iter_mut().find(|line| line.id == id)
    }

    /// Add an item, merging with an existing line for the same product.
    /// Returns the resulting quantity of that product.
    pub fn add(&mut self, item: CartItem) -> u32 {
        let incoming = item.quantity.max(1);
        if let Some(line) = self.find_line_mut(&item.id) {
            line.quantity = line.quantity.saturating_add(incoming);
            line.quantity
        } else {
            self.lines.push(CartItem {
                quantity: incoming,
                ..item
            });
            incoming
        }
    }

    /// Remove a product line entirely. Unknown ids are ignored.
    pub fn remove(&mut self, id: &str) {
        self.lines.retain(|line| line.id != id);
    }

    /// Set a line's quantity; zero removes the line.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
        } else if let Some(line) = self.find_line_mut(id) {
            line.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of units across all lines (the navbar badge).
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    #[must_use]
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartItem::subtotal).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, pounds: i64) -> CartItem {
        CartItem {
            id: id.to_string(),
            name: Localized::new(id, id),
            price: Money::from_pounds(pounds),
            quantity: 1,
            image: String::new(),
            brand: "GSK".into(),
        }
    }

    #[test]
    fn adding_same_product_twice_merges_lines() {
        let mut cart = Cart::new();
        cart.add(item("panadol", 25));
        let qty = cart.add(item("panadol", 25));
        assert_eq!(qty, 2);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.total(), Money::from_pounds(50));
    }

    #[test]
    fn total_sums_price_times_quantity_per_line() {
        let mut cart = Cart::new();
        cart.add(item("a", 25));
        cart.add(CartItem {
            quantity: 3,
            ..item("b", 150)
        });
        let expected: Money = cart
            .lines()
            .iter()
            .map(|line| line.price.times(line.quantity))
            .sum();
        assert_eq!(cart.total(), expected);
        assert_eq!(cart.total(), Money::from_pounds(475));
        assert_eq!(cart.count(), 4);
    }

    #[test]
    fn set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(item("a", 10));
        cart.add(item("b", 20));
        cart.set_quantity("a", 5);
        assert_eq!(cart.find_line("a").map(|l| l.quantity), Some(5));
        cart.set_quantity("a", 0);
        assert!(cart.find_line("a").is_none());
        cart.set_quantity("missing", 3);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn zero_quantity_insert_is_clamped_to_one() {
        let mut cart = Cart::new();
        cart.add(CartItem {
            quantity: 0,
            ..item("a", 10)
        });
        assert_eq!(cart.count(), 1);
        cart.remove("a");
        assert!(cart.is_empty());
        cart.add(item("b", 1));
        cart.clear();
        assert_eq!(cart.total(), Money::ZERO);
    }
}
