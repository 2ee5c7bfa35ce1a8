//! # Cart State
//!
//! The session's cart, shared between the views that read and mutate it.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>`: clones of a `CartState` all see
//! the same cart, and only one mutation runs at a time.

use std::sync::{Arc, Mutex};

use duka_core::checkout::build_message;
use duka_core::{Cart, CartItem, CartTotals, CatalogItem};
use tracing::{debug, info, warn};

/// Shared handle to the session cart.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| cart.totals());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }

    /// Appends a snapshot of `item`; returns its position.
    pub fn add(&self, item: &CatalogItem) -> usize {
        let (index, totals) = self.with_cart_mut(|cart| (cart.add(item), cart.totals()));
        info!(
            item = %item.address(),
            index,
            item_count = totals.item_count,
            total = %totals.total,
            "Added to cart"
        );
        index
    }

    /// Removes the entry at `index`.
    ///
    /// An out-of-range index changes nothing and is logged.
    pub fn remove(&self, index: usize) -> Option<CartItem> {
        let (removed, len) = self.with_cart_mut(|cart| (cart.remove(index), cart.len()));
        match &removed {
            Some(entry) => debug!(index, name = %entry.name(), "Removed from cart"),
            None => warn!(index, len, "Ignoring cart removal: index out of range"),
        }
        removed
    }

    pub fn clear(&self) {
        self.with_cart_mut(Cart::clear);
        debug!("Cart cleared");
    }

    pub fn totals(&self) -> CartTotals {
        self.with_cart(Cart::totals)
    }

    pub fn is_empty(&self) -> bool {
        self.with_cart(Cart::is_empty)
    }

    /// Copy of the current entries.
    pub fn items(&self) -> Vec<CartItem> {
        self.with_cart(|cart| cart.items().to_vec())
    }

    /// Checkout message for the current contents.
    pub fn message(&self) -> String {
        self.with_cart(build_message)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}
