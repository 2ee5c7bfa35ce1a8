//! # Checkout
//!
//! Renders the cart into the order text a shop attendant reads, and builds
//! the messaging endpoint links that carry it.
//!
//! ## Message Format
//! ```text
//! 1. USB-C Cable - Ksh.500
//! 2. Screen Protector - Ksh.300
//! Total: Ksh.800
//! ```
//!
//! ## Endpoint URL
//! ```text
//! <base>/<phone>?text=<url-encoded greeting + "\n" + message>
//!
//! https://wa.me/254741145421?text=Hello%21+I+want+to+buy%3A%0A1.+USB-C+Cable...
//! ```
//! An empty cart produces no checkout URL at all.

use url::Url;

use crate::cart::Cart;
use crate::error::ValidationError;
use crate::types::{CatalogItem, PhoneNumber};
use crate::validation::validate_messaging_base_url;
use crate::{CURRENCY_PREFIX, DEFAULT_CHECKOUT_GREETING, DEFAULT_MESSAGING_BASE_URL};

/// Builds the checkout message for `cart`.
///
/// One numbered line per entry, then a `Total:` line, separated by `\n`.
pub fn build_message(cart: &Cart) -> String {
    let mut lines: Vec<String> = cart
        .items()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{}. {} - {}{}",
                i + 1,
                entry.name(),
                CURRENCY_PREFIX,
                entry.price().formatted()
            )
        })
        .collect();

    lines.push(format!(
        "Total: {}{}",
        CURRENCY_PREFIX,
        cart.total().formatted()
    ));

    lines.join("\n")
}

/// Checkout URL on the default messaging base with the default greeting.
///
/// `None` when the cart is empty.
pub fn build_endpoint_url(cart: &Cart, phone_number: &PhoneNumber) -> Option<Url> {
    MessagingEndpoint::new(DEFAULT_MESSAGING_BASE_URL, phone_number.clone())
        .ok()?
        .checkout_url(cart)
}

/// A pre-filled chat about a single item.
#[derive(Debug, Clone, Copy)]
pub enum Inquiry<'a> {
    /// "Talk to Us" on a repair service.
    RepairHelp(&'a CatalogItem),
    /// "Ask Questions" on any item.
    Question(&'a CatalogItem),
}

impl Inquiry<'_> {
    pub fn text(&self) -> String {
        match self {
            Inquiry::RepairHelp(item) => format!("Hello! I need help with {}", item.name),
            Inquiry::Question(item) => format!("Hello! I have a question about {}", item.name),
        }
    }
}

/// The external messaging endpoint: a base URL plus the shop's number.
#[derive(Debug, Clone)]
pub struct MessagingEndpoint {
    base: Url,
    phone_number: PhoneNumber,
    greeting: String,
}

impl MessagingEndpoint {
    /// Creates an endpoint with the default checkout greeting.
    pub fn new(base_url: &str, phone_number: PhoneNumber) -> Result<Self, ValidationError> {
        Ok(MessagingEndpoint {
            base: validate_messaging_base_url(base_url)?,
            phone_number,
            greeting: DEFAULT_CHECKOUT_GREETING.to_string(),
        })
    }

    /// Replaces the line placed before the order lines. Empty disables it.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    /// Plain chat link: `<base>/<phone>`.
    pub fn chat_url(&self) -> Url {
        let mut url = self.base.clone();
        // cannot-be-a-base URLs are rejected in `new`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(self.phone_number.as_str());
        }
        url
    }

    /// Full checkout text: greeting line (if any) followed by the message.
    pub fn checkout_text(&self, cart: &Cart) -> String {
        let message = build_message(cart);
        if self.greeting.is_empty() {
            message
        } else {
            format!("{}\n{}", self.greeting, message)
        }
    }

    /// Checkout link carrying the order text. `None` for an empty cart.
    pub fn checkout_url(&self, cart: &Cart) -> Option<Url> {
        if cart.is_empty() {
            return None;
        }
        Some(self.url_with_text(&self.checkout_text(cart)))
    }

    /// Chat link pre-filled with a question about one item.
    pub fn inquiry_url(&self, inquiry: Inquiry<'_>) -> Url {
        self.url_with_text(&inquiry.text())
    }

    fn url_with_text(&self, text: &str) -> Url {
        let mut url = self.chat_url();
        url.query_pairs_mut().append_pair("text", text);
        url
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
