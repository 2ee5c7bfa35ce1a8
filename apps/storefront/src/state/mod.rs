//! # State Module
//!
//! Session state shared between storefront consumers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront session                                                     │
//! │  ├── CatalogAggregator   (watch channels, owned by the session)        │
//! │  └── CartState           (Arc<Mutex<Cart>>, cloned into consumers)     │
//! │                                                                         │
//! │  The cart is created once at session start and handed to whoever      │
//! │  needs it; nothing reaches it through a global.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;

pub use cart::CartState;
