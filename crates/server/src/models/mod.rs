//! Domain models for the Hemline server.
//!
//! These are validated domain objects, separate from database row types
//! (which live in the `db` modules) and from API payloads (which live in
//! the `routes` modules).

pub mod cart;
pub mod drop;
pub mod order;
pub mod product;
pub mod session;
pub mod site_settings;
pub mod user;

pub use cart::{Cart, CartItem, CartItemProduct};
pub use drop::Drop;
pub use order::{Order, OrderItem, ShippingInfo};
pub use product::Product;
pub use session::{CurrentUser, keys as session_keys};
pub use site_settings::SiteSettings;
pub use user::User;
