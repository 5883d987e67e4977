//! Business logic services.
//!
//! Pure decision logic (drop selection, cart variant rules) lives here so
//! it can be tested without a database; transactional orchestration
//! (checkout) wraps the repositories.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod drops;
