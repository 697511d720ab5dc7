//! Record stores over the `carts` and `checkouts` tables.
//!
//! The cart store owns the total-price invariant: every write of a cart's
//! items recomputes `total_price` in the same statement.

pub mod carts;
pub mod checkouts;
