//! Host-platform records handed to the evaluation hooks.
//!
//! These are thin views of the checkout pipeline's own records: the
//! extension only reads the buyer's country and two metadata keys, and the
//! host persists any metadata change under its own transaction.

mod address;
mod checkout;
mod order;

pub use address::Address;
pub use checkout::Checkout;
pub use order::Order;
