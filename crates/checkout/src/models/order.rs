//! Order record view.

use serde::{Deserialize, Serialize};

use vatrc_core::Metadata;

use super::Address;

/// The slice of a placed order the display helpers read.
///
/// Checkout metadata is copied onto the order when it is placed, so the
/// validated VATIN travels with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Host-assigned order number.
    pub number: String,
    /// Billing address, if the buyer provided one.
    pub billing_address: Option<Address>,
    /// Free-form metadata attached to the order.
    pub metadata: Metadata,
}
