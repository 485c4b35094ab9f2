//! Checkout record view.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vatrc_core::Metadata;

/// The slice of a checkout record the reverse charge evaluation touches.
///
/// Only the metadata map is ever written; the host owns everything else
/// about the record, including when it gets saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    /// Host-assigned checkout token.
    pub token: Uuid,
    /// Free-form metadata attached to the checkout.
    pub metadata: Metadata,
}

impl Checkout {
    /// Create a checkout with empty metadata.
    #[must_use]
    pub fn new(token: Uuid) -> Self {
        Self {
            token,
            metadata: Metadata::new(),
        }
    }
}
