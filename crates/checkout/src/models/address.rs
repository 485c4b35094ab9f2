//! Buyer address view.

use serde::{Deserialize, Serialize};

use vatrc_core::CountryCode;

/// The slice of a buyer address the reverse charge evaluation needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Country of the address.
    pub country: CountryCode,
    /// Company name, if the buyer entered one.
    pub company_name: Option<String>,
}

impl Address {
    /// Create an address with just a country.
    #[must_use]
    pub const fn new(country: CountryCode) -> Self {
        Self {
            country,
            company_name: None,
        }
    }
}
