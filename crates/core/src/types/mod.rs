//! Core types for the reverse charge extension.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod country;
pub mod metadata;
pub mod money;
pub mod vatin;

pub use country::{CountryCode, CountryCodeError};
pub use metadata::Metadata;
pub use money::{
    CheckoutTaxedPrices, CurrencyCode, Money, MoneyError, OrderTaxedPrices, Taxable, TaxedMoney,
};
pub use vatin::{Vatin, VatinError};
