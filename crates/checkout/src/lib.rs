//! VAT reverse charge evaluation for a checkout pipeline.
//!
//! Applies the EU reverse charge procedure to a checkout performed by an
//! EU-VAT registered business: when the buyer supplies a VATIN that
//! validates against the VIES registry and the sale crosses a border, the
//! VAT amount is deducted from totals that were calculated with tax
//! included.
//!
//! To prove that the checkout is performed by a registered business, the
//! extension validates the supplied VATIN and stores the result in checkout
//! metadata, so an already-validated number never triggers a second
//! registry call.
//!
//! This crate does not perform tax calculations of its own; it adjusts
//! prices already computed by the host's tax gateway (see
//! [`taxes::TaxGateway`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vatrc_checkout::{ReverseChargeConfig, StaticTaxGateway, VatReverseCharge};
//!
//! let config = ReverseChargeConfig::from_env()?;
//! let gateway = Arc::new(StaticTaxGateway::new(origin, rates, true, true));
//! let plugin = VatReverseCharge::new(config, gateway)?;
//!
//! let total = plugin
//!     .calculate_checkout_total(&mut checkout, shipping_address.as_ref(), total)
//!     .await;
//! ```
//!
//! Read more at
//! <https://europa.eu/youreurope/business/taxation/vat/cross-border-vat/>

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod display;
pub mod models;
pub mod reverse_charge;
pub mod taxes;
pub mod vies;

pub use config::{ConfigError, ReverseChargeConfig, ViesConfig};
pub use models::{Address, Checkout, Order};
pub use reverse_charge::{META_VATIN_KEY, META_VATIN_VALIDATED_KEY, VatReverseCharge};
pub use taxes::{StaticTaxGateway, TaxGateway};
pub use vies::{ViesCheck, ViesClient, ViesError};
