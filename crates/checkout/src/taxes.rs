//! Seam to the host's VAT-calculating component.
//!
//! The reverse charge extension never computes VAT itself; it depends on
//! whichever gateway the host configured for that (rate tables, origin
//! country, tax-inclusive display). [`TaxGateway`] is that dependency as a
//! trait, and [`StaticTaxGateway`] is a table-backed implementation for
//! tests and standalone embeddings.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use vatrc_core::CountryCode;

/// The VAT-calculating component this extension depends on.
pub trait TaxGateway: Send + Sync {
    /// Whether the gateway is active for the current channel.
    fn is_active(&self) -> bool;

    /// The seller's origin country.
    fn origin_country(&self) -> CountryCode;

    /// The VAT rate (percent) charged for a destination country, if the
    /// gateway taxes that country at all.
    fn rate_for(&self, country: CountryCode) -> Option<Decimal>;

    /// Whether displayed prices are entered with tax included. With
    /// tax-exclusive prices there is nothing to reverse-charge.
    fn prices_entered_with_tax(&self) -> bool;
}

/// A [`TaxGateway`] backed by a fixed rate table.
#[derive(Debug, Clone)]
pub struct StaticTaxGateway {
    origin_country: CountryCode,
    rates: BTreeMap<CountryCode, Decimal>,
    active: bool,
    prices_entered_with_tax: bool,
}

impl StaticTaxGateway {
    /// Create a gateway from an origin country and a rate table.
    #[must_use]
    pub const fn new(
        origin_country: CountryCode,
        rates: BTreeMap<CountryCode, Decimal>,
        active: bool,
        prices_entered_with_tax: bool,
    ) -> Self {
        Self {
            origin_country,
            rates,
            active,
            prices_entered_with_tax,
        }
    }
}

impl TaxGateway for StaticTaxGateway {
    fn is_active(&self) -> bool {
        self.active
    }

    fn origin_country(&self) -> CountryCode {
        self.origin_country
    }

    fn rate_for(&self, country: CountryCode) -> Option<Decimal> {
        self.rates.get(&country).copied()
    }

    fn prices_entered_with_tax(&self) -> bool {
        self.prices_entered_with_tax
    }
}
