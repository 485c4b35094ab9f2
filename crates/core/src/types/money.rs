//! Money and taxed-money types using decimal arithmetic.
//!
//! A [`TaxedMoney`] carries both the net (tax-exclusive) and gross
//! (tax-inclusive) amount of a price. The reverse charge procedure works on
//! the delta between the two: stripping tax means collapsing gross down to
//! net. The aggregate types mirror the price bundles the host checkout
//! pipeline hands to tax hooks.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors produced when combining money values.
#[derive(thiserror::Error, Debug, Clone)]
pub enum MoneyError {
    /// Net and gross amounts use different currencies.
    #[error("currency mismatch: net is {net:?}, gross is {gross:?}")]
    CurrencyMismatch {
        /// Currency of the net amount.
        net: CurrencyCode,
        /// Currency of the gross amount.
        gross: CurrencyCode,
    },
}

/// ISO 4217 currency codes for markets where the extension operates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    BGN,
    CZK,
    DKK,
    HUF,
    PLN,
    RON,
    SEK,
    GBP,
    USD,
}

/// An amount of money in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., euros, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
}

impl Money {
    /// Create a new money value.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }
}

/// A price carrying both its net and gross amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxedMoney {
    net: Money,
    gross: Money,
}

impl TaxedMoney {
    /// Create a taxed price from net and gross amounts.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if the two amounts use
    /// different currencies.
    pub fn new(net: Money, gross: Money) -> Result<Self, MoneyError> {
        if net.currency != gross.currency {
            return Err(MoneyError::CurrencyMismatch {
                net: net.currency,
                gross: gross.currency,
            });
        }
        Ok(Self { net, gross })
    }

    /// Create a price that carries no tax (net == gross).
    #[must_use]
    pub const fn tax_free(amount: Money) -> Self {
        Self {
            net: amount,
            gross: amount,
        }
    }

    /// The tax-exclusive amount.
    #[must_use]
    pub const fn net(&self) -> Money {
        self.net
    }

    /// The tax-inclusive amount.
    #[must_use]
    pub const fn gross(&self) -> Money {
        self.gross
    }

    /// The tax component (gross minus net).
    #[must_use]
    pub fn tax(&self) -> Money {
        Money::new(self.gross.amount - self.net.amount, self.net.currency)
    }
}

/// Price bundle for a checkout line, as assembled by the host pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutTaxedPrices {
    /// Line price before any sale or voucher.
    pub undiscounted_price: TaxedMoney,
    /// Line price with catalogue sales applied.
    pub price_with_sale: TaxedMoney,
    /// Line price with sales and voucher discounts applied.
    pub price_with_discounts: TaxedMoney,
}

/// Price bundle for an order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTaxedPrices {
    /// Line price before discounts.
    pub undiscounted_price: TaxedMoney,
    /// Line price with discounts applied.
    pub price_with_discounts: TaxedMoney,
}

/// Prices that a tax hook can inspect and strip tax from.
///
/// `has_tax` drives the skip decision: when the incoming price already
/// carries no tax there is nothing to reverse-charge. `without_tax`
/// collapses every component so that net == gross, which is the reverse
/// charge adjustment itself.
pub trait Taxable {
    /// Whether the price carries a non-zero tax component.
    fn has_tax(&self) -> bool;

    /// The same price with the tax component removed.
    #[must_use]
    fn without_tax(self) -> Self;
}

impl Taxable for TaxedMoney {
    fn has_tax(&self) -> bool {
        self.net != self.gross
    }

    fn without_tax(self) -> Self {
        Self::tax_free(self.net)
    }
}

impl Taxable for CheckoutTaxedPrices {
    // The host inspects the sale price when deciding whether any tax was
    // applied to the line.
    fn has_tax(&self) -> bool {
        self.price_with_sale.has_tax()
    }

    fn without_tax(self) -> Self {
        Self {
            undiscounted_price: self.undiscounted_price.without_tax(),
            price_with_sale: self.price_with_sale.without_tax(),
            price_with_discounts: self.price_with_discounts.without_tax(),
        }
    }
}

impl Taxable for OrderTaxedPrices {
    fn has_tax(&self) -> bool {
        self.price_with_discounts.has_tax()
    }

    fn without_tax(self) -> Self {
        Self {
            undiscounted_price: self.undiscounted_price.without_tax(),
            price_with_discounts: self.price_with_discounts.without_tax(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Amount in euro cents.
    fn eur(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2), CurrencyCode::EUR)
    }

    fn taxed(net_cents: i64, gross_cents: i64) -> TaxedMoney {
        TaxedMoney::new(eur(net_cents), eur(gross_cents)).unwrap()
    }

    #[test]
    fn test_new_rejects_currency_mismatch() {
        let result = TaxedMoney::new(
            Money::new(Decimal::new(1000, 2), CurrencyCode::EUR),
            Money::new(Decimal::new(1200, 2), CurrencyCode::PLN),
        );
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_tax_component() {
        let price = taxed(10000, 12100);
        assert_eq!(price.tax(), eur(2100));
    }

    #[test]
    fn test_has_tax() {
        assert!(taxed(10000, 11900).has_tax());
        assert!(!taxed(10000, 10000).has_tax());
    }

    #[test]
    fn test_without_tax_collapses_to_net() {
        let price = taxed(10000, 12100);
        let stripped = price.without_tax();
        assert_eq!(stripped.net(), eur(10000));
        assert_eq!(stripped.gross(), eur(10000));
        assert!(!stripped.has_tax());
    }

    #[test]
    fn test_without_tax_is_idempotent() {
        let price = taxed(8000, 9600);
        assert_eq!(price.without_tax(), price.without_tax().without_tax());
    }

    #[test]
    fn test_checkout_prices_without_tax() {
        let prices = CheckoutTaxedPrices {
            undiscounted_price: taxed(5000, 6000),
            price_with_sale: taxed(4000, 4800),
            price_with_discounts: taxed(3500, 4200),
        };
        let stripped = prices.without_tax();
        assert_eq!(stripped.undiscounted_price.gross(), eur(5000));
        assert_eq!(stripped.price_with_sale.gross(), eur(4000));
        assert_eq!(stripped.price_with_discounts.gross(), eur(3500));
    }

    #[test]
    fn test_checkout_prices_has_tax_uses_sale_price() {
        let prices = CheckoutTaxedPrices {
            undiscounted_price: taxed(5000, 6000),
            price_with_sale: taxed(4000, 4000),
            price_with_discounts: taxed(3500, 4200),
        };
        assert!(!prices.has_tax());
    }
}
