//! The reverse charge evaluation hooks.
//!
//! Mirrors the tax-hook contract of the host pipeline: each hook receives
//! the price computed so far (`previous`) and returns either that price
//! unchanged or the same price with the tax component stripped. Hooks never
//! fail; any parse or verification problem is logged and treated as "not a
//! valid VATIN" (the checkout always gets a price back).
//!
//! The buyer's VATIN arrives through checkout metadata under
//! [`META_VATIN_KEY`]; a successfully verified number is memoized under
//! [`META_VATIN_VALIDATED_KEY`] so re-evaluation with the same number never
//! calls the registry again.

use std::sync::Arc;

use tracing::{debug, warn};

use vatrc_core::{CheckoutTaxedPrices, CountryCode, Metadata, Taxable, TaxedMoney, Vatin};

use crate::config::ReverseChargeConfig;
use crate::models::{Address, Checkout};
use crate::taxes::TaxGateway;
use crate::vies::{ViesClient, ViesError};

/// Metadata key holding the VATIN the buyer supplied.
pub const META_VATIN_KEY: &str = "vatrc.vatin";

/// Metadata key holding the last VATIN that passed registry verification.
pub const META_VATIN_VALIDATED_KEY: &str = "vatrc.vatin_validated";

/// VAT reverse charge evaluation.
///
/// Applies the reverse charge procedure to a checkout performed by an
/// EU-VAT registered business: VAT is not charged, and the calculated VAT
/// amount is deducted from totals where taxes were included in prices.
pub struct VatReverseCharge {
    config: ReverseChargeConfig,
    vies: ViesClient,
    taxes: Arc<dyn TaxGateway>,
}

impl VatReverseCharge {
    /// Create the evaluation with its configuration and the host's tax
    /// gateway.
    ///
    /// # Errors
    ///
    /// Returns error if the VIES HTTP client fails to build.
    pub fn new(
        config: ReverseChargeConfig,
        taxes: Arc<dyn TaxGateway>,
    ) -> Result<Self, ViesError> {
        let vies = ViesClient::new(&config.vies)?;
        Ok(Self {
            config,
            vies,
            taxes,
        })
    }

    /// Adjust a checkout total.
    ///
    /// Returns `previous` unchanged unless a validated cross-border VATIN
    /// calls for stripping the tax component.
    pub async fn calculate_checkout_total(
        &self,
        checkout: &mut Checkout,
        address: Option<&Address>,
        previous: TaxedMoney,
    ) -> TaxedMoney {
        if self.should_skip(&previous) {
            return previous;
        }
        self.refresh_vatin_metadata(&mut checkout.metadata, buyer_country(address))
            .await;

        if self.reverse_charge_applies(&checkout.metadata, buyer_country(address)) {
            // VAT is reverse-charged, so it must be excluded from the total.
            return previous.without_tax();
        }
        previous
    }

    /// Adjust a checkout line total.
    pub async fn calculate_checkout_line_total(
        &self,
        checkout: &mut Checkout,
        address: Option<&Address>,
        previous: CheckoutTaxedPrices,
    ) -> CheckoutTaxedPrices {
        if self.should_skip(&previous) {
            return previous;
        }
        self.refresh_vatin_metadata(&mut checkout.metadata, buyer_country(address))
            .await;

        if self.reverse_charge_applies(&checkout.metadata, buyer_country(address)) {
            return previous.without_tax();
        }
        previous
    }

    /// Whether evaluation should leave the incoming price alone without
    /// touching metadata or the registry.
    fn should_skip(&self, previous: &impl Taxable) -> bool {
        if !self.config.active {
            return true;
        }
        // Without the gateway that calculates VAT there is nothing to undo.
        if !self.taxes.is_active() {
            return true;
        }
        // If taxes aren't included in prices, there's no reverse charge to
        // apply.
        if !self.taxes.prices_entered_with_tax() {
            return true;
        }
        // If there's no tax on the given price.
        !previous.has_tax()
    }

    /// Bring the two metadata keys in line with the supplied VATIN.
    ///
    /// A malformed or country-mismatching VATIN purges both keys. A new,
    /// well-formed VATIN is verified against the registry and memoized on
    /// success; on failure the stale validated key is removed so it cannot
    /// keep stripping tax.
    async fn refresh_vatin_metadata(
        &self,
        metadata: &mut Metadata,
        buyer_country: Option<CountryCode>,
    ) {
        let supplied = metadata.get(META_VATIN_KEY).map(str::to_owned);
        let validated = metadata.get(META_VATIN_VALIDATED_KEY).map(str::to_owned);
        if supplied.is_none() && validated.is_none() {
            return;
        }

        let vatin = supplied.as_deref().and_then(|raw| match Vatin::parse(raw) {
            Ok(vatin) => Some(vatin),
            Err(err) => {
                warn!(error = %err, "Invalid VATIN format");
                None
            }
        });

        match vatin {
            Some(vatin) if Some(vatin.country_code()) == buyer_country => {
                // Only verify further if it differs from an already
                // validated one.
                if validated.as_deref() == Some(vatin.as_str()) {
                    return;
                }
                if self.verify(&vatin).await {
                    debug!(vatin = %vatin, "Updating validated VATIN");
                    metadata.insert(META_VATIN_KEY, vatin.as_str());
                    metadata.insert(META_VATIN_VALIDATED_KEY, vatin.as_str());
                } else {
                    metadata.remove(META_VATIN_VALIDATED_KEY);
                }
            }
            _ => {
                // Does not look like a usable VATIN for this buyer.
                debug!("Invalid VATIN: missing or mismatching country code");
                metadata.remove(META_VATIN_KEY);
                metadata.remove(META_VATIN_VALIDATED_KEY);
            }
        }
    }

    /// Ask the registry about a VATIN; any error counts as invalid.
    async fn verify(&self, vatin: &Vatin) -> bool {
        match self.vies.check(vatin).await {
            Ok(check) => check.valid,
            Err(ViesError::Unavailable(reason)) => {
                warn!(vatin = %vatin, reason = %reason, "VIES could not verify the VAT identification number");
                false
            }
            Err(err) => {
                warn!(vatin = %vatin, error = %err, "Unable to verify the VAT identification number");
                false
            }
        }
    }

    /// Whether a validated VATIN and a cross-border buyer country call for
    /// the reverse charge.
    fn reverse_charge_applies(
        &self,
        metadata: &Metadata,
        buyer_country: Option<CountryCode>,
    ) -> bool {
        if !metadata.contains_key(META_VATIN_VALIDATED_KEY) {
            return false;
        }
        buyer_country.is_some_and(|buyer| buyer != self.taxes.origin_country())
    }
}

fn buyer_country(address: Option<&Address>) -> Option<CountryCode> {
    address.map(|a| a.country)
}
