//! Order-facing helpers for invoices and confirmation views.
//!
//! Placed orders carry the checkout metadata forward, so views can ask
//! whether the order was reverse-charged (e.g. to print the "VAT reverse
//! charged" note an invoice needs) without re-running any evaluation.

use vatrc_core::CountryCode;

use crate::models::Order;
use crate::reverse_charge::META_VATIN_VALIDATED_KEY;
use crate::taxes::TaxGateway;

/// The validated VATIN stored on an order, if any.
#[must_use]
pub fn validated_vatin(order: &Order) -> Option<&str> {
    order.metadata.get(META_VATIN_VALIDATED_KEY)
}

/// Whether VAT applies to a billing country at all under the given gateway.
#[must_use]
pub fn is_vat_applicable(billing_country: CountryCode, taxes: &dyn TaxGateway) -> bool {
    taxes.rate_for(billing_country).is_some()
}

/// Whether reverse-charged VAT applies to a placed order: a validated VATIN
/// is present, the billing country is taxed by the gateway, and the sale
/// crossed a border.
#[must_use]
pub fn is_reverse_charge_applicable(order: &Order, taxes: &dyn TaxGateway) -> bool {
    if validated_vatin(order).is_none() {
        return false;
    }
    let Some(billing_country) = order.billing_address.as_ref().map(|a| a.country) else {
        return false;
    };
    if !is_vat_applicable(billing_country, taxes) {
        return false;
    }
    billing_country != taxes.origin_country()
}
