//! VAT identification number (VATIN) parsing and format validation.
//!
//! A VATIN is a two-letter registration prefix followed by a member-state
//! specific number, e.g. `DE123456789` or `NL123456789B01`. Parsing here
//! checks shape only: the prefix must belong to the EU VAT area and the
//! number must match that member state's pattern. Check-digit verification
//! is delegated to the VIES registry, which is authoritative anyway.
//!
//! Two prefixes do not match the buyer's address country: Greece registers
//! under `EL` (addresses use `GR`), and Northern Ireland under `XI`
//! (addresses use `GB`). [`Vatin::country_code`] resolves both.

use core::fmt;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::country::CountryCode;

/// Errors that can occur when parsing a [`Vatin`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum VatinError {
    /// The input string is empty after normalization.
    #[error("VATIN cannot be empty")]
    Empty,
    /// The input is too short to carry a prefix and a number.
    #[error("VATIN is too short")]
    TooShort,
    /// The two-letter prefix is not an EU VAT area registration prefix.
    #[error("unknown VAT registration prefix: {prefix}")]
    UnknownPrefix {
        /// The rejected prefix.
        prefix: String,
    },
    /// The number part does not match the member state's format.
    #[error("invalid VAT number for {prefix}")]
    InvalidNumber {
        /// Registration prefix whose pattern failed.
        prefix: String,
    },
}

/// Registration prefix, address country, and number pattern for each member
/// of the EU VAT area. `EL` is Greece, `XI` is Northern Ireland.
const MEMBER_STATES: &[(&str, &str, &str)] = &[
    ("AT", "AT", r"^U\d{8}$"),
    ("BE", "BE", r"^[01]\d{9}$"),
    ("BG", "BG", r"^\d{9,10}$"),
    ("CY", "CY", r"^\d{8}[A-Z]$"),
    ("CZ", "CZ", r"^\d{8,10}$"),
    ("DE", "DE", r"^[1-9]\d{8}$"),
    ("DK", "DK", r"^\d{8}$"),
    ("EE", "EE", r"^\d{9}$"),
    ("EL", "GR", r"^\d{9}$"),
    ("ES", "ES", r"^([A-Z]\d{8}|\d{8}[A-Z]|[A-Z]\d{7}[A-Z])$"),
    ("FI", "FI", r"^\d{8}$"),
    ("FR", "FR", r"^[A-HJ-NP-Z0-9]{2}\d{9}$"),
    ("HR", "HR", r"^\d{11}$"),
    ("HU", "HU", r"^\d{8}$"),
    ("IE", "IE", r"^(\d{7}[A-W][A-IW]?|\d[A-Z+*]\d{5}[A-W])$"),
    ("IT", "IT", r"^\d{11}$"),
    ("LT", "LT", r"^(\d{9}|\d{12})$"),
    ("LU", "LU", r"^\d{8}$"),
    ("LV", "LV", r"^\d{11}$"),
    ("MT", "MT", r"^\d{8}$"),
    ("NL", "NL", r"^\d{9}B\d{2}$"),
    ("PL", "PL", r"^\d{10}$"),
    ("PT", "PT", r"^\d{9}$"),
    ("RO", "RO", r"^\d{2,10}$"),
    ("SE", "SE", r"^\d{10}01$"),
    ("SI", "SI", r"^\d{8}$"),
    ("SK", "SK", r"^\d{10}$"),
    ("XI", "GB", r"^(\d{9}(\d{3})?|GD\d{3}|HA\d{3})$"),
];

static NUMBER_PATTERNS: LazyLock<HashMap<&'static str, (CountryCode, Regex)>> =
    LazyLock::new(|| {
        MEMBER_STATES
            .iter()
            .map(|&(prefix, country, pattern)| {
                let country = CountryCode::parse(country).expect("Invalid country code");
                let re = Regex::new(pattern).expect("Invalid regex");
                (prefix, (country, re))
            })
            .collect()
    });

/// A normalized, format-validated EU VAT identification number.
///
/// Normalization strips spaces, dots, and hyphens and uppercases the input;
/// Belgian nine-digit numbers are zero-padded to the current ten-digit form.
///
/// ## Examples
///
/// ```
/// use vatrc_core::Vatin;
///
/// let vatin = Vatin::parse("nl 8205.26.977.b01").unwrap();
/// assert_eq!(vatin.as_str(), "NL820526977B01");
/// assert_eq!(vatin.prefix(), "NL");
/// assert_eq!(vatin.country_code().as_str(), "NL");
///
/// // Greece registers under EL but addresses use GR
/// let vatin = Vatin::parse("EL123456789").unwrap();
/// assert_eq!(vatin.country_code().as_str(), "GR");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Vatin {
    value: String,
    country: CountryCode,
}

impl Vatin {
    /// Parse a `Vatin` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too short, carries a prefix
    /// outside the EU VAT area, or its number part fails the member state's
    /// format pattern.
    pub fn parse(s: &str) -> Result<Self, VatinError> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '.' && *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if normalized.is_empty() {
            return Err(VatinError::Empty);
        }
        if normalized.len() < 4 {
            return Err(VatinError::TooShort);
        }

        // Non-ASCII input cannot split on a char boundary here
        let Some((prefix, number)) = normalized.split_at_checked(2) else {
            return Err(VatinError::UnknownPrefix {
                prefix: normalized.chars().take(2).collect(),
            });
        };
        let Some((country, pattern)) = NUMBER_PATTERNS.get(prefix) else {
            return Err(VatinError::UnknownPrefix {
                prefix: prefix.to_owned(),
            });
        };

        // Belgium moved from 9 to 10 digits; old numbers gain a leading zero.
        let number = if prefix == "BE"
            && number.len() == 9
            && number.chars().all(|c| c.is_ascii_digit())
        {
            format!("0{number}")
        } else {
            number.to_owned()
        };

        if !pattern.is_match(&number) {
            return Err(VatinError::InvalidNumber {
                prefix: prefix.to_owned(),
            });
        }

        Ok(Self {
            value: format!("{prefix}{number}"),
            country: *country,
        })
    }

    /// Returns the full normalized VATIN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The two-letter registration prefix (e.g. `DE`, `EL`, `XI`).
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.value.get(..2).unwrap_or("")
    }

    /// The number part after the registration prefix.
    #[must_use]
    pub fn number(&self) -> &str {
        self.value.get(2..).unwrap_or("")
    }

    /// The address country this VATIN registers: `EL` maps to `GR` and `XI`
    /// to `GB`; every other prefix is its own country.
    #[must_use]
    pub const fn country_code(&self) -> CountryCode {
        self.country
    }

    /// Consumes the `Vatin` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.value
    }
}

impl fmt::Display for Vatin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl std::str::FromStr for Vatin {
    type Err = VatinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Vatin {
    type Error = VatinError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Vatin> for String {
    fn from(vatin: Vatin) -> Self {
        vatin.value
    }
}

impl AsRef<str> for Vatin {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_numbers() {
        assert!(Vatin::parse("DE123456789").is_ok());
        assert!(Vatin::parse("ATU12345678").is_ok());
        assert!(Vatin::parse("NL123456789B01").is_ok());
        assert!(Vatin::parse("IT12345678901").is_ok());
        assert!(Vatin::parse("IE6388047V").is_ok());
        assert!(Vatin::parse("SE556012345601").is_ok());
        assert!(Vatin::parse("XI123456789").is_ok());
    }

    #[test]
    fn test_parse_normalizes_separators_and_case() {
        let vatin = Vatin::parse("nl 8205.26.977-b01").unwrap();
        assert_eq!(vatin.as_str(), "NL820526977B01");
    }

    #[test]
    fn test_parse_pads_old_belgian_numbers() {
        let vatin = Vatin::parse("BE123456789").unwrap();
        assert_eq!(vatin.as_str(), "BE0123456789");
        assert_eq!(vatin.number(), "0123456789");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Vatin::parse("  "), Err(VatinError::Empty)));
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(Vatin::parse("DE1"), Err(VatinError::TooShort)));
    }

    #[test]
    fn test_parse_unknown_prefix() {
        // Switzerland is not in the EU VAT area
        assert!(matches!(
            Vatin::parse("CHE123456789"),
            Err(VatinError::UnknownPrefix { .. })
        ));
        assert!(matches!(
            Vatin::parse("US123456789"),
            Err(VatinError::UnknownPrefix { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_number_shape() {
        // German numbers are exactly nine digits and never start with 0
        assert!(matches!(
            Vatin::parse("DE12345"),
            Err(VatinError::InvalidNumber { .. })
        ));
        assert!(matches!(
            Vatin::parse("DE012345678"),
            Err(VatinError::InvalidNumber { .. })
        ));
        // Dutch numbers need the B-suffix
        assert!(matches!(
            Vatin::parse("NL123456789"),
            Err(VatinError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_country_code_plain_prefix() {
        assert_eq!(Vatin::parse("DE123456789").unwrap().country_code().as_str(), "DE");
        assert_eq!(Vatin::parse("PL1234567890").unwrap().country_code().as_str(), "PL");
    }

    #[test]
    fn test_country_code_greece() {
        let vatin = Vatin::parse("EL123456789").unwrap();
        assert_eq!(vatin.prefix(), "EL");
        assert_eq!(vatin.country_code().as_str(), "GR");
    }

    #[test]
    fn test_country_code_northern_ireland() {
        let vatin = Vatin::parse("XI123456789").unwrap();
        assert_eq!(vatin.prefix(), "XI");
        assert_eq!(vatin.country_code().as_str(), "GB");
    }

    #[test]
    fn test_serde_roundtrip() {
        let vatin = Vatin::parse("FR40303265045").unwrap();
        let json = serde_json::to_string(&vatin).unwrap();
        assert_eq!(json, "\"FR40303265045\"");

        let parsed: Vatin = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vatin);
    }

    #[test]
    fn test_every_member_state_pattern_compiles() {
        assert_eq!(NUMBER_PATTERNS.len(), MEMBER_STATES.len());
    }
}
