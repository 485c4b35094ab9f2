//! ISO 3166-1 alpha-2 country code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CountryCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CountryCodeError {
    /// The input string is empty.
    #[error("country code cannot be empty")]
    Empty,
    /// The input is not exactly two characters.
    #[error("country code must be exactly 2 characters (got {len})")]
    WrongLength {
        /// Length of the rejected input.
        len: usize,
    },
    /// The input contains a character outside A-Z.
    #[error("country code must contain only ASCII letters")]
    NotAlphabetic,
}

/// A two-letter country code in ISO 3166-1 alpha-2 shape.
///
/// Parsing accepts lowercase input and surrounding whitespace, and always
/// stores the uppercase form. No membership check against the ISO registry
/// is performed; buyer addresses may carry any two-letter code the host
/// platform accepts.
///
/// ## Examples
///
/// ```
/// use vatrc_core::CountryCode;
///
/// let de = CountryCode::parse("de").unwrap();
/// assert_eq!(de.as_str(), "DE");
///
/// assert!(CountryCode::parse("DEU").is_err());
/// assert!(CountryCode::parse("D1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    /// Parse a `CountryCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input (after trimming) is empty, not exactly
    /// two characters, or contains non-ASCII-alphabetic characters.
    pub fn parse(s: &str) -> Result<Self, CountryCodeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CountryCodeError::Empty);
        }
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(CountryCodeError::WrongLength { len: s.len() });
        }
        let mut code = [0u8; 2];
        for (slot, &b) in code.iter_mut().zip(bytes) {
            if !b.is_ascii_alphabetic() {
                return Err(CountryCodeError::NotAlphabetic);
            }
            *slot = b.to_ascii_uppercase();
        }
        Ok(Self(code))
    }

    /// Returns the country code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Always two ASCII uppercase letters by construction
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CountryCode {
    type Err = CountryCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = CountryCodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.as_str().to_owned()
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
