//! Airport code types.

use std::fmt;

/// Error returned when parsing an invalid airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport code: {reason}")]
pub struct InvalidAirportCode {
    reason: &'static str,
}

/// Canonicalize user-supplied airport code input.
///
/// Strips all whitespace (leading, trailing and internal) and uppercases
/// the remainder. The result is not guaranteed to be a valid code; pass it
/// to [`AirportCode::parse`] for that.
///
/// ```
/// use flight_server::domain::canonicalize;
///
/// assert_eq!(canonicalize(" jfk "), "JFK");
/// assert_eq!(canonicalize("l a x"), "LAX");
/// ```
pub fn canonicalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// A valid 3-letter IATA airport code.
///
/// Codes are always 3 uppercase ASCII letters. Any `AirportCode` value is
/// valid by construction.
///
/// # Examples
///
/// ```
/// use flight_server::domain::AirportCode;
///
/// let jfk = AirportCode::parse("JFK").unwrap();
/// assert_eq!(jfk.as_str(), "JFK");
///
/// // Lowercase is rejected by the strict parser...
/// assert!(AirportCode::parse("jfk").is_err());
/// // ...but accepted after normalization.
/// assert_eq!(AirportCode::parse_normalized(" jfk").unwrap(), jfk);
///
/// assert!(AirportCode::parse("JF").is_err());
/// assert!(AirportCode::parse("JFKX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AirportCode([u8; 3]);

impl AirportCode {
    /// Parse an airport code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidAirportCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidAirportCode {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidAirportCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(AirportCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Canonicalize then parse.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidAirportCode> {
        Self::parse(&canonicalize(s))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.as_str())
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Canonicalizing twice is the same as once
        #[test]
        fn canonicalize_idempotent(s in "[ a-zA-Z0-9\t]{0,12}") {
            let once = canonicalize(&s);
            prop_assert_eq!(canonicalize(&once), once);
        }

        /// Case does not matter for ASCII codes
        #[test]
        fn canonicalize_case_insensitive(s in "[a-zA-Z]{3}") {
            prop_assert_eq!(canonicalize(&s.to_lowercase()), canonicalize(&s.to_uppercase()));
        }

        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in "[A-Z]{3}") {
            let code = AirportCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Lowercase letters are always rejected by the strict parser
        #[test]
        fn lowercase_rejected(s in "[a-z]{3}") {
            prop_assert!(AirportCode::parse(&s).is_err());
        }

        /// ...and always accepted after normalization
        #[test]
        fn lowercase_normalized(s in "[a-z]{3}") {
            prop_assert!(AirportCode::parse_normalized(&s).is_ok());
        }

        /// Wrong-length strings are always rejected
        #[test]
        fn wrong_length_rejected(s in "[A-Z]{0,2}|[A-Z]{4,10}") {
            prop_assert!(AirportCode::parse(&s).is_err());
        }
    }
}
