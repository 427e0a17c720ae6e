//! Access codes.
//!
//! An access code is the human-readable credential handed to a registrant:
//! eight symbols drawn uniformly from `A-Z0-9`, written `XXXX-XXXX`. The
//! space of 36^8 (~2.8 trillion) combinations makes collisions rare but not
//! impossible — the store enforces uniqueness and the issuer redraws on
//! conflict.

use std::fmt;

use rand::random_range;

use crate::error::CodeError;

/// The 36-symbol alphabet codes are drawn from.
pub const CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Total length of a formatted code: eight symbols plus one separator.
const CODE_LEN: usize = 9;

/// Position of the separating hyphen.
const SEPARATOR_AT: usize = 4;

/// A validated access code in canonical `XXXX-XXXX` form.
///
/// Construction goes through [`generate`](AccessCode::generate) or
/// [`parse`](AccessCode::parse), so holding an `AccessCode` means holding a
/// well-formed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCode(String);

impl AccessCode {
    /// Draw a fresh code: eight independent uniform samples from
    /// [`CODE_ALPHABET`], formatted as `AAAA-BBBB`.
    #[must_use]
    pub fn generate() -> Self {
        let mut out = String::with_capacity(CODE_LEN);
        for i in 0..CODE_LEN {
            if i == SEPARATOR_AT {
                out.push('-');
            } else {
                out.push(char::from(CODE_ALPHABET[random_range(0..CODE_ALPHABET.len())]));
            }
        }
        Self(out)
    }

    /// Parse a string in canonical issued form.
    ///
    /// # Errors
    ///
    /// Returns [`CodeError`] unless the input is exactly four `A-Z0-9`
    /// symbols, a hyphen, then four more.
    pub fn parse(candidate: &str) -> Result<Self, CodeError> {
        let bytes = candidate.as_bytes();
        let well_formed = bytes.len() == CODE_LEN
            && bytes.iter().enumerate().all(|(i, &b)| {
                if i == SEPARATOR_AT {
                    b == b'-'
                } else {
                    b.is_ascii_uppercase() || b.is_ascii_digit()
                }
            });

        if well_formed {
            Ok(Self(candidate.to_owned()))
        } else {
            Err(CodeError)
        }
    }

    /// The loose screen applied to verification input: nine characters, each
    /// `A-Z`, `0-9`, or `-`.
    ///
    /// This deliberately admits more than [`parse`](AccessCode::parse) does —
    /// a code that passes here may still match no registration, which the
    /// lookup reports as not-found rather than a format problem.
    #[must_use]
    pub fn plausible(candidate: &str) -> bool {
        let bytes = candidate.as_bytes();
        bytes.len() == CODE_LEN
            && bytes
                .iter()
                .all(|&b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-')
    }

    /// View the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_canonical() {
        for _ in 0..200 {
            let code = AccessCode::generate();
            let s = code.as_str();
            assert_eq!(s.len(), 9);
            assert_eq!(&s[4..5], "-");
            assert!(AccessCode::parse(s).is_ok(), "not canonical: {s}");
            assert!(AccessCode::plausible(s));
        }
    }

    #[test]
    fn generated_symbols_stay_in_alphabet() {
        for _ in 0..200 {
            let code = AccessCode::generate();
            for (i, b) in code.as_str().bytes().enumerate() {
                if i == 4 {
                    assert_eq!(b, b'-');
                } else {
                    assert!(CODE_ALPHABET.contains(&b));
                }
            }
        }
    }

    #[test]
    fn parse_accepts_canonical_form() {
        assert!(AccessCode::parse("7QX9-2KLM").is_ok());
        assert!(AccessCode::parse("AAAA-0000").is_ok());
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for bad in [
            "",
            "7QX92KLM",    // no separator
            "7qx9-2klm",   // lowercase
            "7QX9-2KLMX",  // too long
            "7QX-92KLM",   // separator misplaced
            "7QX9 2KLM",   // wrong separator
            "7QX9-2KL",    // too short
        ] {
            assert!(AccessCode::parse(bad).is_err(), "accepted: {bad}");
        }
    }

    #[test]
    fn plausible_is_looser_than_parse() {
        // Nine alphanumerics with no hyphen pass the screen but not parse.
        assert!(AccessCode::plausible("ABCDE1234"));
        assert!(AccessCode::parse("ABCDE1234").is_err());
    }

    #[test]
    fn plausible_rejects_out_of_class_input() {
        assert!(!AccessCode::plausible("BAD"));
        assert!(!AccessCode::plausible("abcd-1234"));
        assert!(!AccessCode::plausible("ABCD-12345"));
        assert!(!AccessCode::plausible("ABCD_1234"));
        assert!(!AccessCode::plausible(""));
    }
}
