//! Code value object and batch generation.
//!
//! A code is `FFFFFF SSS TTTT C`: a 6-digit fixed part, a 3-digit serial, a
//! 4-digit ticket and a GS1 Mod-10 check digit over the first 13 digits.

mod generator;
mod tickets;

pub use generator::{generate_all, CodeGenerator};
pub use tickets::{OsTicketSource, TicketSource};

use crate::checksum::weighted_check_digit;
use crate::error::InputValidationError;
use std::fmt;
use std::ops::RangeInclusive;

/// Number of digits in the caller-supplied fixed part.
pub const FIXED_PART_LEN: usize = 6;
/// Total length of a canonical code.
pub const CODE_LEN: usize = 14;
/// Largest serial that fits the 3-digit field.
pub const MAX_SERIAL: u32 = 999;
/// Inclusive range tickets are drawn from.
pub const TICKET_RANGE: RangeInclusive<u16> = 116..=951;

/// A 14-digit code. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code {
    text: String,
}

impl Code {
    /// Assemble a code from validated parts and append its check digit.
    pub(crate) fn assemble(fixed_part: &str, serial: u32, ticket: u16) -> Self {
        let mut text = format!("{}{:03}{:04}", fixed_part, serial, ticket);
        let check = weighted_check_digit(text.as_bytes());
        text.push(char::from(b'0' + check));
        Code { text }
    }

    /// Parse a full 14-digit code and verify its check digit.
    pub fn parse(s: &str) -> Result<Self, InputValidationError> {
        if s.len() != CODE_LEN {
            return Err(InputValidationError::CodeLength(s.to_string()));
        }
        if !is_well_formed(s) {
            return Err(InputValidationError::NotDigits(s.to_string()));
        }
        let bytes = s.as_bytes();
        let expected = weighted_check_digit(&bytes[..CODE_LEN - 1]);
        let found = bytes[CODE_LEN - 1] - b'0';
        if expected != found {
            return Err(InputValidationError::CheckDigitMismatch {
                code: s.to_string(),
                expected,
                found,
            });
        }
        Ok(Code {
            text: s.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn fixed_part(&self) -> &str {
        &self.text[..6]
    }

    pub fn serial(&self) -> u32 {
        digits_value(&self.text[6..9])
    }

    pub fn ticket(&self) -> u16 {
        digits_value(&self.text[9..13]) as u16
    }

    pub fn check_digit(&self) -> u8 {
        self.text.as_bytes()[13] - b'0'
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// True if `s` has the canonical shape: exactly 14 ASCII digits.
/// Does not verify the check digit.
pub fn is_well_formed(s: &str) -> bool {
    s.len() == CODE_LEN && s.bytes().all(|b| b.is_ascii_digit())
}

fn digits_value(s: &str) -> u32 {
    s.bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}
