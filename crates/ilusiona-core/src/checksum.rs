//! GS1 Mod-10 check digit.
//!
//! Weights alternate 3,1,3,1,... starting from the rightmost digit; the check
//! digit is `(10 - sum % 10) % 10`. The rendering service expects exactly this
//! convention.

use crate::error::InputValidationError;

/// Compute the GS1 Mod-10 check digit over `digits`.
///
/// `digits` must be a non-empty string of ASCII digits.
pub fn compute_check_digit(digits: &str) -> Result<u8, InputValidationError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputValidationError::NotDigits(digits.to_string()));
    }
    Ok(weighted_check_digit(digits.as_bytes()))
}

/// Same as `compute_check_digit` for input already known to be ASCII digits.
pub(crate) fn weighted_check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let weight = if i % 2 == 0 { 3 } else { 1 };
            u32::from(b - b'0') * weight
        })
        .sum();
    ((10 - sum % 10) % 10) as u8
}
