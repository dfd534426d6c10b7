//! `ilusiona check` – verify or complete a code's check digit.

use anyhow::{bail, Result};
use ilusiona_core::checksum::compute_check_digit;
use ilusiona_core::code::{Code, CODE_LEN};
use std::process::ExitCode;

/// Describe `input`: a full code for a 13-digit base, or a verdict for 14 digits.
pub fn check_code(input: &str) -> Result<String> {
    let input = input.trim();
    match input.len() {
        n if n == CODE_LEN - 1 => {
            let check = compute_check_digit(input)?;
            Ok(format!("{}{}", input, check))
        }
        CODE_LEN => {
            let code = Code::parse(input)?;
            Ok(format!(
                "OK: {} (fixed {}, serial {:03}, ticket {:04}, check {})",
                code,
                code.fixed_part(),
                code.serial(),
                code.ticket(),
                code.check_digit()
            ))
        }
        n => bail!("expected 13 or 14 digits, got {} characters", n),
    }
}

pub fn run_check(input: &str) -> Result<ExitCode> {
    println!("{}", check_code(input)?);
    Ok(ExitCode::SUCCESS)
}
