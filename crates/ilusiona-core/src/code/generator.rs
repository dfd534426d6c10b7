//! Lazy, finite code generator.

use super::{Code, TicketSource, MAX_SERIAL, TICKET_RANGE};
use crate::config::BatchConfig;
use crate::error::GenerateError;

/// Yields `quantity` codes with consecutive serials starting at `start_serial`.
///
/// If a serial would exceed 999 the generator yields a single
/// `GenerateError::RangeExceeded` for it and then ends; codes already yielded
/// are unaffected.
pub struct CodeGenerator<T> {
    fixed_part: String,
    next_serial: u32,
    remaining: u32,
    tickets: T,
}

impl<T: TicketSource> CodeGenerator<T> {
    pub fn new(batch: &BatchConfig, tickets: T) -> Self {
        Self {
            fixed_part: batch.fixed_part().to_string(),
            next_serial: batch.start_serial(),
            remaining: batch.quantity(),
            tickets,
        }
    }
}

impl<T: TicketSource> Iterator for CodeGenerator<T> {
    type Item = Result<Code, GenerateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let serial = self.next_serial;
        if serial > MAX_SERIAL {
            self.remaining = 0;
            tracing::warn!(serial, "serial range exceeded; stopping generation");
            return Some(Err(GenerateError::RangeExceeded { serial }));
        }
        self.remaining -= 1;
        self.next_serial += 1;

        let ticket = self.tickets.draw(TICKET_RANGE);
        debug_assert!(TICKET_RANGE.contains(&ticket));
        Some(Ok(Code::assemble(&self.fixed_part, serial, ticket)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining as usize))
    }
}

/// Generate the whole batch, stopping at the first range error.
pub fn generate_all<T: TicketSource>(
    batch: &BatchConfig,
    tickets: T,
) -> Result<Vec<Code>, GenerateError> {
    let codes = CodeGenerator::new(batch, tickets).collect::<Result<Vec<_>, _>>()?;
    tracing::info!(
        count = codes.len(),
        fixed_part = batch.fixed_part(),
        start_serial = batch.start_serial(),
        "generated codes"
    );
    Ok(codes)
}
