//! Ticket randomness, injected so tests can script the draws.

use rand::rngs::OsRng;
use rand::Rng;
use std::ops::RangeInclusive;

/// Source of ticket values. Implementations must return a value inside `range`.
pub trait TicketSource {
    fn draw(&mut self, range: RangeInclusive<u16>) -> u16;
}

/// Draws uniformly from the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsTicketSource;

impl TicketSource for OsTicketSource {
    fn draw(&mut self, range: RangeInclusive<u16>) -> u16 {
        OsRng.gen_range(range)
    }
}

impl<F> TicketSource for F
where
    F: FnMut(RangeInclusive<u16>) -> u16,
{
    fn draw(&mut self, range: RangeInclusive<u16>) -> u16 {
        self(range)
    }
}
