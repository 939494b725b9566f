//! Seed sequencing.
//!
//! Every generated puzzle consumes exactly one seed, handed out in generation
//! order: the N-th puzzle of a run (counting across all subjects) gets
//! `initial + N`. Default seeds are derived from the calendar date and
//! scaled by 10 000 so one day's run can never reach the next day's start.

use chrono::{Datelike, NaiveDate};

/// Headroom between the starting seeds of consecutive days.
pub const SEEDS_PER_DAY: u64 = 10_000;

/// Default starting seed for a run on `date`: `YYMMDD * 10000`.
///
/// Dates before 2000 have no meaningful `YY` and map to zero.
pub fn date_seed(date: NaiveDate) -> u64 {
    let yymmdd = (i64::from(date.year()) - 2000) * 10_000
        + i64::from(date.month()) * 100
        + i64::from(date.day());
    u64::try_from(yymmdd).unwrap_or(0) * SEEDS_PER_DAY
}

/// Monotonic seed counter for one run.
#[derive(Debug, Clone)]
pub struct SeedSequencer {
    initial: u64,
    next: u64,
}

impl SeedSequencer {
    pub fn new(initial: u64) -> Self {
        Self {
            initial,
            next: initial,
        }
    }

    /// Return the current seed and advance the counter.
    ///
    /// `None` once the counter cannot advance without overflowing.
    pub fn next_seed(&mut self) -> Option<u64> {
        let seed = self.next;
        self.next = seed.checked_add(1)?;
        Some(seed)
    }

    /// Whether `n` more seeds can be issued.
    pub fn has_room(&self, n: u64) -> bool {
        self.next.checked_add(n).is_some()
    }

    /// Number of seeds handed out so far.
    pub fn issued(&self) -> u64 {
        self.next - self.initial
    }

    pub fn initial(&self) -> u64 {
        self.initial
    }

    /// The seed the next call to [`next_seed`](Self::next_seed) returns.
    pub fn peek(&self) -> u64 {
        self.next
    }
}
