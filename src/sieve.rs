use std::fmt;

use crate::estimate;
use crate::ring::{Deposit, FactorRing};
use crate::window::RankWindow;

/// Terminal failures of one enumeration run. All three abort the invocation
/// before any further output; none is retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Caller contract violation: empty or inverted window. Raised before
    /// any allocation.
    InvalidWindow { start: u64, end: u64 },
    /// The estimator cannot bound the requested rank within the 64-bit
    /// domain.
    RankTooLarge(u64),
    /// The factor ring for this rank would exceed allocatable memory.
    ResourceExhausted { width: u64 },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidWindow { start, end } => {
                write!(f, "invalid rank window [{}, {}]", start, end)
            }
            EngineError::RankTooLarge(n) => write!(f, "value {} too large", n),
            EngineError::ResourceExhausted { width } => {
                write!(f, "cannot allocate a sieve ring of {} slots", width)
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Mutable state of the streaming phase: the odd number under the cursor,
/// its ring slot, and how many primes have been counted so far. Rank 1
/// (the prime 2) is counted before the odd stream begins.
struct StreamCursor {
    number: u64,
    index: usize,
    seen: u64,
}

/// Lazy, strictly rank-ordered stream of `(rank, prime)` pairs inside one
/// window. Owns its factor ring for the duration of the run; nothing is
/// buffered beyond the ring.
pub struct PrimeStream {
    ring: FactorRing,
    cursor: StreamCursor,
    window: RankWindow,
    sqrt_bound: u32,
    /// Factors whose scheduling walk was pushed a full lap ahead of the
    /// cursor, keyed by the odd number they mark. Rare (a handful per tens
    /// of thousands of ranks); drained as the cursor reaches each number.
    deferred: Vec<(u64, u32)>,
    pending_two: bool,
    done: bool,
}

/// Wrap-around sieve of Eratosthenes over the rank window.
///
/// Bounds the window's last prime with the analytic estimator, then streams
/// consecutive odd numbers through a circular factor buffer:
/// - a zero slot means the number under the cursor is prime; if it is
///   <= sqrt(bound) its first odd multiple is scheduled into the ring
/// - a nonzero slot means composite; the stored smallest prime factor is
///   rescheduled at its next odd multiple and the slot is recycled
///
/// Memory stays O(sqrt(bound)) instead of O(bound): the ring is the next
/// power of two >= 2 * sqrt(bound) slots of 4 bytes. A scheduling walk that
/// collisions push a full lap ahead of the cursor is not written into the
/// ring (the write would wrap onto a slot meaning an earlier number); the
/// factor is parked in a small by-value list and applied when its number
/// comes due. The stream ends the instant the window's last rank has been
/// emitted.
pub fn stream_primes(window: RankWindow) -> Result<PrimeStream, EngineError> {
    if window.start == 0 || window.end == 0 || window.start > window.end {
        return Err(EngineError::InvalidWindow {
            start: window.start,
            end: window.end,
        });
    }

    let bound =
        estimate::estimate_bound(window.end).ok_or(EngineError::RankTooLarge(window.end))?;
    let sqrt_bound = estimate::integer_square_root(bound);

    let width = FactorRing::width_for(sqrt_bound);
    let ring = FactorRing::new(width).ok_or(EngineError::ResourceExhausted { width })?;

    Ok(PrimeStream {
        ring,
        cursor: StreamCursor {
            number: 1,
            index: 0,
            seen: 1,
        },
        window,
        sqrt_bound,
        deferred: Vec::new(),
        pending_two: window.start == 1,
        done: false,
    })
}

impl PrimeStream {
    /// Width of the underlying factor ring, in slots.
    pub fn ring_width(&self) -> usize {
        self.ring.width()
    }

    /// Schedules the next multiple of `factor` from the cursor position,
    /// parking it by value when the walk cannot place it within one lap.
    fn schedule(&mut self, factor: u32) {
        match self.ring.deposit(self.cursor.index, factor) {
            Deposit::Placed => {}
            Deposit::Deferred { factor, offset } => {
                self.deferred.push((self.cursor.number + 2 * offset, factor));
            }
        }
    }
}

impl Iterator for PrimeStream {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<(u64, u64)> {
        if self.done {
            return None;
        }
        if self.pending_two {
            self.pending_two = false;
            if self.window.end == 1 {
                self.done = true;
            }
            return Some((1, 2));
        }

        loop {
            self.cursor.index = self.ring.advance(self.cursor.index);
            self.cursor.number += 2;

            let mut composite = false;
            if self.ring.get(self.cursor.index) != 0 {
                // Composite: push its smallest prime factor forward to the
                // next multiple; the slot is free again for a later number.
                composite = true;
                let factor = self.ring.take(self.cursor.index);
                self.schedule(factor);
            }
            if !self.deferred.is_empty() {
                // Parked marks come due by value, immune to ring wrap.
                let mut i = 0;
                while i < self.deferred.len() {
                    if self.deferred[i].0 == self.cursor.number {
                        composite = true;
                        let (_, factor) = self.deferred.swap_remove(i);
                        self.schedule(factor);
                    } else {
                        i += 1;
                    }
                }
            }
            if composite {
                continue;
            }

            // Unmarked slot and no parked mark: the number is prime.
            self.cursor.seen += 1;
            if self.cursor.number <= u64::from(self.sqrt_bound) {
                // Small enough to be the least factor of a composite still
                // ahead; schedule its first odd multiple.
                let factor = self.cursor.number as u32;
                self.schedule(factor);
            }
            if self.cursor.seen == self.window.end {
                self.done = true;
            }
            if self.window.contains(self.cursor.seen) {
                return Some((self.cursor.seen, self.cursor.number));
            }
        }
    }
}
