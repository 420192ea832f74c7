//! ## studiegang-core::term
//! **Academic term cycle & semester calendar**
//!
//! The academic year cycles Fall → Spring → Summer. Students are admitted in
//! any of the three terms and their personal term sequence rotates from the
//! admission term onward.
//!
//! The `AcademicCalendar` is the simulation's shared semester counter, a
//! lock-free atomic adapted for discrete semester steps rather than wall time.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Academic term within a year, in session order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Fall,
    Spring,
    Summer,
}

impl Term {
    pub const CYCLE: [Term; 3] = [Term::Fall, Term::Spring, Term::Summer];

    /// Position of this term within the yearly cycle.
    fn index(self) -> u32 {
        match self {
            Term::Fall => 0,
            Term::Spring => 1,
            Term::Summer => 2,
        }
    }

    /// The term in session `n` terms after this one.
    pub fn advance(self, n: u32) -> Term {
        Term::CYCLE[((self.index() + n) % 3) as usize]
    }

    /// The term in session during a student's `semester` (1-based), rotating
    /// from their admission term.
    pub fn for_semester(admission: Term, semester: u32) -> Term {
        admission.advance(semester.saturating_sub(1))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Term::Fall => "Fall",
            Term::Spring => "Spring",
            Term::Summer => "Summer",
        };
        f.write_str(name)
    }
}

/// Shared semester counter for deterministic simulation.
///
/// Starts at zero (no semester in session); the model advances it once per
/// step so the first simulated semester is 1.
#[derive(Clone, Default)]
pub struct AcademicCalendar {
    semester: Arc<AtomicU64>,
}

impl AcademicCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current semester number (0 before the first step).
    #[inline]
    pub fn current(&self) -> u64 {
        self.semester.load(Ordering::Acquire)
    }

    /// Advances the calendar by one semester and returns the new value.
    #[inline]
    pub fn advance(&self) -> u64 {
        self.semester.fetch_add(1, Ordering::Release) + 1
    }
}
