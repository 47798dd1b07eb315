//! Feed sequence tracking.
//!
//! Sequenced feeds number every record; a missing number means data was lost
//! in transit and downstream state (the volume book) may be incomplete. The
//! tracker classifies each observed sequence number and accumulates gap and
//! duplicate counters for the stats report.

/// Classification of one observed sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqCheck {
    /// The expected next number.
    InOrder,
    /// Jumped forward — `got - expected` records were missed.
    Gap { expected: u64, got: u64 },
    /// At or below an already-seen number.
    Duplicate,
}

/// Per-feed sequence gap / duplicate detector.
///
/// The first observed number anchors the stream; afterwards each record is
/// expected to carry the previous number plus one.
///
/// # Thread safety
///
/// Not thread-safe. Each book thread owns its own instance.
pub struct SeqTracker {
    next: Option<u64>,
    gaps: u64,
    missed: u64,
    duplicates: u64,
}

impl SeqTracker {
    pub fn new() -> Self {
        Self {
            next: None,
            gaps: 0,
            missed: 0,
            duplicates: 0,
        }
    }

    /// Observe one sequence number and classify it, updating internal state.
    #[inline]
    pub fn observe(&mut self, seq: u64) -> SeqCheck {
        match self.next {
            None => {
                self.next = Some(seq + 1);
                SeqCheck::InOrder
            }
            Some(expected) if seq == expected => {
                self.next = Some(seq + 1);
                SeqCheck::InOrder
            }
            Some(expected) if seq > expected => {
                self.gaps += 1;
                self.missed += seq - expected;
                self.next = Some(seq + 1);
                SeqCheck::Gap { expected, got: seq }
            }
            Some(_) => {
                self.duplicates += 1;
                SeqCheck::Duplicate
            }
        }
    }

    /// Number of gap events seen.
    pub fn gaps(&self) -> u64 {
        self.gaps
    }

    /// Total records missed across all gaps.
    pub fn missed(&self) -> u64 {
        self.missed
    }

    /// Number of duplicate / stale records seen.
    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }

    /// Clear all state.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for SeqTracker {
    fn default() -> Self {
        Self::new()
    }
}
