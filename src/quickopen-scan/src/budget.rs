//! Result budget for a single scan.

/// Cap applied when the caller asks for zero, a negative number or nothing.
pub const DEFAULT_MAX_LOAD: usize = 1000;

/// Remaining result slots for one walk.
///
/// The budget only ever goes down. Once it reaches zero the walker stops
/// adding files anywhere in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanBudget {
    limit: usize,
    remaining: usize,
}

impl ScanBudget {
    /// Creates a budget with `limit` slots.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            remaining: limit,
        }
    }

    /// Creates a budget from caller input, falling back to `default` for
    /// absent or non-positive values.
    pub fn from_max_load(max_load: Option<i64>, default: usize) -> Self {
        let limit = max_load
            .filter(|&n| n > 0)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(default);
        Self::new(limit)
    }

    /// Takes one slot. Returns `false` when none is left.
    pub fn try_consume(&mut self) -> bool {
        match self.remaining.checked_sub(1) {
            Some(rest) => {
                self.remaining = rest;
                true
            }
            None => false,
        }
    }

    /// Returns whether every slot has been used.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// The number of slots the budget started with.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Slots still available.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Slots used so far.
    pub fn consumed(&self) -> usize {
        self.limit - self.remaining
    }
}

impl Default for ScanBudget {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LOAD)
    }
}
