//! Strategy selection.
//!
//! Selection is behind a trait so tests (and operators, if it comes to
//! that) can force a specific strategy deterministically.

use rand::Rng;

/// Picks which of `count` strategies runs today.
pub trait StrategySelector: Send + Sync {
    /// Returns an index in `0..count`. `count` is never zero.
    fn select(&self, count: usize) -> usize;
}

/// Uniformly random selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSelector;

impl StrategySelector for UniformSelector {
    fn select(&self, count: usize) -> usize {
        rand::rng().random_range(0..count)
    }
}

/// Always selects the same index (clamped to range). For tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedSelector(pub usize);

impl StrategySelector for FixedSelector {
    fn select(&self, count: usize) -> usize {
        self.0.min(count.saturating_sub(1))
    }
}
