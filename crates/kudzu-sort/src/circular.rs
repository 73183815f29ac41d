//! Pluggable responses to a detected circular dependency.

use kudzu_core::module_id::ModuleRevisionId;

use crate::errors::render_cycle;

/// What the sorter should do after a cycle has been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleAction {
    /// Stop sorting and fail with the cycle.
    Abort,
    /// Drop the edge that would have closed the cycle and carry on.
    Continue,
}

/// Decides the outcome of a detected circular dependency.
///
/// The cycle is the ordered identity chain: each module depends on the
/// next, and the last depends on the first. Implementations must be fast
/// synchronous hooks; they are called from inside the sort pass.
pub trait CircularDependencyPolicy {
    fn on_cycle(&self, cycle: &[ModuleRevisionId]) -> CycleAction;
}

/// Abort the sort with a [`SortError`](crate::SortError).
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorCircularPolicy;

impl CircularDependencyPolicy for ErrorCircularPolicy {
    fn on_cycle(&self, _cycle: &[ModuleRevisionId]) -> CycleAction {
        CycleAction::Abort
    }
}

/// Log the cycle and break it at the closing edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarnCircularPolicy;

impl CircularDependencyPolicy for WarnCircularPolicy {
    fn on_cycle(&self, cycle: &[ModuleRevisionId]) -> CycleAction {
        tracing::warn!("circular dependency found: {}", render_cycle(cycle));
        CycleAction::Continue
    }
}

/// Break the cycle silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreCircularPolicy;

impl CircularDependencyPolicy for IgnoreCircularPolicy {
    fn on_cycle(&self, _cycle: &[ModuleRevisionId]) -> CycleAction {
        CycleAction::Continue
    }
}
