//! Diagnostics for dependency constraints no working-set revision satisfies.

use kudzu_core::descriptor::{DependencyConstraint, ModuleDescriptor};

/// Callback invoked when a module is present in the working set but none of
/// its revisions satisfies a dependent's constraint.
///
/// Purely diagnostic: the sorter omits the edge and continues either way.
/// Called once per (constraint, candidate) pair.
pub trait NonMatchingVersionReporter {
    fn report(&self, constraint: &DependencyConstraint, candidate: &ModuleDescriptor);
}

/// Discards non-matching-version notices.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNonMatchingVersionReporter;

impl NonMatchingVersionReporter for SilentNonMatchingVersionReporter {
    fn report(&self, _constraint: &DependencyConstraint, _candidate: &ModuleDescriptor) {}
}

/// Logs each non-matching-version notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarnNonMatchingVersionReporter;

impl NonMatchingVersionReporter for WarnNonMatchingVersionReporter {
    fn report(&self, constraint: &DependencyConstraint, candidate: &ModuleDescriptor) {
        tracing::warn!(
            "dependency on {};{} does not match {} present in the set to sort",
            constraint.target,
            constraint.revision,
            candidate.revision_id(),
        );
    }
}
