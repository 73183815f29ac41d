//! Module ordering engine for Kudzu.
//!
//! Sorts a working set of module descriptors from the less dependent to the
//! more dependent: every module appears before all modules that directly
//! depend on it. Dependency edges are resolved against the working set
//! through a pluggable [`RevisionMatcher`](version::RevisionMatcher), and
//! circular dependencies are handled by a pluggable
//! [`CircularDependencyPolicy`](circular::CircularDependencyPolicy).
//!
//! Entry point for callers is [`engine::SortEngine`], which also adapts
//! resolved-node collections (descriptor-less entries included) to the
//! descriptor sorter.

pub mod circular;
pub mod engine;
pub mod errors;
pub mod report;
pub mod sorter;
pub mod version;

pub use circular::{
    CircularDependencyPolicy, CycleAction, ErrorCircularPolicy, IgnoreCircularPolicy,
    WarnCircularPolicy,
};
pub use engine::{SortEngine, SortableNode};
pub use errors::SortError;
pub use report::{
    NonMatchingVersionReporter, SilentNonMatchingVersionReporter, WarnNonMatchingVersionReporter,
};
pub use sorter::DescriptorSorter;
pub use version::{ExactRevisionMatcher, PatternRevisionMatcher, RevisionMatcher};
