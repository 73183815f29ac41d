//! Sort entry point: engine configuration and the resolved-node facade.

use std::collections::HashMap;

use kudzu_core::descriptor::ModuleDescriptor;
use kudzu_core::node::ResolvedNode;

use crate::circular::{CircularDependencyPolicy, WarnCircularPolicy};
use crate::errors::SortError;
use crate::report::{NonMatchingVersionReporter, SilentNonMatchingVersionReporter};
use crate::sorter::DescriptorSorter;
use crate::version::{PatternRevisionMatcher, RevisionMatcher};

/// Anything the node facade can sort: a resolution-result entry wrapping a
/// possibly-absent module descriptor. The rest of the entry is opaque to
/// the engine.
pub trait SortableNode {
    fn descriptor(&self) -> Option<&ModuleDescriptor>;
}

impl SortableNode for ResolvedNode {
    fn descriptor(&self) -> Option<&ModuleDescriptor> {
        self.descriptor.as_ref()
    }
}

/// Sorts module descriptors and resolved nodes from the less dependent to
/// the more dependent.
///
/// Holds the revision matcher and circular dependency policy shared by all
/// sort calls; both default to the tool-wide defaults (pattern matching,
/// warn-and-break on cycles) and can be swapped by configuration.
pub struct SortEngine {
    matcher: Box<dyn RevisionMatcher>,
    policy: Box<dyn CircularDependencyPolicy>,
}

impl Default for SortEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SortEngine {
    pub fn new() -> Self {
        Self {
            matcher: Box::new(PatternRevisionMatcher),
            policy: Box::new(WarnCircularPolicy),
        }
    }

    pub fn set_revision_matcher(&mut self, matcher: Box<dyn RevisionMatcher>) {
        self.matcher = matcher;
    }

    pub fn set_circular_policy(&mut self, policy: Box<dyn CircularDependencyPolicy>) {
        self.policy = policy;
    }

    /// Sort a working set of module descriptors.
    ///
    /// The result contains every input descriptor exactly once, each one
    /// placed before all descriptors directly depending on it. The reporter
    /// is notified of constraints no working-set revision satisfies.
    pub fn sort_descriptors(
        &self,
        descriptors: Vec<ModuleDescriptor>,
        reporter: &dyn NonMatchingVersionReporter,
    ) -> Result<Vec<ModuleDescriptor>, SortError> {
        DescriptorSorter::new(self.matcher.as_ref(), reporter, self.policy.as_ref())
            .sort(descriptors)
    }

    /// Sort resolved nodes by the dependency order of their descriptors,
    /// discarding non-matching-version notices.
    pub fn sort_nodes<N: SortableNode>(&self, nodes: Vec<N>) -> Result<Vec<N>, SortError> {
        self.sort_nodes_with_reporter(nodes, &SilentNonMatchingVersionReporter)
    }

    /// Sort resolved nodes, routing non-matching-version notices to the
    /// given reporter.
    ///
    /// Nodes sharing a descriptor stay contiguous and in input order; nodes
    /// without a descriptor lead the result in input order. The sort itself
    /// runs on the distinct descriptors only.
    pub fn sort_nodes_with_reporter<N: SortableNode>(
        &self,
        nodes: Vec<N>,
        reporter: &dyn NonMatchingVersionReporter,
    ) -> Result<Vec<N>, SortError> {
        let mut no_descriptor: Vec<N> = Vec::new();
        let mut groups: HashMap<ModuleDescriptor, Vec<N>> = HashMap::new();
        // First-seen order of the distinct descriptors: the working set the
        // sorter receives, and the tie-break order of its output.
        let mut working_set: Vec<ModuleDescriptor> = Vec::new();

        for node in nodes {
            let Some(descriptor) = node.descriptor().cloned() else {
                no_descriptor.push(node);
                continue;
            };
            if !groups.contains_key(&descriptor) {
                working_set.push(descriptor.clone());
            }
            groups.entry(descriptor).or_default().push(node);
        }

        let grouped = groups.values().map(Vec::len).sum::<usize>();
        let sorted_descriptors = self.sort_descriptors(working_set, reporter)?;

        let mut result = Vec::with_capacity(no_descriptor.len() + grouped);
        result.extend(no_descriptor);
        for descriptor in &sorted_descriptors {
            if let Some(group) = groups.remove(descriptor) {
                result.extend(group);
            }
        }
        Ok(result)
    }
}
