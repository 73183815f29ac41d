//! Dependency-graph construction and topological ordering of module
//! descriptors.

use std::collections::HashMap;

use kudzu_core::descriptor::ModuleDescriptor;
use kudzu_core::module_id::ModuleRevisionId;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::circular::{CircularDependencyPolicy, CycleAction};
use crate::errors::SortError;
use crate::report::NonMatchingVersionReporter;
use crate::version::RevisionMatcher;

/// Sorts module descriptors from the less dependent to the more dependent.
///
/// The dependency graph is implicit: an edge exists from a descriptor to
/// every working-set descriptor its constraints designate, with the
/// revision matcher deciding per candidate whether the constraint is
/// satisfied. Constraints pointing outside the working set produce no edge
/// and no error.
pub struct DescriptorSorter<'a> {
    matcher: &'a dyn RevisionMatcher,
    reporter: &'a dyn NonMatchingVersionReporter,
    policy: &'a dyn CircularDependencyPolicy,
}

/// Traversal state of one descriptor during the sort pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// One entry of the explicit DFS stack: a node and its remaining targets.
struct Frame {
    node: NodeIndex,
    targets: Vec<NodeIndex>,
    next: usize,
}

enum Step {
    Visit(NodeIndex),
    Finish(NodeIndex),
}

impl<'a> DescriptorSorter<'a> {
    pub fn new(
        matcher: &'a dyn RevisionMatcher,
        reporter: &'a dyn NonMatchingVersionReporter,
        policy: &'a dyn CircularDependencyPolicy,
    ) -> Self {
        Self {
            matcher,
            reporter,
            policy,
        }
    }

    /// Sort the working set so that every descriptor precedes all
    /// descriptors directly depending on it.
    ///
    /// The output is a permutation of the input; descriptors with no
    /// dependency relationship keep their input order. Fails only when a
    /// cycle is detected and the policy demands an abort.
    pub fn sort(
        &self,
        descriptors: Vec<ModuleDescriptor>,
    ) -> Result<Vec<ModuleDescriptor>, SortError> {
        let count = descriptors.len();
        tracing::debug!("sorting {count} module descriptors");

        let graph = self.build_graph(&descriptors);
        let order = self.visit_all(&graph, &descriptors)?;

        let mut slots: Vec<Option<ModuleDescriptor>> =
            descriptors.into_iter().map(Some).collect();
        let mut sorted = Vec::with_capacity(count);
        for position in order {
            if let Some(descriptor) = slots[position].take() {
                sorted.push(descriptor);
            }
        }
        Ok(sorted)
    }

    /// Resolve every declared constraint against the working set and record
    /// the resulting edges. Node `i` is the descriptor at input position `i`.
    fn build_graph(&self, descriptors: &[ModuleDescriptor]) -> DiGraph<(), ()> {
        let mut graph: DiGraph<(), ()> = DiGraph::with_capacity(descriptors.len(), 0);
        for _ in descriptors {
            graph.add_node(());
        }

        // Working-set index by organisation and name; branch filtering
        // happens per constraint.
        let mut by_module: HashMap<(&str, &str), Vec<usize>> = HashMap::new();
        for (position, descriptor) in descriptors.iter().enumerate() {
            let module = descriptor.module();
            by_module
                .entry((module.organisation.as_str(), module.name.as_str()))
                .or_default()
                .push(position);
        }

        for (position, descriptor) in descriptors.iter().enumerate() {
            for constraint in descriptor.dependencies() {
                let key = (
                    constraint.target.organisation.as_str(),
                    constraint.target.name.as_str(),
                );
                let Some(entries) = by_module.get(&key) else {
                    // Dependency external to the working set: no edge.
                    continue;
                };
                let candidates: Vec<usize> = entries
                    .iter()
                    .copied()
                    .filter(|&c| constraint.target.designates(descriptors[c].module()))
                    .collect();
                if candidates.is_empty() {
                    continue;
                }

                let mut matched = false;
                for &candidate in &candidates {
                    let revision = descriptors[candidate].revision();
                    if constraint.revision == revision
                        || self.matcher.matches(&constraint.revision, revision)
                    {
                        add_edge_once(
                            &mut graph,
                            NodeIndex::new(position),
                            NodeIndex::new(candidate),
                        );
                        matched = true;
                    }
                }
                if !matched {
                    for &candidate in &candidates {
                        self.reporter.report(constraint, &descriptors[candidate]);
                    }
                }
            }
        }

        graph
    }

    /// Iterative depth-first traversal over the whole working set.
    ///
    /// Returns the post-order of input positions: every position appears
    /// after all positions it depends on, modulo broken cycle edges.
    fn visit_all(
        &self,
        graph: &DiGraph<(), ()>,
        descriptors: &[ModuleDescriptor],
    ) -> Result<Vec<usize>, SortError> {
        let count = descriptors.len();
        let mut mark = vec![Mark::Unvisited; count];
        let mut order: Vec<usize> = Vec::with_capacity(count);
        // Dependent-to-dependency chain of the nodes currently in progress.
        let mut path: Vec<usize> = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();

        for root in 0..count {
            if mark[root] != Mark::Unvisited {
                continue;
            }
            mark[root] = Mark::InProgress;
            path.push(root);
            stack.push(frame_for(graph, NodeIndex::new(root)));

            while !stack.is_empty() {
                let top = stack.len() - 1;
                let step = {
                    let frame = &mut stack[top];
                    if frame.next < frame.targets.len() {
                        let target = frame.targets[frame.next];
                        frame.next += 1;
                        Step::Visit(target)
                    } else {
                        Step::Finish(frame.node)
                    }
                };

                match step {
                    Step::Visit(target) => match mark[target.index()] {
                        Mark::Unvisited => {
                            mark[target.index()] = Mark::InProgress;
                            path.push(target.index());
                            stack.push(frame_for(graph, target));
                        }
                        Mark::InProgress => {
                            // The slice of the current path from the target
                            // onward is the cycle; the edge just taken closes
                            // it back on the target.
                            let start = path
                                .iter()
                                .position(|&p| p == target.index())
                                .unwrap_or(0);
                            let cycle: Vec<ModuleRevisionId> = path[start..]
                                .iter()
                                .map(|&p| descriptors[p].revision_id().clone())
                                .collect();
                            match self.policy.on_cycle(&cycle) {
                                CycleAction::Abort => {
                                    return Err(SortError::CircularDependency { cycle });
                                }
                                // Closing edge dropped, sort continues.
                                CycleAction::Continue => {}
                            }
                        }
                        Mark::Done => {}
                    },
                    Step::Finish(node) => {
                        mark[node.index()] = Mark::Done;
                        order.push(node.index());
                        path.pop();
                        stack.pop();
                    }
                }
            }
        }

        Ok(order)
    }
}

fn add_edge_once(graph: &mut DiGraph<(), ()>, from: NodeIndex, to: NodeIndex) {
    if !graph.edges(from).any(|e| e.target() == to) {
        graph.add_edge(from, to, ());
    }
}

/// Targets collected in edge-insertion order, i.e. constraint declaration
/// order (petgraph iterates neighbors most-recent-first).
fn frame_for(graph: &DiGraph<(), ()>, node: NodeIndex) -> Frame {
    let mut targets: Vec<NodeIndex> = graph.neighbors(node).collect();
    targets.reverse();
    Frame {
        node,
        targets,
        next: 0,
    }
}
