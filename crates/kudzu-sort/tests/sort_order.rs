//! End-to-end ordering scenarios through the public engine API.

use kudzu_core::descriptor::{DependencyConstraint, ModuleDescriptor};
use kudzu_core::module_id::{ModuleId, ModuleRevisionId};
use kudzu_core::node::ResolvedNode;
use kudzu_sort::{
    ErrorCircularPolicy, IgnoreCircularPolicy, SilentNonMatchingVersionReporter, SortEngine,
    SortError,
};

fn descriptor(name: &str, revision: &str, deps: &[(&str, &str)]) -> ModuleDescriptor {
    ModuleDescriptor::new(ModuleRevisionId::new(
        ModuleId::new("org.example", name),
        revision,
    ))
    .with_dependencies(
        deps.iter()
            .map(|(target, rev)| {
                DependencyConstraint::new(ModuleId::new("org.example", *target), *rev)
            })
            .collect(),
    )
}

fn position(sorted: &[ModuleDescriptor], name: &str) -> usize {
    sorted
        .iter()
        .position(|d| d.module().name == name)
        .unwrap_or_else(|| panic!("{name} missing from sort result"))
}

#[test]
fn every_dependency_precedes_its_dependents() {
    let engine = SortEngine::new();
    let sorted = engine
        .sort_descriptors(
            vec![
                descriptor("web", "1.0", &[("service", "1.0"), ("util", "1.0")]),
                descriptor("service", "1.0", &[("model", "1.0"), ("util", "1.0")]),
                descriptor("model", "1.0", &[("util", "1.0")]),
                descriptor("util", "1.0", &[]),
            ],
            &SilentNonMatchingVersionReporter,
        )
        .unwrap();

    assert!(position(&sorted, "util") < position(&sorted, "model"));
    assert!(position(&sorted, "model") < position(&sorted, "service"));
    assert!(position(&sorted, "service") < position(&sorted, "web"));
    assert!(position(&sorted, "util") < position(&sorted, "web"));
    assert_eq!(sorted.len(), 4);
}

#[test]
fn dynamic_and_range_constraints_mix() {
    let engine = SortEngine::new();
    let sorted = engine
        .sort_descriptors(
            vec![
                descriptor("app", "1.0", &[("core", "latest.integration")]),
                descriptor("core", "2.3", &[("base", "[1.0,2.0)")]),
                descriptor("base", "1.4", &[]),
                // Outside the range: no edge from core, still in the output.
                descriptor("base", "2.1", &[]),
            ],
            &SilentNonMatchingVersionReporter,
        )
        .unwrap();

    let base_14 = sorted
        .iter()
        .position(|d| d.module().name == "base" && d.revision() == "1.4")
        .unwrap();
    assert!(base_14 < position(&sorted, "core"));
    assert!(position(&sorted, "core") < position(&sorted, "app"));
    assert_eq!(sorted.len(), 4);
}

#[test]
fn error_policy_reports_the_full_chain() {
    let mut engine = SortEngine::new();
    engine.set_circular_policy(Box::new(ErrorCircularPolicy));
    let err = engine
        .sort_descriptors(
            vec![
                descriptor("a", "1.0", &[("b", "1.0")]),
                descriptor("b", "1.0", &[("c", "1.0")]),
                descriptor("c", "1.0", &[("a", "1.0")]),
            ],
            &SilentNonMatchingVersionReporter,
        )
        .unwrap_err();

    let SortError::CircularDependency { cycle } = err.clone();
    assert_eq!(cycle.len(), 3);
    assert!(err.to_string().starts_with("circular dependency found: "));
    assert!(err.to_string().contains("org.example#a;1.0"));
}

#[test]
fn ignore_policy_still_orders_the_acyclic_part() {
    let mut engine = SortEngine::new();
    engine.set_circular_policy(Box::new(IgnoreCircularPolicy));
    let sorted = engine
        .sort_descriptors(
            vec![
                descriptor("cyclic-1", "1.0", &[("cyclic-2", "1.0")]),
                descriptor("cyclic-2", "1.0", &[("cyclic-1", "1.0")]),
                descriptor("apart", "1.0", &[("leaf", "1.0")]),
                descriptor("leaf", "1.0", &[]),
            ],
            &SilentNonMatchingVersionReporter,
        )
        .unwrap();

    // Ordering still holds outside the broken cycle.
    assert!(position(&sorted, "leaf") < position(&sorted, "apart"));
    assert_eq!(sorted.len(), 4);
}

#[test]
fn node_facade_full_scenario() {
    let engine = SortEngine::new();
    let ghost = ResolvedNode::new(
        ModuleRevisionId::new(ModuleId::new("org.example", "ghost"), "1.0"),
        None,
    );
    let sorted = engine
        .sort_nodes(vec![
            ResolvedNode::from_descriptor(descriptor("p", "1.0", &[("q", "1.0")])),
            ghost,
            ResolvedNode::from_descriptor(descriptor("q", "1.0", &[])),
            ResolvedNode::from_descriptor(descriptor("r", "1.0", &[])),
        ])
        .unwrap();

    let names: Vec<&str> = sorted.iter().map(|n| n.id.module.name.as_str()).collect();
    // Descriptor-less node first, then a dependency-respecting order.
    assert_eq!(names[0], "ghost");
    let q = names.iter().position(|n| *n == "q").unwrap();
    let p = names.iter().position(|n| *n == "p").unwrap();
    assert!(q < p);
    assert_eq!(sorted.len(), 4);
}
