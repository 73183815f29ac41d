use kudzu_core::module_id::ModuleRevisionId;
use miette::Diagnostic;
use thiserror::Error;

/// Errors produced by the sorting engine.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum SortError {
    /// A circular dependency was detected under the error policy.
    #[error("circular dependency found: {}", render_cycle(.cycle))]
    #[diagnostic(help(
        "break the cycle, or configure a warn/ignore circular dependency policy"
    ))]
    CircularDependency { cycle: Vec<ModuleRevisionId> },
}

impl SortError {
    /// The cyclic identity chain, when this is a circular dependency error.
    pub fn cycle(&self) -> &[ModuleRevisionId] {
        match self {
            SortError::CircularDependency { cycle } => cycle,
        }
    }
}

/// `a#x;1.0 -> b#y;2.0 -> a#x;1.0` — the chain closed back on its head.
pub(crate) fn render_cycle(cycle: &[ModuleRevisionId]) -> String {
    let mut out = String::new();
    for id in cycle {
        out.push_str(&id.to_string());
        out.push_str(" -> ");
    }
    if let Some(first) = cycle.first() {
        out.push_str(&first.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kudzu_core::module_id::ModuleId;

    #[test]
    fn cycle_message_closes_the_chain() {
        let a = ModuleRevisionId::new(ModuleId::new("org", "a"), "1.0");
        let b = ModuleRevisionId::new(ModuleId::new("org", "b"), "2.0");
        let err = SortError::CircularDependency {
            cycle: vec![a, b],
        };
        assert_eq!(
            err.to_string(),
            "circular dependency found: org#a;1.0 -> org#b;2.0 -> org#a;1.0"
        );
    }
}
