use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::module_id::{ModuleId, ModuleRevisionId};

/// One declared dependency of a module descriptor.
///
/// The revision string may be exact (`"1.4"`), a range (`"[1.0,2.0)"`), a
/// prefix pattern (`"1.0.+"`) or a dynamic marker (`"latest.integration"`).
/// Interpretation is left to the revision matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyConstraint {
    pub target: ModuleId,
    pub revision: String,
    /// The dynamic revision the constraint was declared with, when `revision`
    /// has already been pinned by resolution. Carried for reporting and
    /// delivery; never consulted when building the dependency graph.
    #[serde(default)]
    pub dynamic_constraint_revision: Option<String>,
}

impl DependencyConstraint {
    pub fn new(target: ModuleId, revision: impl Into<String>) -> Self {
        Self {
            target,
            revision: revision.into(),
            dynamic_constraint_revision: None,
        }
    }
}

/// The declared identity and dependency list of one module version.
///
/// Equality and hashing delegate to the revision id (identity, revision and
/// extra attributes): two structurally identical descriptor instances are
/// the same module and group together, and two descriptors sharing org/name
/// at different revisions never merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    revision_id: ModuleRevisionId,
    dependencies: Vec<DependencyConstraint>,
}

impl ModuleDescriptor {
    pub fn new(revision_id: ModuleRevisionId) -> Self {
        Self {
            revision_id,
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<DependencyConstraint>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn add_dependency(&mut self, constraint: DependencyConstraint) {
        self.dependencies.push(constraint);
    }

    pub fn revision_id(&self) -> &ModuleRevisionId {
        &self.revision_id
    }

    pub fn module(&self) -> &ModuleId {
        &self.revision_id.module
    }

    pub fn revision(&self) -> &str {
        &self.revision_id.revision
    }

    /// Declared dependency constraints, in declaration order.
    pub fn dependencies(&self) -> &[DependencyConstraint] {
        &self.dependencies
    }
}

impl PartialEq for ModuleDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.revision_id == other.revision_id
    }
}

impl Eq for ModuleDescriptor {}

impl Hash for ModuleDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.revision_id.hash(state);
    }
}

impl std::fmt::Display for ModuleDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.revision_id.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_keyed_by_revision_id() {
        let id = ModuleRevisionId::new(ModuleId::new("org", "mod"), "1.0");
        let bare = ModuleDescriptor::new(id.clone());
        let with_deps = ModuleDescriptor::new(id).with_dependencies(vec![
            DependencyConstraint::new(ModuleId::new("org", "other"), "2.0"),
        ]);
        // Same module version, regardless of declared dependencies.
        assert_eq!(bare, with_deps);
    }

    #[test]
    fn different_revisions_are_distinct() {
        let v1 = ModuleDescriptor::new(ModuleRevisionId::new(ModuleId::new("org", "mod"), "1.0"));
        let v2 = ModuleDescriptor::new(ModuleRevisionId::new(ModuleId::new("org", "mod"), "2.0"));
        assert_ne!(v1, v2);
    }
}
