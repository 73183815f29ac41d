use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a module: organisation and name, with an optional branch.
///
/// Two ids are equal iff all three fields match; a branched module is a
/// different identity than its unbranched counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId {
    pub organisation: String,
    pub name: String,
    #[serde(default)]
    pub branch: Option<String>,
}

impl ModuleId {
    pub fn new(organisation: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            organisation: organisation.into(),
            name: name.into(),
            branch: None,
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Whether this id, used as a dependency target, designates `candidate`.
    ///
    /// Organisation and name must match exactly; a branch restricts the
    /// match only when the target declares one.
    pub fn designates(&self, candidate: &ModuleId) -> bool {
        if self.organisation != candidate.organisation || self.name != candidate.name {
            return false;
        }
        match &self.branch {
            Some(branch) => candidate.branch.as_deref() == Some(branch.as_str()),
            None => true,
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.branch {
            Some(branch) => write!(f, "{}#{}#{}", self.organisation, self.name, branch),
            None => write!(f, "{}#{}", self.organisation, self.name),
        }
    }
}

/// A module identity pinned to a concrete revision.
///
/// Extra attributes participate in equality and hashing: descriptors that
/// differ only in an extra attribute are distinct modules to the sorter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleRevisionId {
    pub module: ModuleId,
    pub revision: String,
    #[serde(default)]
    pub extra_attributes: BTreeMap<String, String>,
}

impl ModuleRevisionId {
    pub fn new(module: ModuleId, revision: impl Into<String>) -> Self {
        Self {
            module,
            revision: revision.into(),
            extra_attributes: BTreeMap::new(),
        }
    }

    pub fn with_extra_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.extra_attributes.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ModuleRevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.module, self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_branch() {
        let id = ModuleRevisionId::new(ModuleId::new("org.apache", "commons-lang"), "2.6");
        assert_eq!(id.to_string(), "org.apache#commons-lang;2.6");
    }

    #[test]
    fn display_with_branch() {
        let id = ModuleRevisionId::new(
            ModuleId::new("org.apache", "commons-lang").with_branch("fix-1"),
            "2.6",
        );
        assert_eq!(id.to_string(), "org.apache#commons-lang#fix-1;2.6");
    }

    #[test]
    fn equality_covers_all_fields() {
        let a = ModuleRevisionId::new(ModuleId::new("org", "mod"), "1.0");
        let b = ModuleRevisionId::new(ModuleId::new("org", "mod"), "1.0");
        let c = ModuleRevisionId::new(ModuleId::new("org", "mod"), "2.0");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, b.clone().with_extra_attribute("classifier", "sources"));
    }

    #[test]
    fn branchless_target_designates_branched_candidate() {
        let target = ModuleId::new("org", "mod");
        let branched = ModuleId::new("org", "mod").with_branch("dev");
        assert!(target.designates(&branched));
        assert!(!branched.designates(&target));
    }
}
