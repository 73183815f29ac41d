use serde::{Deserialize, Serialize};

use crate::descriptor::ModuleDescriptor;
use crate::module_id::ModuleRevisionId;

/// A resolution-result entry: one module as seen by the resolution engine.
///
/// The descriptor is absent when resolution could not produce one (the
/// module was evicted, failed to download, or was declared but never
/// resolved). Such nodes still flow through ordering and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedNode {
    pub id: ModuleRevisionId,
    pub descriptor: Option<ModuleDescriptor>,
}

impl ResolvedNode {
    pub fn new(id: ModuleRevisionId, descriptor: Option<ModuleDescriptor>) -> Self {
        Self { id, descriptor }
    }

    /// A node wrapping a resolved descriptor, taking its identity from it.
    pub fn from_descriptor(descriptor: ModuleDescriptor) -> Self {
        Self {
            id: descriptor.revision_id().clone(),
            descriptor: Some(descriptor),
        }
    }

    pub fn has_descriptor(&self) -> bool {
        self.descriptor.is_some()
    }
}

impl std::fmt::Display for ResolvedNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.id.fmt(f)
    }
}
