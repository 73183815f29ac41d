//! Core data types for the Kudzu dependency manager.
//!
//! This crate defines the fundamental types the rest of the tool works
//! with: module identities, module descriptors with their declared
//! dependency constraints, and resolved nodes (descriptor wrappers
//! produced by the resolution engine).
//!
//! This crate is intentionally free of async code and network I/O.

pub mod descriptor;
pub mod module_id;
pub mod node;
