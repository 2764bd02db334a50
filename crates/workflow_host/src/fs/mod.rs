//! Workflow directory-tree contracts: paths, wire types, the backend trait, and adapters.

pub mod format;
pub mod memory;
pub mod path;
pub mod service;
pub mod types;
