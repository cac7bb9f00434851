// file: src/template/mod.rs
// version: 1.0.0
// guid: 56c8e0a3-7b4d-4f19-82e6-a0d3b9f5c241

//! Container template discovery, selection and cache handling

pub mod cache;
pub mod candidate;
pub mod selector;

pub use cache::{CachedTemplate, CACHE_DIR};
pub use candidate::{TemplateCandidate, TemplateFilter, VersionTag};
pub use selector::{select_candidate, TemplateSelector};
