// file: src/utils/mod.rs
// version: 2.0.0
// guid: f3d8a6b1-24c9-4e75-90a3-b7e1c05d428f

//! Utility modules for local system operations

pub mod system;

pub use system::{SystemUtils, REQUIRED_COMMANDS};
