// file: src/logging/mod.rs
// version: 1.0.1
// guid: 47b92c0e-d8a3-4f16-9e57-a1c6f3b0d284

//! Logging setup shared by both binaries

pub mod logger;

pub use logger::init_logger;
