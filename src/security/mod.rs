// file: src/security/mod.rs
// version: 3.0.0
// guid: 4a8e2d17-c6b0-4f53-9e21-7d0b3c58a1f9

//! Credential and connection checks

pub mod credential;
pub mod validator;

pub use credential::{validate_key_file, ACCEPTED_KEY_MODES};
pub use validator::ConnectionValidator;
