//! # regwapi Domain
//!
//! Data model of the registry control API.
//!
//! This crate contains:
//! - The untyped payload tree (`Value`) and the command/response envelopes
//! - Credentials, nameserver and DNS row types
//! - Client configuration structures
//! - Error types and response-code constants
//!
//! ## Architecture
//! - No dependencies on other regwapi crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
