//! Shared utilities for regwapi crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: input validation, payload redaction
//! - `runtime`: blocking synchronization (cancellation tokens)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod privacy;
#[cfg(feature = "foundation")]
pub mod validation;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod sync;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "foundation")]
pub use privacy::{is_sensitive_key, redact_payload};
#[cfg(feature = "runtime")]
pub use sync::CancellationToken;
#[cfg(feature = "foundation")]
pub use validation::{
    validate_field, DomainNameValidator, EmailValidator, FieldError, FieldValidator, IpValidator,
    NameserverValidator, ValidationError, ValidationResult,
};
