//! Synchronization primitives for blocking workflows
//!
//! ## Submodules
//!
//! - **`cancellation`**: cooperative cancellation shared between a caller and
//!   a blocking loop (e.g. a polling worker thread)

pub mod cancellation;

pub use cancellation::CancellationToken;
