//! Wire envelope abstraction

pub mod ports;

pub use ports::{RequestEnvelope, WireCodec};
