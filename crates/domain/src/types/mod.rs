//! Registry protocol data model
//!
//! Payloads travel as an untyped [`Value`] tree. Typed helpers
//! ([`Nameserver`], [`DnsRow`]) render themselves into the payload shapes the
//! service expects.

pub mod command;
pub mod credentials;
pub mod dns;
pub mod nameserver;
pub mod response;
pub mod value;

pub use command::Command;
pub use credentials::Credentials;
pub use dns::DnsRow;
pub use nameserver::Nameserver;
pub use response::{CodeClass, Response};
pub use value::{Value, ValueMap};
