//! Registry client facade

pub mod nameservers;
pub mod service;

pub use nameservers::{nsset_name, technical_contact, NameserverTarget};
pub use service::RegistryClient;
