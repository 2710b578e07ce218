//! Nameserver entries for NSSET creation

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

use super::value::Value;

/// A nameserver host with optional glue addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nameserver {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<Ipv4Addr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<Ipv6Addr>,
}

impl Nameserver {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ipv4: None, ipv6: None }
    }

    pub fn with_ipv4(mut self, addr: Ipv4Addr) -> Self {
        self.ipv4 = Some(addr);
        self
    }

    pub fn with_ipv6(mut self, addr: Ipv6Addr) -> Self {
        self.ipv6 = Some(addr);
        self
    }

    /// Payload shape of one `dns.server` entry. Missing addresses are sent as
    /// empty leaves.
    pub fn to_value(&self) -> Value {
        Value::map()
            .with("name", self.name.as_str())
            .with("addr_ipv4", self.ipv4.map(|ip| ip.to_string()).unwrap_or_default())
            .with("addr_ipv6", self.ipv6.map(|ip| ip.to_string()).unwrap_or_default())
    }
}

/// Renders the `name:ipv4[:ipv6]` triple accepted on the command line.
impl fmt::Display for Nameserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        match (self.ipv4, self.ipv6) {
            (Some(v4), Some(v6)) => write!(f, ":{v4}:{v6}"),
            (Some(v4), None) => write!(f, ":{v4}"),
            (None, Some(v6)) => write!(f, "::{v6}"),
            (None, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_value_emits_all_fields() {
        let ns = Nameserver::new("ns1.example.cz").with_ipv4(Ipv4Addr::new(192, 0, 2, 1));
        let value = ns.to_value();
        assert_eq!(value.get("name"), Some(&Value::from("ns1.example.cz")));
        assert_eq!(value.get("addr_ipv4"), Some(&Value::from("192.0.2.1")));
        assert_eq!(value.get("addr_ipv6"), Some(&Value::from("")));
    }

    #[test]
    fn display_uses_colon_triple() {
        let ns = Nameserver::new("ns1.example.cz")
            .with_ipv4(Ipv4Addr::new(192, 0, 2, 1))
            .with_ipv6("2001:db8::1".parse().unwrap());
        assert_eq!(ns.to_string(), "ns1.example.cz:192.0.2.1:2001:db8::1");
        assert_eq!(Nameserver::new("ns2.example.cz").to_string(), "ns2.example.cz");
    }
}
