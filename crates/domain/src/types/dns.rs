//! DNS zone rows managed through the registry's DNS hosting commands

use serde::{Deserialize, Serialize};

use super::value::Value;

/// One resource record row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRow {
    /// Owner name relative to the zone (empty for the apex).
    pub name: String,
    pub ttl: u32,
    /// Record type, e.g. `A`, `AAAA`, `MX`, `TXT`.
    pub rdtype: String,
    pub rdata: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_comment: Option<String>,
}

impl DnsRow {
    pub fn new(
        name: impl Into<String>,
        ttl: u32,
        rdtype: impl Into<String>,
        rdata: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ttl,
            rdtype: rdtype.into().to_uppercase(),
            rdata: rdata.into(),
            auth_comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.auth_comment = Some(comment.into());
        self
    }

    /// Payload fields of `dns-row-add` (without the zone name).
    pub fn to_value(&self) -> Value {
        Value::map()
            .with("name", self.name.as_str())
            .with("ttl", self.ttl)
            .with("type", self.rdtype.as_str())
            .with("rdata", self.rdata.as_str())
            .with("auth_comment", self.auth_comment.clone().unwrap_or_default())
    }
}
