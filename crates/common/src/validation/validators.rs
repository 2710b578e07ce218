// Field Validators - Reusable validation components
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use once_cell::sync::Lazy;
use regwapi_domain::Nameserver;

/// Trait for field validators
///
/// A validator either accepts the input and returns its normalized form, or
/// rejects it with a human-readable message.
pub trait FieldValidator<T: ?Sized> {
    /// Normalized value produced on success
    type Output;

    /// Validate a field value
    fn validate(&self, value: &T) -> Result<Self::Output, String>;
}

const MAX_DOMAIN_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

/// Domain name validator
///
/// Lowercases and drops a trailing root dot. Requires at least two labels of
/// 1-63 characters from `[a-z0-9-]`, none starting or ending with a hyphen.
#[derive(Debug, Clone, Default)]
pub struct DomainNameValidator;

impl DomainNameValidator {
    pub fn new() -> Self {
        Self
    }

    fn check_label(label: &str) -> Result<(), String> {
        if label.is_empty() {
            return Err("Domain name contains an empty label".to_string());
        }
        if label.len() > MAX_LABEL_LENGTH {
            return Err(format!("Label '{label}' exceeds {MAX_LABEL_LENGTH} characters"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(format!("Label '{label}' must not start or end with a hyphen"));
        }
        if let Some(c) = label.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-')) {
            return Err(format!("Label '{label}' contains invalid character '{c}'"));
        }
        Ok(())
    }
}

impl FieldValidator<str> for DomainNameValidator {
    type Output = String;

    fn validate(&self, value: &str) -> Result<String, String> {
        let normalized = value.trim().trim_end_matches('.').to_lowercase();
        if normalized.is_empty() {
            return Err("Domain name is empty".to_string());
        }
        if normalized.len() > MAX_DOMAIN_LENGTH {
            return Err(format!("Domain name exceeds {MAX_DOMAIN_LENGTH} characters"));
        }

        let labels: Vec<&str> = normalized.split('.').collect();
        if labels.len() < 2 {
            return Err("Domain name must contain at least two labels".to_string());
        }
        for label in &labels {
            Self::check_label(label)?;
        }

        Ok(normalized)
    }
}

/// IP address validator
#[derive(Debug, Clone)]
pub struct IpValidator {
    allow_v4: bool,
    allow_v6: bool,
}

impl Default for IpValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl IpValidator {
    /// Create a new IP validator
    pub fn new() -> Self {
        Self { allow_v4: true, allow_v6: true }
    }

    /// Only allow IPv4
    pub fn v4_only(mut self) -> Self {
        self.allow_v4 = true;
        self.allow_v6 = false;
        self
    }

    /// Only allow IPv6
    pub fn v6_only(mut self) -> Self {
        self.allow_v4 = false;
        self.allow_v6 = true;
        self
    }
}

impl FieldValidator<str> for IpValidator {
    type Output = IpAddr;

    fn validate(&self, value: &str) -> Result<IpAddr, String> {
        let ip: IpAddr =
            value.trim().parse().map_err(|_| format!("Invalid IP address format: '{value}'"))?;

        match ip {
            IpAddr::V4(_) if !self.allow_v4 => Err("IPv4 addresses are not allowed".to_string()),
            IpAddr::V6(_) if !self.allow_v6 => Err("IPv6 addresses are not allowed".to_string()),
            _ => Ok(ip),
        }
    }
}

/// Static email regex pattern compiled once at first use
static EMAIL_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("EMAIL_REGEX pattern is valid and well-formed")
});

/// Email validator
#[derive(Debug, Clone, Default)]
pub struct EmailValidator;

impl EmailValidator {
    /// Create a new email validator
    pub fn new() -> Self {
        Self
    }
}

impl FieldValidator<str> for EmailValidator {
    type Output = String;

    fn validate(&self, value: &str) -> Result<String, String> {
        let trimmed = value.trim();
        if !EMAIL_REGEX.is_match(trimmed) {
            return Err("Invalid email format".to_string());
        }

        Ok(trimmed.to_string())
    }
}

/// Nameserver triple validator
///
/// Accepts `name`, `name:ipv4` and `name:ipv4:ipv6`. The IPv4 part may be
/// empty (`name::ipv6`); the IPv6 part keeps its own colons.
#[derive(Debug, Clone, Default)]
pub struct NameserverValidator {
    domain: DomainNameValidator,
}

impl NameserverValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FieldValidator<str> for NameserverValidator {
    type Output = Nameserver;

    fn validate(&self, value: &str) -> Result<Nameserver, String> {
        let value = value.trim();
        let (name, addresses) = value.split_once(':').unwrap_or((value, ""));
        let (ipv4, ipv6) = addresses.split_once(':').unwrap_or((addresses, ""));

        let name = self.domain.validate(name).map_err(|e| format!("Nameserver host: {e}"))?;
        let mut nameserver = Nameserver::new(name);

        if !ipv4.is_empty() {
            let addr: Ipv4Addr =
                ipv4.parse().map_err(|_| format!("Invalid IPv4 address: '{ipv4}'"))?;
            nameserver = nameserver.with_ipv4(addr);
        }
        if !ipv6.is_empty() {
            let addr: Ipv6Addr =
                ipv6.parse().map_err(|_| format!("Invalid IPv6 address: '{ipv6}'"))?;
            nameserver = nameserver.with_ipv6(addr);
        }

        Ok(nameserver)
    }
}
