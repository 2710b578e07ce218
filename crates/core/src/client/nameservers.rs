//! Nameserver assignment
//!
//! A domain points at an NSSET, a named set of nameservers. Assigning a raw
//! nameserver list therefore takes two commands: `nsset-create` for a freshly
//! named set owned by the domain's technical contact, then `domain-update-ns`
//! referencing it.

use regwapi_common::sync::CancellationToken;
use regwapi_domain::constants::MAX_HANDLE_LENGTH;
use regwapi_domain::{Command, Nameserver, Response, Result, Value, WapiError};
use tracing::{debug, info, instrument, warn};

use super::service::RegistryClient;

/// Contact fields consulted, in order, when choosing the NSSET's tech contact
const CONTACT_FIELDS: [&str; 3] = ["tech_c", "admin_c", "owner_c"];

/// What a domain's nameservers should become
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameserverTarget {
    /// Point at an existing NSSET.
    Nsset(String),
    /// Create a new NSSET from these servers, then point at it.
    Servers(Vec<Nameserver>),
}

/// First contact handle found in a `domain-info` response.
pub fn technical_contact(info: &Response) -> Option<String> {
    let domain = info.data.get("domain")?;
    CONTACT_FIELDS.iter().find_map(|field| {
        let handle = domain.get(field)?.items().first()?.to_text();
        let handle = handle.trim();
        (!handle.is_empty()).then(|| handle.to_string())
    })
}

/// NSSET handle for `domain` created at `epoch`, e.g. `EXAMPLE-CZ-1700000000`.
///
/// Non-alphanumeric characters become `-`; the domain part is shortened so the
/// whole handle stays within the registry's handle length.
pub fn nsset_name(domain: &str, epoch: i64) -> String {
    let suffix = format!("-{epoch}");
    let budget = MAX_HANDLE_LENGTH.saturating_sub(suffix.len());
    let stem: String = domain
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '-' })
        .take(budget)
        .collect();
    format!("{stem}{suffix}")
}

/// Registry zone of a domain name (`example.co.uk` -> `co.uk`).
fn zone_of(domain: &str) -> &str {
    domain.split_once('.').map_or(domain, |(_, zone)| zone)
}

impl RegistryClient {
    /// Point `domain` at an NSSET, creating one first when given servers.
    ///
    /// If a preparatory command (`domain-info` or `nsset-create`) does not
    /// succeed, its response is returned unmodified and nothing else is sent.
    #[instrument(skip(self, target), fields(domain = %domain))]
    pub fn domain_update_nameservers(
        &self,
        domain: &str,
        target: NameserverTarget,
    ) -> Result<Response> {
        let nsset = match target {
            NameserverTarget::Nsset(name) => name,
            NameserverTarget::Servers(servers) => {
                let created = self.create_nsset_for(domain, &servers)?;
                match created {
                    Ok(name) => name,
                    Err(response) => return Ok(response),
                }
            }
        };

        self.call("domain-update-ns", Value::map().with("name", domain).with("nsset", nsset))
    }

    /// Runs the lookup and creation steps. The inner `Err` carries a registry
    /// response that ends the choreography early.
    fn create_nsset_for(
        &self,
        domain: &str,
        servers: &[Nameserver],
    ) -> Result<std::result::Result<String, Response>> {
        let info = self.domain_info(domain)?;
        if !info.is_success() {
            warn!(code = %info.code, "domain_lookup_failed");
            return Ok(Err(info));
        }

        let tech_c = technical_contact(&info).ok_or_else(|| {
            WapiError::Request(format!("domain-info for {domain} returned no contact handle"))
        })?;

        let name = nsset_name(domain, self.clock.now_utc().timestamp());
        debug!(nsset = %name, tech_c = %tech_c, servers = servers.len(), "nsset_create");

        let dns = Value::map()
            .with("server", servers.iter().map(Nameserver::to_value).collect::<Vec<_>>());
        let payload = Value::map()
            .with("name", name.as_str())
            .with("tld", zone_of(domain))
            .with("tech_c", tech_c)
            .with("dns", dns);

        let created = self.call("nsset-create", payload)?;
        if !created.is_ok() {
            warn!(code = %created.code, result = %created.result, "nsset_create_failed");
            return Ok(Err(created));
        }

        info!(nsset = %name, code = %created.code, "nsset_created");
        Ok(Ok(name))
    }

    /// Polls `domain-info` until the domain reports `nsset`.
    pub fn wait_for_nsset(
        &self,
        domain: &str,
        nsset: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response> {
        let expected = nsset.to_string();
        let spec = self
            .poll_spec(Command::new("domain-info").with_data(Value::map().with("name", domain)))
            .until(move |response| {
                response
                    .data
                    .path(&["domain", "nsset"])
                    .is_some_and(|current| current.to_text().eq_ignore_ascii_case(&expected))
            });
        self.poll_until_complete(spec, cancel)
    }
}
