//! End-to-end tests: real codecs and HTTP transport against a mock registry

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use regwapi_common::sync::CancellationToken;
use regwapi_core::{
    compute_auth_for_hour, FixedClock, NameserverTarget, PollOutcome, RegistryClient, Sleeper,
};
use regwapi_domain::{ClientConfig, Command, Nameserver, PollSettings, Value, WapiError, WireFormat};
use regwapi_infra::RegistryClientBuilder;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const USER: &str = "wapi@example.cz";
const PASSWORD: &str = "secret";
const EPOCH: i64 = 1_700_000_000;

struct InstantSleeper;

impl Sleeper for InstantSleeper {
    fn sleep(&self, _duration: Duration, cancel: Option<&CancellationToken>) -> bool {
        cancel.is_some_and(CancellationToken::is_cancelled)
    }
}

struct Registry {
    server: MockServer,
    rt: Runtime,
}

impl Registry {
    fn start() -> Self {
        let rt = Runtime::new().unwrap();
        let server = rt.block_on(MockServer::start());
        Self { server, rt }
    }

    fn reply(&self, format: WireFormat, command: &str, body: &str, times: Option<u64>) {
        let marker = match format {
            WireFormat::Xml => format!("%3Ccommand%3E{command}%3C%2Fcommand%3E"),
            WireFormat::Json => format!("%22command%22%3A%22{command}%22"),
        };
        let mut mock = Mock::given(method("POST"))
            .and(path(format!("/wapi/{format}")))
            .and(body_string_contains(marker))
            .respond_with(ResponseTemplate::new(200).set_body_string(body));
        if let Some(times) = times {
            mock = mock.up_to_n_times(times);
        }
        self.rt.block_on(mock.mount(&self.server));
    }

    fn fail(&self, status: u16) {
        self.rt.block_on(
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&self.server),
        );
    }

    fn client(&self, format: WireFormat) -> RegistryClient {
        let mut config = ClientConfig::new(USER, PASSWORD);
        config.base_url = format!("{}/wapi", self.server.uri());
        config.format = format;
        config.timeout_secs = 5;
        config.poll = PollSettings { max_attempts: 5, interval_secs: 1 };

        let now = Utc.timestamp_opt(EPOCH, 0).unwrap();
        RegistryClientBuilder::new(config)
            .clock(Arc::new(FixedClock::new(now).with_hour(11)))
            .sleeper(Arc::new(InstantSleeper))
            .build()
            .expect("client")
    }

    fn requests(&self) -> Vec<Request> {
        self.rt.block_on(self.server.received_requests()).unwrap_or_default()
    }
}

/// The `request` form field of a captured HTTP request.
fn wire_request(request: &Request) -> String {
    url::form_urlencoded::parse(&request.body)
        .find(|(key, _)| key == "request")
        .map(|(_, value)| value.into_owned())
        .expect("request form field")
}

fn xml_reply(code: &str, result: &str, data: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<response>\n  <code>{code}</code>\n  \
         <result>{result}</result>\n  <timestamp>{EPOCH}</timestamp>\n  <svTRID>sv-1</svTRID>\n  \
         <command>x</command>\n  <data>{data}</data>\n</response>"
    )
}

#[test]
fn xml_ping_sends_authenticated_envelope() {
    let registry = Registry::start();
    registry.reply(WireFormat::Xml, "ping", &xml_reply("1000", "OK", ""), None);

    let response = registry.client(WireFormat::Xml).ping().unwrap();

    assert_eq!(response.code, "1000");
    assert_eq!(response.sv_trid.as_deref(), Some("sv-1"));
    let requests = registry.requests();
    assert_eq!(requests.len(), 1);
    let wire = wire_request(&requests[0]);
    assert!(wire.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?><request>"));
    assert!(wire.contains(&format!("<user>{USER}</user>")));
    assert!(wire.contains(&format!(
        "<auth>{}</auth>",
        compute_auth_for_hour(USER, PASSWORD, "11")
    )));
    assert!(wire.contains(&format!("<clTRID>{EPOCH}-1</clTRID>")));
    assert!(!wire.contains("<data>"));
}

#[test]
fn json_rows_list_decodes_repeated_rows() {
    let registry = Registry::start();
    let body = r#"{"response":{"code":1000,"result":"OK","data":{"row":[
        {"ID":11,"name":"www","ttl":300,"rdtype":"A","rdata":"192.0.2.10"},
        {"ID":12,"name":"mail","ttl":300,"rdtype":"MX","rdata":"10 mx.example.cz"}]}}}"#;
    registry.reply(WireFormat::Json, "dns-rows-list", body, None);

    let response = registry.client(WireFormat::Json).dns_rows_list("example.cz").unwrap();

    let rows = response.data.get("row").unwrap().items();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("ID"), Some(&Value::Int(11)));
    assert_eq!(rows[1].get("rdata"), Some(&Value::from("10 mx.example.cz")));

    let wire: serde_json::Value =
        serde_json::from_str(&wire_request(&registry.requests()[0])).unwrap();
    assert_eq!(wire["request"]["command"], "dns-rows-list");
    assert_eq!(wire["request"]["data"]["domain"], "example.cz");
}

#[test]
fn rejection_is_returned_as_response() {
    let registry = Registry::start();
    registry.reply(
        WireFormat::Xml,
        "domain-info",
        &xml_reply("2303", "Object does not exist", ""),
        None,
    );

    let response = registry.client(WireFormat::Xml).domain_info("missing.cz").unwrap();

    assert!(response.is_rejected());
    assert_eq!(response.result, "Object does not exist");
    assert!(response.data.is_null());
}

#[test]
fn http_error_status_is_request_error() {
    let registry = Registry::start();
    registry.fail(503);

    let err = registry.client(WireFormat::Xml).ping().unwrap_err();

    assert!(matches!(&err, WapiError::Request(msg) if msg.contains("503")), "{err:?}");
    assert_eq!(err.exit_code(), 5);
}

#[test]
fn unparsable_body_becomes_sentinel() {
    let registry = Registry::start();
    registry.reply(WireFormat::Xml, "ping", "<html><body>maintenance", None);

    let response = registry.client(WireFormat::Xml).ping().unwrap();

    assert_eq!(response.code, "9999");
    assert!(response.result.starts_with("Failed to parse response"));
}

#[test]
fn polling_over_http_until_success() {
    let registry = Registry::start();
    registry.reply(WireFormat::Xml, "domain-info", &xml_reply("1001", "Pending", ""), Some(2));
    registry.reply(WireFormat::Xml, "domain-info", &xml_reply("1000", "OK", ""), None);
    let client = registry.client(WireFormat::Xml);

    let spec = client.poll_spec(
        Command::new("domain-info").with_data(Value::map().with("name", "example.cz")),
    );
    let report = client.poll_with_report(spec, None).unwrap();

    assert_eq!(report.outcome, PollOutcome::Success);
    assert_eq!(report.attempts, 3);
    assert_eq!(registry.requests().len(), 3);
}

#[test]
fn polling_over_http_times_out() {
    let registry = Registry::start();
    let pending = r#"{"response":{"code":"1001","result":"Pending"}}"#;
    registry.reply(WireFormat::Json, "domain-info", pending, None);
    let client = registry.client(WireFormat::Json);

    let response = client
        .poll_until_complete(client.poll_spec(Command::new("domain-info")), None)
        .unwrap();

    assert_eq!(response.code, "9998");
    assert!(response.result.contains("5 attempts"));
    assert_eq!(registry.requests().len(), 5);
}

#[test]
fn nameserver_choreography_over_xml() {
    let registry = Registry::start();
    let info = "<domain><name>example.cz</name><owner_c>OWN-1</owner_c>\
                <tech_c>TECH-1</tech_c><tech_c>TECH-2</tech_c><nsset>OLD</nsset></domain>";
    registry.reply(WireFormat::Xml, "domain-info", &xml_reply("1000", "OK", info), None);
    registry.reply(WireFormat::Xml, "nsset-create", &xml_reply("1000", "OK", ""), None);
    registry.reply(WireFormat::Xml, "domain-update-ns", &xml_reply("1001", "Accepted", ""), None);
    let servers = vec![
        Nameserver::new("ns1.example.cz").with_ipv4("192.0.2.1".parse().unwrap()),
        Nameserver::new("ns2.example.net"),
    ];

    let response = registry
        .client(WireFormat::Xml)
        .domain_update_nameservers("example.cz", NameserverTarget::Servers(servers))
        .unwrap();

    assert_eq!(response.code, "1001");
    let wires: Vec<String> = registry.requests().iter().map(wire_request).collect();
    assert_eq!(wires.len(), 3);
    assert!(wires[1].contains(&format!("<name>EXAMPLE-CZ-{EPOCH}</name>")));
    assert!(wires[1].contains("<tld>cz</tld>"));
    assert!(wires[1].contains("<tech_c>TECH-1</tech_c>"));
    assert!(wires[1].contains(
        "<dns><server><name>ns1.example.cz</name><addr_ipv4>192.0.2.1</addr_ipv4>\
         <addr_ipv6></addr_ipv6></server><server><name>ns2.example.net</name>\
         <addr_ipv4></addr_ipv4><addr_ipv6></addr_ipv6></server></dns>"
    ));
    assert!(wires[2].contains(&format!("<nsset>EXAMPLE-CZ-{EPOCH}</nsset>")));
}
