use tunnelconf_core::validate::lookup;
use tunnelconf_core::{validate, Dialect, TunnelConfig, ValidationFailure, TUNNEL_SPECS};

fn config(kind: &str) -> TunnelConfig {
    TunnelConfig::new("test", kind)
}

fn message(config: &TunnelConfig, strict: bool) -> String {
    validate(config, strict, None)
        .expect_err("validation should fail")
        .to_string()
}

#[test]
fn http_client_requires_port() {
    assert!(message(&config("httpclient"), false).contains("Local port is required"));
}

#[test]
fn http_server_requires_target() {
    assert!(message(&config("httpserver"), false).contains("Target is required"));
}

#[test]
fn port_out_of_range() {
    let mut c = config("httpclient");
    c.port = 70000;
    assert!(message(&c, false).contains("out of valid range"));
}

#[test]
fn privileged_port_only_fails_in_strict_mode() {
    let mut c = config("httpclient");
    c.port = 80;
    assert!(message(&c, true).contains("privileged range"));
    assert!(validate(&c, false, None).is_ok());
}

#[test]
fn basic_fields_come_first() {
    let mut c = TunnelConfig::new("", "httpclient");
    assert!(message(&c, false).contains("tunnel name is required"));

    c.name = "ok".to_string();
    c.kind.clear();
    assert!(message(&c, false).contains("tunnel type is required"));

    for bad in ["has space", "tab\there", "a=b", "[x]"] {
        let c = TunnelConfig::new(bad, "client");
        let err = validate(&c, false, None).expect_err(bad);
        assert_eq!(err.failure, ValidationFailure::InvalidName(bad.to_string()));
    }
}

#[test]
fn unknown_type_passes_unless_strict() {
    let c = config("udpclient");
    assert!(validate(&c, false, None).is_ok());
    assert!(message(&c, true).contains("unknown tunnel type: udpclient"));
}

#[test]
fn type_lookup_ignores_case() {
    let mut c = config("HTTPClient");
    assert!(message(&c, false).contains("Local port is required"));
    c.port = 4444;
    assert!(validate(&c, true, None).is_ok());
}

#[test]
fn interface_rules() {
    let mut c = config("client");
    c.port = 7000;
    c.interface = "eth0".to_string();
    assert!(validate(&c, false, None).is_ok());
    assert!(message(&c, true).contains("should be a valid IP address or localhost"));

    c.interface = "localhost".to_string();
    assert!(validate(&c, true, None).is_ok());
}

#[test]
fn target_rules() {
    let mut c = config("server");
    c.target = "a:b:c".to_string();
    assert!(message(&c, false).contains("invalid format"));

    c.target = ":80".to_string();
    assert!(message(&c, false).contains("empty host part"));

    c.target = "127.0.0.1:99999".to_string();
    assert!(message(&c, false).contains("out of valid range"));

    c.target = "127.0.0.1:8080".to_string();
    assert!(validate(&c, true, None).is_ok());
}

#[test]
fn first_failing_rule_is_reported() {
    let mut c = config("client");
    c.interface = "bad host".to_string();
    c.target = "a:b:c".to_string();
    // Port rule precedes both format rules.
    assert!(message(&c, false).contains("Local port is required for client tunnel"));
}

#[test]
fn dialect_checks_apply_in_strict_mode_only() {
    let mut c = config("httpclient");
    c.name = "web.proxy".to_string();
    c.port = 4444;

    assert!(validate(&c, false, Some(Dialect::Properties)).is_ok());
    let err = validate(&c, true, Some(Dialect::Properties)).expect_err("dot in name");
    assert!(err.to_string().contains("in properties format"));

    assert!(validate(&c, true, Some(Dialect::Ini)).is_ok());
    assert!(validate(&c, true, Some(Dialect::Yaml)).is_ok());
}

#[test]
fn error_carries_config_snapshot() {
    let c = config("httpserver");
    let err = validate(&c, false, None).expect_err("missing target");
    assert_eq!(*err.config, c);
    assert!(matches!(
        err.failure,
        ValidationFailure::Rule {
            description: "Target is required for HTTP server",
            ..
        }
    ));
}

#[test]
fn rule_table_is_serializable() {
    let json = serde_json::to_value(TUNNEL_SPECS).expect("serialize");
    let first = &json[0];
    assert_eq!(first["type_name"], "httpclient");
    assert_eq!(first["rules"][0]["check"], "RequiredPort");
    assert_eq!(lookup("socksirc").map(|s| s.description), Some("SOCKS IRC proxy tunnel"));
}
