use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tunnelconf_core::{detect_dialect, session_options, Converter, Dialect, UnknownDialect};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn read(path: &str) -> Vec<u8> {
    std::fs::read(fixture(path)).expect("fixture should be readable")
}

#[test]
fn detects_dialect_from_extension() {
    let cases = [
        ("tunnels.config", Dialect::Properties),
        ("a.properties", Dialect::Properties),
        ("a.prop", Dialect::Properties),
        ("tunnels.conf", Dialect::Ini),
        ("a.INI", Dialect::Ini),
        ("a.yaml", Dialect::Yaml),
        ("a.yml", Dialect::Yaml),
    ];
    for (name, expected) in cases {
        assert_eq!(detect_dialect(Path::new(name)), Ok(expected), "{name}");
    }
    assert_eq!(
        detect_dialect(Path::new("a.json")),
        Err(UnknownDialect::Extension("json".to_string()))
    );
    assert!(detect_dialect(Path::new("noext")).is_err());
}

#[test]
fn properties_to_ini() {
    let out = Converter::new(false)
        .convert(&read("fixtures/numbered.config"), Dialect::Properties, Dialect::Ini)
        .expect("conversion should succeed");
    let out = String::from_utf8(out).expect("utf-8");

    assert!(out.starts_with("[irc]\ntype = ircclient\nhost = 127.0.0.1\nport = 6668\n"));
    assert!(out.contains("destination = irc.postman.i2p:6667\n"));
    assert!(out.contains("i2cp.closeOnIdle = false\n"));
    assert!(out.contains("inbound.nickname = irc\n"));
}

#[test]
fn ini_to_properties() {
    let out = Converter::new(true)
        .convert(&read("fixtures/eepsite.conf"), Dialect::Ini, Dialect::Properties)
        .expect("conversion should succeed");
    let out = String::from_utf8(out).expect("utf-8");

    assert!(out.contains("targetDestination=127.0.0.1:7658\n"));
    assert!(out.contains("option.persistentClientKey=true\n"));
    assert!(out.contains("option.i2cp.leaseSetEncType=4,0\n"));
    assert!(out.contains("option.i2ptunnel.keyfile=eepsite.dat\n"));
}

#[test]
fn parse_failure_is_tagged() {
    let err = Converter::default()
        .convert(&read("fixtures/unclosed.conf"), Dialect::Ini, Dialect::Yaml)
        .expect_err("broken header");
    assert_eq!(err.stage(), "parse");
    assert!(err.to_string().starts_with("parse: parse error at line 2 (ini format):"));
}

#[test]
fn strict_converter_rejects_unknown_type() {
    let input = read("fixtures/socks.conf");
    assert!(Converter::new(false)
        .convert(&input, Dialect::Ini, Dialect::Yaml)
        .is_ok());

    let err = Converter::new(true)
        .convert(&input, Dialect::Ini, Dialect::Yaml)
        .expect_err("socks is not a known type");
    assert_eq!(err.stage(), "validate");
}

#[test]
fn session_options_from_parsed_config() {
    let converter = Converter::default();
    let config = converter
        .parse_input(&read("fixtures/socks.conf"), Dialect::Ini)
        .expect("parse");
    assert_eq!(
        session_options(&config),
        vec!["outbound.quantity=2", "i2cp.leaseSetEncType=4,0"]
    );
}
