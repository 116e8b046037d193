use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tunnelconf_core::{generate, parse, parse_file, Dialect, TunnelConfig};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

/// Fields every dialect carries without loss.
fn core_fields(config: &TunnelConfig) -> (&str, &str, &str, i64, &str, bool) {
    (
        config.name.as_str(),
        config.kind.as_str(),
        config.interface.as_str(),
        config.port,
        config.target.as_str(),
        config.persistent_key,
    )
}

fn assert_round_trip(path: &str, dialect: Dialect) {
    let first = parse_file(&fixture(path), dialect).expect("initial parse should succeed");
    let written = generate(&first, dialect).expect("generate should succeed");
    let second = parse(&written, dialect).expect("re-parse should succeed");
    assert_eq!(core_fields(&first), core_fields(&second), "{path}");
}

#[test]
fn properties_round_trip() {
    assert_round_trip("fixtures/httpclient.config", Dialect::Properties);
    assert_round_trip("fixtures/numbered.config", Dialect::Properties);
}

#[test]
fn ini_round_trip() {
    assert_round_trip("fixtures/eepsite.conf", Dialect::Ini);
    assert_round_trip("fixtures/socks.conf", Dialect::Ini);
}

#[test]
fn yaml_round_trip() {
    assert_round_trip("fixtures/client.yaml", Dialect::Yaml);
    assert_round_trip("fixtures/server.yaml", Dialect::Yaml);
}

#[test]
fn yaml_round_trip_keeps_option_groups() {
    let first = parse_file(&fixture("fixtures/client.yaml"), Dialect::Yaml).expect("parse");
    let written = generate(&first, Dialect::Yaml).expect("generate");
    let second = parse(&written, Dialect::Yaml).expect("re-parse");
    assert_eq!(first, second);
}

#[test]
fn cross_dialect_chain_preserves_core_fields() {
    let original = parse_file(&fixture("fixtures/httpclient.config"), Dialect::Properties)
        .expect("parse");

    let ini = generate(&original, Dialect::Ini).expect("to ini");
    let from_ini = parse(&ini, Dialect::Ini).expect("parse ini");
    let yaml = generate(&from_ini, Dialect::Yaml).expect("to yaml");
    let from_yaml = parse(&yaml, Dialect::Yaml).expect("parse yaml");

    assert_eq!(core_fields(&original), core_fields(&from_yaml));
    assert_eq!(original.i2cp, from_yaml.i2cp);
    assert_eq!(original.inbound, from_yaml.inbound);
}
