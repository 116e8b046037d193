//! i2pd section-based INI.

use tracing::debug;

use crate::coerce::{coerce, parse_flag, parse_int, BoolVocabulary};
use crate::dialect::Dialect;
use crate::error::ParseError;
use crate::fault::ParseFault;
use crate::model::TunnelConfig;

const VOCAB: BoolVocabulary = BoolVocabulary::Keywords;
/// Dedicated flag keys also accept `1`/`0`.
const FLAG_VOCAB: BoolVocabulary = BoolVocabulary::KeywordsAndDigits;

/// Keys stored verbatim as strings in the tunnel group.
pub const RAW_STRING_KEYS: &[&str] = &["hostoverride", "webircpassword"];
/// Keys parsed as booleans, including `1`/`0`.
pub const FLAG_KEYS: &[&str] = &["gzip", "multicast", "maptoloopback", "enableuniquelocal"];
/// Keys coerced with the generic rules.
pub const COERCED_KEYS: &[&str] = &["accesslist", "signaturetype", "explicitpeers"];
/// Prefixes kept as part of the key in the tunnel group.
pub const PASSTHROUGH_PREFIXES: &[&str] = &["crypto.", "streamr."];
/// Keys that set a core field instead of a tunnel option.
pub const FIELD_KEYS: &[&str] = &[
    "name",
    "type",
    "host",
    "interface",
    "port",
    "destination",
    "address",
    "description",
    "keys",
];
/// Prefixes routed to the i2cp, inbound and outbound groups.
pub const GROUP_PREFIXES: &[&str] = &["i2cp.", "inbound.", "outbound."];

/// Whether a bare `key = value` line is read back into the tunnel group
/// under the same key.
pub fn is_tunnel_option_key(key: &str) -> bool {
    !FIELD_KEYS.contains(&key) && !GROUP_PREFIXES.iter().any(|p| key.starts_with(p))
}

/// Parse INI text. The first section header names the tunnel.
pub fn parse(input: &[u8]) -> Result<TunnelConfig, ParseError> {
    let text = String::from_utf8_lossy(input);
    let mut config = TunnelConfig::default();
    let mut section: Option<String> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header.strip_suffix(']').ok_or_else(|| {
                ParseFault::at(
                    &text,
                    line_no,
                    0,
                    Dialect::Ini,
                    "unclosed section bracket - expected ']'",
                )
            })?;
            if name.trim().is_empty() {
                return Err(ParseFault::at(
                    &text,
                    line_no,
                    0,
                    Dialect::Ini,
                    "empty section name - sections must have a name",
                )
                .into());
            }
            if config.name.is_empty() {
                config.name = name.to_string();
            } else {
                debug!(section = name, tunnel = %config.name, "merging additional INI section");
            }
            section = Some(name.to_string());
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ParseFault::at(
                &text,
                line_no,
                0,
                Dialect::Ini,
                "expected key=value pair or section header [name]",
            )
            .into());
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ParseFault::at(
                &text,
                line_no,
                0,
                Dialect::Ini,
                "empty key name - key=value pairs must have a key",
            )
            .into());
        }

        if section.is_none() {
            debug!(key, "key appears before any section header");
        }
        apply_key(key, value.trim(), &mut config);
    }

    Ok(config)
}

fn apply_key(key: &str, value: &str, config: &mut TunnelConfig) {
    match key {
        "name" => {
            if config.name.is_empty() {
                config.name = value.to_string();
            }
        }
        "type" => config.kind = value.to_string(),
        "host" | "interface" => config.interface = value.to_string(),
        "port" => {
            if let Some(port) = parse_int(value) {
                config.port = port;
            }
        }
        "destination" | "address" => config.target = value.to_string(),
        "description" => config.description = value.to_string(),
        "keys" => {
            if value.eq_ignore_ascii_case("transient") {
                config.persistent_key = false;
            } else {
                config.persistent_key = true;
                config.tunnel.insert("keyfile".to_string(), value.into());
            }
        }
        _ if RAW_STRING_KEYS.contains(&key) => {
            config.tunnel.insert(key.to_string(), value.into());
        }
        _ if FLAG_KEYS.contains(&key) => {
            config
                .tunnel
                .insert(key.to_string(), parse_flag(value, FLAG_VOCAB).into());
        }
        _ if COERCED_KEYS.contains(&key) => {
            config.tunnel.insert(key.to_string(), coerce(value, VOCAB));
        }
        _ => apply_prefixed(key, value, config),
    }
}

fn apply_prefixed(key: &str, value: &str, config: &mut TunnelConfig) {
    if PASSTHROUGH_PREFIXES.iter().any(|p| key.starts_with(p)) {
        config.tunnel.insert(key.to_string(), coerce(value, VOCAB));
        return;
    }

    let routes = [
        ("i2cp.", &mut config.i2cp),
        ("inbound.", &mut config.inbound),
        ("outbound.", &mut config.outbound),
    ];
    for (prefix, group) in routes {
        if let Some(option) = key.strip_prefix(prefix) {
            group.insert(option.to_string(), coerce(value, VOCAB));
            return;
        }
    }

    config.tunnel.insert(key.to_string(), coerce(value, VOCAB));
}
