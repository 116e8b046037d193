//! Java router `key=value` properties.
//!
//! This dialect never fails: malformed lines are dropped, unknown keys are
//! ignored. Flat and prefixed keys write directly; `tunnel.N.<property>` keys
//! only fill fields that are still unset.

use tracing::debug;

use crate::coerce::{coerce, parse_int, BoolVocabulary};
use crate::model::TunnelConfig;

const VOCAB: BoolVocabulary = BoolVocabulary::Literal;

/// Flat keys that live in the generic tunnel group without a prefix.
pub const FLAT_TUNNEL_KEYS: &[&str] = &[
    "proxyList",
    "sharedClient",
    "startOnLoad",
    "accessList",
    "spoofedHost",
    "targetPort",
];

const RESERVED_PREFIX: &str = "configFile";

/// Parse properties text.
///
/// Flat and prefixed keys are applied first, then `tunnel.N.*` keys, so a
/// numbered value never shadows a flat one regardless of line order.
pub fn parse(input: &[u8]) -> TunnelConfig {
    let text = String::from_utf8_lossy(input);
    let mut config = TunnelConfig::default();
    let mut numbered = Vec::new();

    for (key, value) in tokenize(&text) {
        if key.starts_with('#') || key.starts_with(RESERVED_PREFIX) {
            debug!(key = %key, "skipping reserved properties key");
            continue;
        }
        match numbered_property(&key) {
            Some(property) => numbered.push((property.to_string(), value)),
            None => {
                if !apply_flat_or_prefixed(&key, &value, &mut config) {
                    debug!(key = %key, "ignoring unrecognised properties key");
                }
            }
        }
    }
    for (property, value) in numbered {
        apply_numbered(&property, &value, &mut config);
    }

    config
}

/// Split properties text into `(key, value)` pairs.
///
/// Handles `#`/`!` comments and backslash continuations: a line continues
/// only when it ends in an odd number of backslashes. Keys and values are
/// unescaped after joining. A repeated key keeps the position of its first
/// occurrence and the value of its last.
pub fn tokenize(text: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut pending = String::new();

    for raw in text.lines() {
        let line = raw.trim_start();
        if pending.is_empty() && (line.starts_with('#') || line.starts_with('!')) {
            continue;
        }

        let trailing = line.bytes().rev().take_while(|&b| b == b'\\').count();
        if trailing % 2 == 1 {
            pending.push_str(&line[..line.len() - 1]);
            continue;
        }
        pending.push_str(line);
        let logical = std::mem::take(&mut pending);
        push_pair(&mut pairs, &logical);
    }
    if !pending.is_empty() {
        push_pair(&mut pairs, &pending);
    }

    pairs
}

fn push_pair(pairs: &mut Vec<(String, String)>, logical: &str) {
    let Some(split) = separator_index(logical) else {
        if !logical.trim().is_empty() {
            debug!(line = logical, "ignoring properties line without '='");
        }
        return;
    };
    let key = unescape(logical[..split].trim());
    if key.is_empty() {
        return;
    }
    let value = unescape(logical[split + 1..].trim());

    match pairs.iter_mut().find(|(k, _)| *k == key) {
        Some(existing) => existing.1 = value,
        None => pairs.push((key, value)),
    }
}

/// Byte index of the first `=` not preceded by an escaping backslash.
fn separator_index(line: &str) -> Option<usize> {
    let mut escaped = false;
    for (idx, ch) in line.char_indices() {
        match ch {
            '\\' if !escaped => escaped = true,
            '=' if !escaped => return Some(idx),
            _ => escaped = false,
        }
    }
    None
}

/// Resolve `\\`, `\=`, `\:`, `\t`, `\n`, `\r`, `\f` and `\uXXXX`. Any other
/// escaped character stands for itself.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => {
                        out.push(decoded);
                        chars.nth(3);
                    }
                    _ => out.push('u'),
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Escape a key or value so [`tokenize`] reads it back unchanged.
pub(crate) fn escape(raw: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{c}' => out.push_str("\\f"),
            '=' | ':' if is_key => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// `tunnel.N.<property>` → `<property>`.
fn numbered_property(key: &str) -> Option<&str> {
    let rest = key.strip_prefix("tunnel.")?;
    let (index, property) = rest.split_once('.')?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) || property.is_empty() {
        return None;
    }
    Some(property)
}

/// Route a flat or `option.*` key. Returns `false` if the key is not recognised.
fn apply_flat_or_prefixed(key: &str, value: &str, config: &mut TunnelConfig) -> bool {
    match key {
        "name" => config.name = value.to_string(),
        "type" => config.kind = value.to_string(),
        "interface" => config.interface = value.to_string(),
        "listenPort" => {
            if let Some(port) = parse_int(value) {
                config.port = port;
            }
        }
        "targetDestination" | "targetHost" => {
            if config.target.is_empty() {
                config.target = value.to_string();
            }
        }
        "description" => config.description = value.to_string(),
        "targetPort" => {
            if let Some(port) = parse_int(value) {
                config.tunnel.insert(key.to_string(), port.into());
            }
        }
        "i2cpHost" => {
            config.i2cp.insert("host".to_string(), value.into());
        }
        "i2cpPort" => {
            if let Some(port) = parse_int(value) {
                config.i2cp.insert("port".to_string(), port.into());
            }
        }
        "option.persistentClientKey" => {
            config.persistent_key = coerce(value, VOCAB).as_bool().unwrap_or(false);
        }
        _ if FLAT_TUNNEL_KEYS.contains(&key) => {
            config.tunnel.insert(key.to_string(), coerce(value, VOCAB));
        }
        _ => return apply_prefixed(key, value, config),
    }
    true
}

fn apply_prefixed(key: &str, value: &str, config: &mut TunnelConfig) -> bool {
    let routes = [
        ("option.i2cp.", &mut config.i2cp),
        ("option.i2ptunnel.", &mut config.tunnel),
        ("option.inbound.", &mut config.inbound),
        ("option.outbound.", &mut config.outbound),
    ];
    for (prefix, group) in routes {
        if let Some(option) = key.strip_prefix(prefix) {
            group.insert(option.to_string(), coerce(value, VOCAB));
            return true;
        }
    }
    false
}

fn apply_numbered(property: &str, value: &str, config: &mut TunnelConfig) {
    match property {
        "name" => {
            if config.name.is_empty() {
                config.name = value.to_string();
            } else {
                debug!(value, "numbered name conflicts with flat name; keeping as alternateName");
                config
                    .tunnel
                    .insert("alternateName".to_string(), value.into());
            }
        }
        "type" => fill(&mut config.kind, value),
        "interface" => fill(&mut config.interface, value),
        "listenPort" => {
            if config.port == 0 {
                if let Some(port) = parse_int(value) {
                    config.port = port;
                }
            }
        }
        "targetDestination" | "targetHost" => fill(&mut config.target, value),
        "description" => fill(&mut config.description, value),
        _ => {
            if !apply_flat_or_prefixed(property, value, config) {
                config
                    .tunnel
                    .insert(property.to_string(), coerce(value, VOCAB));
            }
        }
    }
}

fn fill(field: &mut String, value: &str) {
    if field.is_empty() {
        *field = value.to_string();
    }
}
