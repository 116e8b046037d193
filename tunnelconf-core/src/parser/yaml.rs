//! go-i2p YAML: a single entry under a top-level `tunnels:` mapping.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

use crate::coerce::BoolVocabulary;
use crate::dialect::Dialect;
use crate::error::ParseError;
use crate::fault::ParseFault;
use crate::model::{OptionGroup, OptionValue, TunnelConfig};

#[derive(Debug, Default, Deserialize)]
struct Document {
    #[serde(default)]
    tunnels: Option<BTreeMap<String, Entry>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Entry {
    /// Ignored: the map key names the tunnel.
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    interface: Option<String>,
    port: Option<i64>,
    target: Option<String>,
    persistent_key: Option<bool>,
    description: Option<String>,
    i2cp: Option<BTreeMap<String, Value>>,
    options: Option<BTreeMap<String, Value>>,
    inbound: Option<BTreeMap<String, Value>>,
    outbound: Option<BTreeMap<String, Value>>,
}

/// Parse a YAML document holding exactly one tunnel.
pub fn parse(input: &[u8]) -> Result<TunnelConfig, ParseError> {
    let text = String::from_utf8_lossy(input);
    if text.trim().is_empty() {
        return Err(ParseError::NoTunnels);
    }

    let doc: Document = serde_yaml::from_slice(input).map_err(|err| upgrade_error(&text, err))?;
    let mut tunnels = doc.tunnels.unwrap_or_default();

    let (name, entry) = match tunnels.len() {
        0 => return Err(ParseError::NoTunnels),
        1 => tunnels.pop_first().ok_or(ParseError::NoTunnels)?,
        _ => {
            return Err(ParseError::MultipleTunnels {
                names: tunnels.into_keys().collect(),
            })
        }
    };

    if let Some(inner) = entry.name.as_deref().filter(|n| *n != name) {
        debug!(key = %name, field = inner, "tunnel map key overrides name field");
    }

    Ok(TunnelConfig {
        name,
        kind: entry.kind.unwrap_or_default(),
        interface: entry.interface.unwrap_or_default(),
        port: entry.port.unwrap_or_default(),
        target: entry.target.unwrap_or_default(),
        persistent_key: entry.persistent_key.unwrap_or_default(),
        description: entry.description.unwrap_or_default(),
        i2cp: group("i2cp", entry.i2cp)?,
        tunnel: group("options", entry.options)?,
        inbound: group("inbound", entry.inbound)?,
        outbound: group("outbound", entry.outbound)?,
    })
}

/// Re-wrap a library error as a located fault when a line can be recovered.
fn upgrade_error(text: &str, err: serde_yaml::Error) -> ParseError {
    let message = err.to_string();
    if let Some(location) = err.location() {
        return ParseFault::at(text, location.line(), location.column(), Dialect::Yaml, message)
            .into();
    }
    match ParseFault::from_native(text, Dialect::Yaml, &message) {
        Some(fault) => fault.into(),
        None => ParseError::Yaml(err),
    }
}

fn group(
    name: &'static str,
    raw: Option<BTreeMap<String, Value>>,
) -> Result<OptionGroup, ParseError> {
    raw.unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let value = option_value(name, &key, value)?;
            Ok((key, value))
        })
        .collect()
}

fn option_value(group: &'static str, key: &str, value: Value) -> Result<OptionValue, ParseError> {
    let unsupported = |found: &str| ParseError::UnsupportedValue {
        group,
        key: key.to_string(),
        found: found.to_string(),
    };

    match value {
        Value::Bool(b) => Ok(OptionValue::Bool(b)),
        Value::Number(n) => Ok(n
            .as_i64()
            .map(OptionValue::Int)
            .unwrap_or_else(|| OptionValue::Str(n.to_string()))),
        Value::String(s) => Ok(match BoolVocabulary::Keywords.matches(&s) {
            Some(b) => OptionValue::Bool(b),
            None => OptionValue::Str(s),
        }),
        Value::Null => Ok(OptionValue::Str(String::new())),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                Value::Number(n) => Ok(n.to_string()),
                Value::Bool(b) => Ok(b.to_string()),
                _ => Err(unsupported("nested collection in list")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(OptionValue::List),
        Value::Mapping(_) => Err(unsupported("mapping")),
        Value::Tagged(_) => Err(unsupported("tagged value")),
    }
}
