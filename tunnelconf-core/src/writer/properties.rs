use std::fmt::Write;

use crate::model::{OptionValue, TunnelConfig};
use crate::parser::properties::{escape, FLAT_TUNNEL_KEYS};

/// Render Java router properties. Keys and values are escaped, so line
/// breaks and separators survive a read back.
pub fn generate(config: &TunnelConfig) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    if !config.name.is_empty() {
        line(&mut out, "name", &config.name)?;
    }
    if !config.kind.is_empty() {
        line(&mut out, "type", &config.kind)?;
    }
    if !config.interface.is_empty() {
        line(&mut out, "interface", &config.interface)?;
    }
    if config.port != 0 {
        writeln!(out, "listenPort={}", config.port)?;
    }
    if !config.target.is_empty() {
        line(&mut out, "targetDestination", &config.target)?;
    }
    if config.persistent_key {
        writeln!(out, "option.persistentClientKey=true")?;
    }
    if !config.description.is_empty() {
        line(&mut out, "description", &config.description)?;
    }

    for (key, value) in &config.i2cp {
        line(&mut out, &format!("option.i2cp.{key}"), &render(value))?;
    }
    for (key, value) in &config.tunnel {
        if FLAT_TUNNEL_KEYS.contains(&key.as_str()) {
            line(&mut out, key, &render(value))?;
        } else {
            line(&mut out, &format!("option.i2ptunnel.{key}"), &render(value))?;
        }
    }
    for (key, value) in &config.inbound {
        line(&mut out, &format!("option.inbound.{key}"), &render(value))?;
    }
    for (key, value) in &config.outbound {
        line(&mut out, &format!("option.outbound.{key}"), &render(value))?;
    }

    Ok(out)
}

fn line(out: &mut String, key: &str, value: &str) -> std::fmt::Result {
    writeln!(out, "{}={}", escape(key, true), escape(value, false))
}

fn render(value: &OptionValue) -> String {
    value.render(",")
}
