use std::fmt::Write;

use crate::dialect::Dialect;
use crate::error::GenerateError;
use crate::model::{OptionValue, TunnelConfig};
use crate::parser::ini::is_tunnel_option_key;

/// Render i2pd INI with a single `[Name]` section.
///
/// INI has no escapes, so a line break anywhere, or a tunnel option that
/// would be read back as another setting, is an error.
pub fn generate(config: &TunnelConfig) -> Result<String, GenerateError> {
    let mut out = String::new();

    if !config.name.is_empty() {
        single_line("name", &config.name)?;
        writeln!(out, "[{}]", config.name)?;
    }
    if !config.kind.is_empty() {
        line(&mut out, "type", &config.kind)?;
    }
    if !config.interface.is_empty() {
        line(&mut out, "host", &config.interface)?;
    }
    if config.port != 0 {
        writeln!(out, "port = {}", config.port)?;
    }
    if !config.target.is_empty() {
        let key = if config.is_server() {
            "address"
        } else {
            "destination"
        };
        line(&mut out, key, &config.target)?;
    }
    if !config.description.is_empty() {
        line(&mut out, "description", &config.description)?;
    }
    line(&mut out, "keys", &keys_value(config))?;

    for (key, value) in &config.i2cp {
        line(&mut out, &format!("i2cp.{key}"), &render(value))?;
    }
    for (key, value) in config.tunnel.iter().filter(|(k, _)| k.as_str() != "keyfile") {
        if !is_tunnel_option_key(key) {
            return Err(GenerateError::KeyCollision {
                key: key.clone(),
                dialect: Dialect::Ini,
            });
        }
        line(&mut out, key, &render(value))?;
    }
    for (key, value) in &config.inbound {
        line(&mut out, &format!("inbound.{key}"), &render(value))?;
    }
    for (key, value) in &config.outbound {
        line(&mut out, &format!("outbound.{key}"), &render(value))?;
    }

    Ok(out)
}

/// Write `key = value`, rejecting text the parser would split differently.
fn line(out: &mut String, key: &str, value: &str) -> Result<(), GenerateError> {
    single_line(key, key)?;
    single_line(key, value)?;
    if key.contains('=') || key.trim() != key || key.starts_with(['[', ';', '#']) {
        return Err(GenerateError::KeyCollision {
            key: key.to_string(),
            dialect: Dialect::Ini,
        });
    }
    writeln!(out, "{key} = {value}")?;
    Ok(())
}

fn single_line(key: &str, text: &str) -> Result<(), GenerateError> {
    if text.contains(['\n', '\r']) {
        return Err(GenerateError::LineBreak {
            key: key.to_string(),
            dialect: Dialect::Ini,
        });
    }
    Ok(())
}

/// `keys =` value: explicit keyfile, `<name>.dat`, or `transient`.
fn keys_value(config: &TunnelConfig) -> String {
    if !config.persistent_key {
        return "transient".to_string();
    }
    if let Some(keyfile) = config.tunnel.get("keyfile") {
        return keyfile.render(", ");
    }
    let stem = config.name.replace(' ', "_");
    if stem.is_empty() {
        "tunnel.dat".to_string()
    } else {
        format!("{stem}.dat")
    }
}

fn render(value: &OptionValue) -> String {
    value.render(", ")
}
