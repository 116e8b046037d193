//! Single-entry `tunnels:` document.
//!
//! The layout is fixed, so this writes YAML directly instead of going through
//! a serializer. Scalars that a YAML reader could take for anything other
//! than a string are double-quoted.

use std::fmt::{self, Write};

use crate::model::{OptionGroup, OptionValue, TunnelConfig};

const ENTRY: &str = "    ";
const OPTION: &str = "      ";

/// Words a YAML 1.1 or 1.2 reader may resolve to a non-string.
const RESERVED_WORDS: &[&str] = &[
    "true", "false", "yes", "no", "on", "off", "y", "n", "null", "~", ".inf", "-.inf", "+.inf",
    ".nan",
];

pub fn generate(config: &TunnelConfig) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "tunnels:")?;
    writeln!(out, "  {}:", scalar(&config.name)?)?;
    writeln!(out, "{ENTRY}name: {}", scalar(&config.name)?)?;
    writeln!(out, "{ENTRY}type: {}", scalar(&config.kind)?)?;
    if !config.interface.is_empty() {
        writeln!(out, "{ENTRY}interface: {}", scalar(&config.interface)?)?;
    }
    if config.port != 0 {
        writeln!(out, "{ENTRY}port: {}", config.port)?;
    }
    if !config.target.is_empty() {
        writeln!(out, "{ENTRY}target: {}", scalar(&config.target)?)?;
    }
    if config.persistent_key {
        writeln!(out, "{ENTRY}persistentKey: true")?;
    }
    if !config.description.is_empty() {
        writeln!(out, "{ENTRY}description: {}", scalar(&config.description)?)?;
    }

    write_group(&mut out, "i2cp", &config.i2cp)?;
    write_group(&mut out, "options", &config.tunnel)?;
    write_group(&mut out, "inbound", &config.inbound)?;
    write_group(&mut out, "outbound", &config.outbound)?;

    Ok(out)
}

fn write_group(out: &mut String, name: &str, group: &OptionGroup) -> fmt::Result {
    if group.is_empty() {
        return Ok(());
    }
    writeln!(out, "{ENTRY}{name}:")?;
    for (key, value) in group {
        let key = scalar(key)?;
        match value {
            OptionValue::Bool(b) => writeln!(out, "{OPTION}{key}: {b}")?,
            OptionValue::Int(n) => writeln!(out, "{OPTION}{key}: {n}")?,
            OptionValue::Str(s) => writeln!(out, "{OPTION}{key}: {}", scalar(s)?)?,
            OptionValue::List(items) if items.is_empty() => writeln!(out, "{OPTION}{key}: []")?,
            OptionValue::List(items) => {
                writeln!(out, "{OPTION}{key}:")?;
                for item in items {
                    writeln!(out, "{OPTION}- {}", scalar(item)?)?;
                }
            }
        }
    }
    Ok(())
}

/// Plain scalar when unambiguous, double-quoted otherwise.
fn scalar(s: &str) -> Result<String, fmt::Error> {
    if is_plain_safe(s) {
        return Ok(s.to_string());
    }
    serde_json::to_string(s).map_err(|_| fmt::Error)
}

fn is_plain_safe(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };
    if s.trim() != s || s.chars().any(char::is_control) {
        return false;
    }
    if "-?:,[]{}#&*!|>'\"%@`".contains(first) {
        return false;
    }
    if s.contains(": ") || s.contains(" #") || s.ends_with(':') {
        return false;
    }

    let lower = s.to_ascii_lowercase();
    if RESERVED_WORDS.contains(&lower.as_str()) {
        return false;
    }
    let unsigned = lower.trim_start_matches(['+', '-']);
    if ["0x", "0o", "0b"].iter().any(|p| unsigned.starts_with(p)) {
        return false;
    }
    s.parse::<f64>().is_err()
}
