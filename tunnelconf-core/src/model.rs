use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// A single coerced option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
    /// Ordered list produced by splitting a comma-separated token. Elements stay strings.
    List(Vec<String>),
}

impl OptionValue {
    /// Render the value with `separator` between list elements.
    ///
    /// Booleans always render lowercase, whatever vocabulary produced them.
    pub fn render(&self, separator: &str) -> String {
        match self {
            OptionValue::Bool(true) => "true".to_string(),
            OptionValue::Bool(false) => "false".to_string(),
            OptionValue::Int(n) => n.to_string(),
            OptionValue::Str(s) => s.clone(),
            OptionValue::List(items) => items.join(separator),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Display for OptionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(","))
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

/// Option-name to value mapping for one semantic group.
pub type OptionGroup = BTreeMap<String, OptionValue>;

/// Canonical tunnel configuration shared by every dialect.
///
/// Parsers always populate all four option groups (possibly empty), so callers
/// never have to special-case a missing group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TunnelConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub interface: String,
    /// Local port; 0 means unset.
    pub port: i64,
    /// `host` or `host:port`.
    pub target: String,
    pub persistent_key: bool,
    pub description: String,
    pub i2cp: OptionGroup,
    /// Generic tunnel options (`options` in YAML, `option.i2ptunnel.*` in properties).
    pub tunnel: OptionGroup,
    pub inbound: OptionGroup,
    pub outbound: OptionGroup,
}

impl TunnelConfig {
    /// Create an empty config with a name and type.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Whether the tunnel type denotes a server-class tunnel.
    pub fn is_server(&self) -> bool {
        matches!(
            self.kind.to_ascii_lowercase().as_str(),
            "server" | "httpserver" | "ircserver" | "streamrserver" | "httpbidirserver"
        )
    }

    /// Flatten the whole config into a `Field` / `Group.key` string map.
    pub fn flat_options(&self) -> BTreeMap<String, String> {
        let mut options = BTreeMap::new();
        options.insert("Name".to_string(), self.name.clone());
        options.insert("Type".to_string(), self.kind.clone());
        if !self.interface.is_empty() {
            options.insert("Interface".to_string(), self.interface.clone());
        }
        if self.port != 0 {
            options.insert("Port".to_string(), self.port.to_string());
        }
        if !self.target.is_empty() {
            options.insert("Target".to_string(), self.target.clone());
        }
        if self.persistent_key {
            options.insert("PersistentKey".to_string(), "true".to_string());
        }
        if !self.description.is_empty() {
            options.insert("Description".to_string(), self.description.clone());
        }

        let groups = [
            ("I2CP", &self.i2cp),
            ("Tunnel", &self.tunnel),
            ("Inbound", &self.inbound),
            ("Outbound", &self.outbound),
        ];
        for (prefix, group) in groups {
            for (key, value) in group {
                options.insert(format!("{prefix}.{key}"), value.to_string());
            }
        }
        options
    }
}
