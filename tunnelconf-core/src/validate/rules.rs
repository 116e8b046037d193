//! Static tunnel-type rule table.

use std::net::IpAddr;

use serde::Serialize;

use crate::model::TunnelConfig;

/// Known tunnel kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TunnelKind {
    HttpClient,
    HttpServer,
    Socks,
    SocksServer,
    Client,
    Server,
    IrcClient,
    IrcServer,
    StreamClient,
    StreamServer,
    HttpBidirServer,
    SocksIrc,
}

/// Field a rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Port,
    Target,
    Interface,
}

/// Rule evaluators. `Required*` checks presence first, then format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Check {
    RequiredPort,
    RequiredTarget,
    RequiredInterface,
    PortRange,
    TargetFormat,
    InterfaceFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub check: Check,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TunnelSpec {
    pub kind: TunnelKind,
    /// Value of the `type` field, lowercase.
    pub type_name: &'static str,
    pub description: &'static str,
    pub rules: &'static [Rule],
}

const PORT_IF_SET: Rule = Rule {
    check: Check::PortRange,
    description: "Port must be valid if specified",
};
const INTERFACE_IF_SET: Rule = Rule {
    check: Check::InterfaceFormat,
    description: "Interface must be valid if specified",
};
const TARGET_IF_SET: Rule = Rule {
    check: Check::TargetFormat,
    description: "Target must be valid if specified",
};

const fn required(check: Check, description: &'static str) -> Rule {
    Rule { check, description }
}

/// Every supported tunnel type, in display order.
pub static TUNNEL_SPECS: &[TunnelSpec] = &[
    TunnelSpec {
        kind: TunnelKind::HttpClient,
        type_name: "httpclient",
        description: "HTTP proxy client tunnel",
        rules: &[
            required(Check::RequiredPort, "Local port is required for HTTP client"),
            INTERFACE_IF_SET,
            TARGET_IF_SET,
        ],
    },
    TunnelSpec {
        kind: TunnelKind::HttpServer,
        type_name: "httpserver",
        description: "HTTP server tunnel",
        rules: &[
            required(Check::RequiredTarget, "Target is required for HTTP server"),
            PORT_IF_SET,
            INTERFACE_IF_SET,
        ],
    },
    TunnelSpec {
        kind: TunnelKind::Socks,
        type_name: "sockstunnel",
        description: "SOCKS proxy tunnel",
        rules: &[
            required(Check::RequiredPort, "Local port is required for SOCKS tunnel"),
            INTERFACE_IF_SET,
        ],
    },
    TunnelSpec {
        kind: TunnelKind::SocksServer,
        type_name: "socksserver",
        description: "SOCKS server tunnel",
        rules: &[
            required(Check::RequiredPort, "Local port is required for SOCKS tunnel"),
            INTERFACE_IF_SET,
        ],
    },
    TunnelSpec {
        kind: TunnelKind::Client,
        type_name: "client",
        description: "Generic client tunnel",
        rules: &[
            required(Check::RequiredPort, "Local port is required for client tunnel"),
            TARGET_IF_SET,
            INTERFACE_IF_SET,
        ],
    },
    TunnelSpec {
        kind: TunnelKind::Server,
        type_name: "server",
        description: "Generic server tunnel",
        rules: &[
            required(Check::RequiredTarget, "Target is required for server tunnel"),
            PORT_IF_SET,
            INTERFACE_IF_SET,
        ],
    },
    TunnelSpec {
        kind: TunnelKind::IrcClient,
        type_name: "ircclient",
        description: "IRC client tunnel",
        rules: &[
            required(Check::RequiredPort, "Local port is required for IRC client"),
            INTERFACE_IF_SET,
        ],
    },
    TunnelSpec {
        kind: TunnelKind::IrcServer,
        type_name: "ircserver",
        description: "IRC server tunnel",
        rules: &[
            required(Check::RequiredTarget, "Target is required for IRC server"),
            PORT_IF_SET,
            INTERFACE_IF_SET,
        ],
    },
    TunnelSpec {
        kind: TunnelKind::StreamClient,
        type_name: "streamrclient",
        description: "Streaming client tunnel",
        rules: &[
            required(Check::RequiredPort, "Local port is required for streaming client"),
            INTERFACE_IF_SET,
        ],
    },
    TunnelSpec {
        kind: TunnelKind::StreamServer,
        type_name: "streamrserver",
        description: "Streaming server tunnel",
        rules: &[
            required(Check::RequiredTarget, "Target is required for streaming server"),
            PORT_IF_SET,
            INTERFACE_IF_SET,
        ],
    },
    TunnelSpec {
        kind: TunnelKind::HttpBidirServer,
        type_name: "httpbidirserver",
        description: "HTTP bidirectional server tunnel",
        rules: &[
            required(Check::RequiredTarget, "Target is required for bidirectional server"),
            PORT_IF_SET,
            INTERFACE_IF_SET,
        ],
    },
    TunnelSpec {
        kind: TunnelKind::SocksIrc,
        type_name: "socksirc",
        description: "SOCKS IRC proxy tunnel",
        rules: &[
            required(Check::RequiredPort, "Local port is required for SOCKS IRC"),
            INTERFACE_IF_SET,
        ],
    },
];

/// Look up a tunnel type, case-insensitively.
pub fn lookup(type_name: &str) -> Option<&'static TunnelSpec> {
    let lower = type_name.to_ascii_lowercase();
    TUNNEL_SPECS.iter().find(|spec| spec.type_name == lower)
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Port => "port",
            Field::Target => "target",
            Field::Interface => "interface",
        }
    }
}

impl Check {
    pub fn field(self) -> Field {
        match self {
            Check::RequiredPort | Check::PortRange => Field::Port,
            Check::RequiredTarget | Check::TargetFormat => Field::Target,
            Check::RequiredInterface | Check::InterfaceFormat => Field::Interface,
        }
    }

    pub fn required(self) -> bool {
        matches!(
            self,
            Check::RequiredPort | Check::RequiredTarget | Check::RequiredInterface
        )
    }

    /// Run the check; `Err` carries the reason text.
    pub fn evaluate(self, config: &TunnelConfig, strict: bool) -> Result<(), String> {
        match self {
            Check::RequiredPort if config.port <= 0 => {
                Err("port must be specified and greater than 0".to_string())
            }
            Check::RequiredTarget if config.target.is_empty() => {
                Err("target must be specified".to_string())
            }
            Check::RequiredInterface if config.interface.is_empty() => {
                Err("interface must be specified".to_string())
            }
            Check::RequiredPort | Check::PortRange => check_port(config.port, strict),
            Check::RequiredTarget | Check::TargetFormat => check_target(&config.target),
            Check::RequiredInterface | Check::InterfaceFormat => {
                check_interface(&config.interface, strict)
            }
        }
    }
}

fn check_port(port: i64, strict: bool) -> Result<(), String> {
    if port <= 0 {
        return Ok(());
    }
    if !(1..=65535).contains(&port) {
        return Err(format!("port {port} is out of valid range (1-65535)"));
    }
    if strict && port < 1024 {
        return Err(format!(
            "port {port} is in privileged range (1-1023), may require root privileges"
        ));
    }
    Ok(())
}

fn check_interface(interface: &str, strict: bool) -> Result<(), String> {
    if interface.is_empty() || interface == "localhost" || interface.parse::<IpAddr>().is_ok() {
        return Ok(());
    }
    if strict {
        return Err(format!(
            "interface '{interface}' should be a valid IP address or localhost"
        ));
    }
    if interface.chars().any(char::is_whitespace) {
        return Err(format!("interface '{interface}' contains whitespace characters"));
    }
    Ok(())
}

fn check_target(target: &str) -> Result<(), String> {
    if target.is_empty() {
        return Ok(());
    }

    let parts: Vec<&str> = target.split(':').collect();
    if parts.len() > 2 {
        return Err(format!(
            "target '{target}' has invalid format, should be 'host' or 'host:port'"
        ));
    }

    let host = parts[0];
    if host.is_empty() {
        return Err(format!("target '{target}' has empty host part"));
    }
    if host.parse::<IpAddr>().is_err() && host.chars().any(char::is_whitespace) {
        return Err(format!("target host '{host}' contains whitespace characters"));
    }

    if let Some(port) = parts.get(1) {
        let port: i64 = port
            .parse()
            .map_err(|_| format!("target port '{port}' is not a valid number"))?;
        if !(1..=65535).contains(&port) {
            return Err(format!("target port {port} is out of valid range (1-65535)"));
        }
    }
    Ok(())
}
