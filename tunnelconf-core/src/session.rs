//! Flat `key=value` option list handed to a SAM session.
//!
//! Key files are not touched here; a key manager consumes this list together
//! with [`TunnelConfig::name`] and [`TunnelConfig::persistent_key`].

use crate::model::{OptionGroup, TunnelConfig};

/// Lease-set encryption types injected when the config does not choose any.
pub const DEFAULT_LEASE_SET_ENC_TYPE: &str = "4,0";

/// Serialize the option groups into SAM session options.
///
/// Order is I2CP, Tunnel (unprefixed), inbound, outbound; keys sorted within
/// each group. `i2cp.leaseSetEncType` is appended when absent.
pub fn session_options(config: &TunnelConfig) -> Vec<String> {
    let mut options = Vec::new();
    push_group(&mut options, "i2cp.", &config.i2cp);
    push_group(&mut options, "", &config.tunnel);
    push_group(&mut options, "inbound.", &config.inbound);
    push_group(&mut options, "outbound.", &config.outbound);

    if !config.i2cp.contains_key("leaseSetEncType") {
        options.push(format!("i2cp.leaseSetEncType={DEFAULT_LEASE_SET_ENC_TYPE}"));
    }
    options
}

fn push_group(options: &mut Vec<String>, prefix: &str, group: &OptionGroup) {
    options.extend(
        group
            .iter()
            .map(|(key, value)| format!("{prefix}{key}={}", value.render(","))),
    );
}
