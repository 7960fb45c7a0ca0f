//! Bridge configuration from command-line arguments
//!
//! Parsed once at startup and immutable thereafter.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use inverter_core::{ConnectParams, DriverConfig, MockConfig, Protocol};

/// Line-delimited JSON bridge to a solar inverter
#[derive(Debug, Clone, Parser)]
#[command(name = "inverterd", version, about)]
pub struct BridgeConfig {
    /// Inverter host name or IP address
    #[arg(long, env = "INVERTER_HOST")]
    pub host: String,

    /// Link protocol; selects the target port (UDP: 8899, TCP: 502)
    #[arg(long, env = "INVERTER_PROTOCOL", value_enum, default_value_t = ProtocolArg::Udp)]
    pub protocol: ProtocolArg,

    /// Connection timeout in seconds
    #[arg(long, env = "INVERTER_TIMEOUT", default_value_t = 5)]
    pub timeout: u64,

    /// Connection retry count
    #[arg(long, env = "INVERTER_RETRIES", default_value_t = 20)]
    pub retries: u32,

    /// Device driver to use
    #[arg(long, value_enum, default_value_t = DriverKind::Mock)]
    pub driver: DriverKind,
}

/// CLI-facing protocol selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProtocolArg {
    #[value(name = "UDP")]
    Udp,
    #[value(name = "TCP")]
    Tcp,
}

impl From<ProtocolArg> for Protocol {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::Udp => Protocol::Udp,
            ProtocolArg::Tcp => Protocol::Tcp,
        }
    }
}

/// In-tree driver selection; real wire drivers plug in out-of-tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DriverKind {
    /// Mock driver with canned telemetry (demo and test runs)
    Mock,
}

impl BridgeConfig {
    /// Connection parameters derived from the arguments
    pub fn connect_params(&self) -> ConnectParams {
        ConnectParams {
            host: self.host.clone(),
            port: Protocol::from(self.protocol).default_port(),
            timeout: Duration::from_secs(self.timeout),
            retries: self.retries,
        }
    }

    /// Driver configuration for [`inverter_core::create_connector`]
    pub fn driver_config(&self) -> DriverConfig {
        match self.driver {
            DriverKind::Mock => DriverConfig::Mock(MockConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_and_port_derivation() {
        let config = BridgeConfig::try_parse_from(["inverterd", "--host", "192.0.2.7"]).unwrap();
        assert_eq!(config.protocol, ProtocolArg::Udp);
        assert_eq!(config.timeout, 5);
        assert_eq!(config.retries, 20);

        let params = config.connect_params();
        assert_eq!(params.host, "192.0.2.7");
        assert_eq!(params.port, 8899);
        assert_eq!(params.timeout, Duration::from_secs(5));
        assert_eq!(params.retries, 20);
    }

    #[test]
    fn tcp_selects_modbus_port() {
        let config = BridgeConfig::try_parse_from([
            "inverterd",
            "--host",
            "inverter.local",
            "--protocol",
            "TCP",
        ])
        .unwrap();
        assert_eq!(config.connect_params().port, 502);
    }

    #[test]
    fn host_is_required() {
        assert!(BridgeConfig::try_parse_from(["inverterd"]).is_err());
    }
}
