//! Capability interface between the bridge and inverter drivers
//!
//! A driver is two trait objects: an [`InverterConnector`] that knows how
//! to establish a link, and the [`Inverter`] handle it yields. The bridge
//! never sees framing, registers or unit tables; those belong to the
//! driver behind this seam.
//!
//! # Example
//!
//! ```ignore
//! use inverter_core::{create_connector, ConnectParams, DriverConfig, Protocol};
//!
//! let connector = create_connector(&DriverConfig::default())?;
//! let device = connector.connect(&params).await?;
//! let sensors = device.sensors().await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DriverError;
use crate::mock::{MockConfig, MockConnector};
use crate::models::SensorInfo;

/// Runtime telemetry snapshot: sensor id to current value
pub type RuntimeData = serde_json::Map<String, serde_json::Value>;

/// Link protocol selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    /// Broadcast/discovery protocol on port 8899
    #[default]
    Udp,
    /// Modbus TCP on port 502
    Tcp,
}

impl Protocol {
    /// Default port for this protocol
    pub fn default_port(self) -> u16 {
        match self {
            Protocol::Udp => 8899,
            Protocol::Tcp => 502,
        }
    }
}

/// Connection parameters, fixed for the process lifetime
#[derive(Debug, Clone)]
pub struct ConnectParams {
    /// Inverter host name or IP address
    pub host: String,
    /// Target port, derived from the protocol selector
    pub port: u16,
    /// Per-attempt connection timeout
    pub timeout: Duration,
    /// Number of connect attempts before the driver gives up
    pub retries: u32,
}

/// Establishes a connection to an inverter.
///
/// The retry policy belongs to the driver: `connect` may retry internally
/// up to `params.retries` times and only reports failure once the budget
/// is exhausted.
#[async_trait]
pub trait InverterConnector: Send + Sync {
    async fn connect(&self, params: &ConnectParams) -> Result<Arc<dyn Inverter>, DriverError>;
}

/// A live inverter handle.
///
/// A handle is either fully connected and usable or it does not exist;
/// drivers must not hand out half-initialized handles. Any error returned
/// from these methods tells the caller the handle is no longer trustworthy.
#[async_trait]
pub trait Inverter: Send + Sync {
    /// Enumerate the sensors this device exposes, in device order.
    async fn sensors(&self) -> Result<Vec<SensorInfo>, DriverError>;

    /// Read a snapshot of current runtime telemetry.
    async fn read_runtime(&self) -> Result<RuntimeData, DriverError>;

    /// Read the on-grid battery depth of discharge percent (0-99).
    async fn ongrid_battery_dod(&self) -> Result<u8, DriverError>;

    /// Write the on-grid battery depth of discharge percent.
    async fn set_ongrid_battery_dod(&self, dod: u8) -> Result<(), DriverError>;
}

/// Driver configuration
///
/// Only the mock driver ships in-tree; real wire drivers implement
/// [`InverterConnector`] out-of-tree and are wired in by the embedding
/// application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DriverConfig {
    /// Mock driver for testing and demo runs
    Mock(MockConfig),
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::Mock(MockConfig::default())
    }
}

/// Create a connector based on configuration
pub fn create_connector(config: &DriverConfig) -> Result<Arc<dyn InverterConnector>, DriverError> {
    match config {
        DriverConfig::Mock(cfg) => Ok(Arc::new(MockConnector::new(cfg))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_selects_port() {
        assert_eq!(Protocol::Udp.default_port(), 8899);
        assert_eq!(Protocol::Tcp.default_port(), 502);
    }

    #[test]
    fn protocol_parses_uppercase() {
        let p: Protocol = serde_json::from_str("\"UDP\"").unwrap();
        assert_eq!(p, Protocol::Udp);
        let p: Protocol = serde_json::from_str("\"TCP\"").unwrap();
        assert_eq!(p, Protocol::Tcp);
    }

    #[test]
    fn default_driver_is_mock() {
        let config = DriverConfig::default();
        assert!(matches!(config, DriverConfig::Mock(_)));
        assert!(create_connector(&config).is_ok());
    }
}
