//! Mock inverter driver for testing and demo runs

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::driver::{ConnectParams, Inverter, InverterConnector, RuntimeData};
use crate::error::DriverError;
use crate::models::SensorInfo;

/// Mock driver configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockConfig {
    /// Simulated per-operation latency in milliseconds
    #[serde(default)]
    pub latency_ms: u64,
}

/// Mock connector that hands out a shared [`MockInverter`].
///
/// The same device instance is returned on every connect so tests can hold
/// a reference to it and inspect state across session re-establishment.
pub struct MockConnector {
    device: Arc<MockInverter>,
    connect_count: AtomicU32,
    fail_next_connect: AtomicBool,
}

impl MockConnector {
    pub fn new(config: &MockConfig) -> Self {
        Self {
            device: Arc::new(MockInverter::new(config.clone())),
            connect_count: AtomicU32::new(0),
            fail_next_connect: AtomicBool::new(false),
        }
    }

    /// The device this connector hands out
    pub fn device(&self) -> Arc<MockInverter> {
        self.device.clone()
    }

    /// Number of successful connects so far
    pub fn connect_count(&self) -> u32 {
        self.connect_count.load(Ordering::SeqCst)
    }

    /// Make the next connect fail, modelling an exhausted retry budget
    pub fn fail_next_connect(&self) {
        self.fail_next_connect.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl InverterConnector for MockConnector {
    async fn connect(&self, params: &ConnectParams) -> Result<Arc<dyn Inverter>, DriverError> {
        if self.device.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.device.config.latency_ms)).await;
        }

        if self.fail_next_connect.swap(false, Ordering::SeqCst) {
            return Err(DriverError::ConnectFailed(format!(
                "{}:{} unreachable after {} attempts",
                params.host, params.port, params.retries
            )));
        }

        self.connect_count.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(host = %params.host, port = params.port, "mock driver: connected");
        Ok(self.device.clone())
    }
}

/// Mock inverter with canned sensors and telemetry plus settable DoD state
pub struct MockInverter {
    config: MockConfig,
    sensors: RwLock<Vec<SensorInfo>>,
    runtime: RwLock<RuntimeData>,
    dod: RwLock<u8>,
    fail_next_op: AtomicBool,
}

impl MockInverter {
    pub fn new(config: MockConfig) -> Self {
        Self {
            config,
            sensors: RwLock::new(Self::default_sensors()),
            runtime: RwLock::new(Self::default_runtime()),
            dod: RwLock::new(20),
            fail_next_op: AtomicBool::new(false),
        }
    }

    /// Replace the canned sensor list
    pub fn set_sensors(&self, sensors: Vec<SensorInfo>) {
        *self.sensors.write() = sensors;
    }

    /// Replace the canned runtime snapshot
    pub fn set_runtime(&self, runtime: RuntimeData) {
        *self.runtime.write() = runtime;
    }

    /// Set the stored DoD value directly
    pub fn set_dod(&self, dod: u8) {
        *self.dod.write() = dod;
    }

    /// DoD value currently stored on the device
    pub fn current_dod(&self) -> u8 {
        *self.dod.read()
    }

    /// Make the next device operation fail, modelling a mid-operation fault
    pub fn fail_next_op(&self) {
        self.fail_next_op.store(true, Ordering::SeqCst);
    }

    fn default_sensors() -> Vec<SensorInfo> {
        let meta = [
            ("vpv1", "PV1 Voltage", "V"),
            ("ipv1", "PV1 Current", "A"),
            ("ppv", "PV Power", "W"),
            ("battery_soc", "Battery State of Charge", "%"),
            ("e_day", "Today's PV Generation", "kWh"),
            ("temperature", "Inverter Temperature", "°C"),
        ];
        meta.iter()
            .map(|(id, name, unit)| SensorInfo {
                id: (*id).into(),
                name: (*name).into(),
                unit: (*unit).into(),
            })
            .collect()
    }

    fn default_runtime() -> RuntimeData {
        let mut map = RuntimeData::new();
        map.insert("vpv1".into(), json!(321.4));
        map.insert("ipv1".into(), json!(4.2));
        map.insert("ppv".into(), json!(1350));
        map.insert("battery_soc".into(), json!(76));
        map.insert("e_day".into(), json!(8.6));
        map.insert("temperature".into(), json!(41.5));
        map
    }

    async fn fallible_op(&self, op: &str) -> Result<(), DriverError> {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }
        if self.fail_next_op.swap(false, Ordering::SeqCst) {
            return Err(DriverError::Protocol(format!(
                "simulated device fault during {op}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Inverter for MockInverter {
    async fn sensors(&self) -> Result<Vec<SensorInfo>, DriverError> {
        self.fallible_op("sensors").await?;
        Ok(self.sensors.read().clone())
    }

    async fn read_runtime(&self) -> Result<RuntimeData, DriverError> {
        self.fallible_op("read_runtime").await?;
        Ok(self.runtime.read().clone())
    }

    async fn ongrid_battery_dod(&self) -> Result<u8, DriverError> {
        self.fallible_op("ongrid_battery_dod").await?;
        Ok(*self.dod.read())
    }

    async fn set_ongrid_battery_dod(&self, dod: u8) -> Result<(), DriverError> {
        self.fallible_op("set_ongrid_battery_dod").await?;
        *self.dod.write() = dod;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Protocol;

    fn params() -> ConnectParams {
        ConnectParams {
            host: "192.0.2.1".into(),
            port: Protocol::Udp.default_port(),
            timeout: Duration::from_secs(5),
            retries: 20,
        }
    }

    #[tokio::test]
    async fn connect_counts_and_shares_device() {
        let connector = MockConnector::new(&MockConfig::default());
        let a = connector.connect(&params()).await.unwrap();
        let b = connector.connect(&params()).await.unwrap();
        assert_eq!(connector.connect_count(), 2);

        a.set_ongrid_battery_dod(42).await.unwrap();
        assert_eq!(b.ongrid_battery_dod().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn injected_connect_failure_is_one_shot() {
        let connector = MockConnector::new(&MockConfig::default());
        connector.fail_next_connect();
        assert!(connector.connect(&params()).await.is_err());
        assert!(connector.connect(&params()).await.is_ok());
        assert_eq!(connector.connect_count(), 1);
    }

    #[tokio::test]
    async fn injected_op_failure_is_one_shot() {
        let device = MockInverter::new(MockConfig::default());
        device.fail_next_op();
        assert!(device.read_runtime().await.is_err());
        assert!(device.read_runtime().await.is_ok());
    }

    #[tokio::test]
    async fn default_state() {
        let device = MockInverter::new(MockConfig::default());
        assert_eq!(device.ongrid_battery_dod().await.unwrap(), 20);
        let sensors = device.sensors().await.unwrap();
        assert_eq!(sensors.first().map(|s| s.id.as_str()), Some("vpv1"));
        let runtime = device.read_runtime().await.unwrap();
        assert!(runtime.contains_key("ppv"));
    }
}
