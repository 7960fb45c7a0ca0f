//! inverter-core - Core traits and types for inverter bridge drivers
//!
//! This crate provides the capability interface between the bridge daemon
//! and a concrete inverter driver. The wire protocol (framing, register
//! decoding, unit conversion) lives behind the [`Inverter`] and
//! [`InverterConnector`] traits; the bridge only ever talks to trait
//! objects, so real drivers can be plugged in out-of-tree.

pub mod driver;
pub mod error;
pub mod mock;
pub mod models;

pub use driver::{
    create_connector, ConnectParams, DriverConfig, Inverter, InverterConnector, Protocol,
    RuntimeData,
};
pub use error::{DriverError, DriverResult};
pub use mock::{MockConfig, MockConnector, MockInverter};
pub use models::{AppliedReserve, BatteryReserve, SensorInfo};
