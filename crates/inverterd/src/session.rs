//! Session holder: at most one live device handle
//!
//! The handle is created on first use and dropped on any failure, so the
//! next request starts from a fresh connect. The holder is owned by the
//! bridge loop's single thread of control; with one request in flight at
//! a time there is nothing to lock.

use std::sync::Arc;

use inverter_core::{ConnectParams, DriverError, Inverter, InverterConnector};
use tracing::{info, warn};

pub struct Session {
    connector: Arc<dyn InverterConnector>,
    params: ConnectParams,
    device: Option<Arc<dyn Inverter>>,
}

impl Session {
    pub fn new(connector: Arc<dyn InverterConnector>, params: ConnectParams) -> Self {
        Self {
            connector,
            params,
            device: None,
        }
    }

    /// Return the live handle, connecting first if none exists.
    ///
    /// The stored handle is only ever a fully-connected one; on connect
    /// failure nothing is stored and the error propagates to the caller.
    pub async fn device(&mut self) -> Result<Arc<dyn Inverter>, DriverError> {
        if let Some(device) = &self.device {
            return Ok(device.clone());
        }

        let device = self.connector.connect(&self.params).await?;
        info!(host = %self.params.host, port = self.params.port, "session established");
        self.device = Some(device.clone());
        Ok(device)
    }

    /// Drop the handle so the next request reconnects from scratch.
    pub fn invalidate(&mut self) {
        if self.device.take().is_some() {
            warn!("session invalidated, will reconnect on next request");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.device.is_some()
    }
}
