//! Data model shared between the bridge and drivers
//!
//! Besides the sensor descriptor this module holds the battery reserve
//! arithmetic. The inverter's native representation is "on-grid depth of
//! discharge" (DoD, 0-99 %); the external representation is "minimum state
//! of charge" (min SOC, 0-100 %). The two are related by
//! `min_soc = 100 - dod`, with each side clamped to its own range.

use serde::{Deserialize, Serialize};

/// Read-only description of one inverter sensor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorInfo {
    /// Sensor identifier (e.g. `vpv1`)
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Unit string as reported by the device (e.g. `V`, `kWh`)
    pub unit: String,
}

/// Battery reserve as read from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryReserve {
    /// Minimum state of charge percent (0-100)
    pub min_soc: u8,
    /// On-grid depth of discharge percent (0-99)
    pub ongrid_dod: u8,
}

impl BatteryReserve {
    /// Derive the external view from the device's native DoD value.
    pub fn from_dod(dod: u8) -> Self {
        Self {
            min_soc: 100u8.saturating_sub(dod),
            ongrid_dod: dod,
        }
    }
}

/// Battery reserve as applied by a write.
///
/// The applied value reflects the post-clamp DoD, so it may differ from
/// the caller's requested min SOC by one at the 0/100 boundary: a request
/// of 0 clamps DoD to 99 and reports `applied_min_soc = 1`. This is the
/// documented precision contract of the device interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedReserve {
    /// Min SOC actually in effect after clamping (1-100)
    pub applied_min_soc: u8,
    /// DoD actually written to the device (0-99)
    pub applied_ongrid_dod: u8,
}

impl AppliedReserve {
    /// Clamp a requested min SOC to [0,100], convert to DoD clamped to
    /// [0,99], and report the reserve that results.
    pub fn from_requested(min_soc: i64) -> Self {
        let soc = min_soc.clamp(0, 100);
        let dod = (100 - soc).clamp(0, 99) as u8;
        Self {
            applied_min_soc: 100 - dod,
            applied_ongrid_dod: dod,
        }
    }
}
