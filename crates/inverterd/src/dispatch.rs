//! Command dispatcher
//!
//! Turns one raw input line into exactly one [`Response`]. Nothing raises
//! past this boundary: parse failures, unknown commands, bad values and
//! driver errors all come back as `ok:false` replies. Driver errors
//! additionally invalidate the session so the next request reconnects.

use serde_json::{json, Value};
use tracing::{debug, warn};

use inverter_core::{AppliedReserve, BatteryReserve, DriverError};

use crate::rpc::{Command, Request, Response};
use crate::session::Session;

/// Handle one non-empty input line.
pub async fn handle_line(session: &mut Session, line: &str) -> Response {
    let req = match Request::parse(line) {
        Ok(req) => req,
        Err(err) => {
            debug!(%err, "malformed request line");
            return Response::failure(Value::Null, format!("Invalid request: {err}"));
        }
    };

    let Some(cmd) = Command::from_name(&req.cmd) else {
        // Caller error, not a device fault: no connect is attempted and
        // the session stays untouched.
        return Response::failure(req.id, format!("Unknown cmd: {}", req.cmd));
    };

    // Argument coercion happens before any device interaction; a bad
    // argument must not invalidate the session.
    let action = match cmd {
        Command::GetSensors => Action::GetSensors,
        Command::ReadRuntime => Action::ReadRuntime,
        Command::GetMinSoc => Action::GetMinSoc,
        Command::SetMinSoc => match coerce_min_soc(req.value.as_ref()) {
            Ok(v) => Action::SetMinSoc(AppliedReserve::from_requested(v)),
            Err(msg) => return Response::failure(req.id, msg),
        },
    };

    match run_command(session, action).await {
        Ok(data) => Response::success(req.id, data),
        Err(err) => {
            warn!(cmd = %req.cmd, %err, "device interaction failed");
            session.invalidate();
            Response::failure(req.id, err.to_string())
        }
    }
}

/// A command with its argument already validated, ready to run against
/// the device.
enum Action {
    GetSensors,
    ReadRuntime,
    GetMinSoc,
    SetMinSoc(AppliedReserve),
}

/// The single fallible device-interaction boundary.
async fn run_command(session: &mut Session, action: Action) -> Result<Value, DriverError> {
    let device = session.device().await?;

    match action {
        Action::GetSensors => {
            let sensors = device.sensors().await?;
            debug!(count = sensors.len(), "sensors enumerated");
            Ok(Value::Array(
                sensors
                    .into_iter()
                    .map(|s| json!({"id": s.id, "name": s.name, "unit": s.unit}))
                    .collect(),
            ))
        }
        Action::ReadRuntime => {
            let runtime = device.read_runtime().await?;
            Ok(Value::Object(runtime))
        }
        Action::GetMinSoc => {
            let dod = device.ongrid_battery_dod().await?;
            Ok(json!(BatteryReserve::from_dod(dod)))
        }
        Action::SetMinSoc(applied) => {
            device
                .set_ongrid_battery_dod(applied.applied_ongrid_dod)
                .await?;
            debug!(dod = applied.applied_ongrid_dod, "battery reserve updated");
            Ok(json!(applied))
        }
    }
}

/// Coerce the caller-dependent `value` field to an integer min SOC.
///
/// Accepts integers, floats (truncated) and numeric strings; anything
/// else is rejected here, before the device is touched.
fn coerce_min_soc(value: Option<&Value>) -> Result<i64, String> {
    match value {
        None | Some(Value::Null) => Err("set_min_soc requires a numeric 'value'".into()),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| format!("Invalid value: {n} is out of integer range")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("Invalid value: {s:?} is not an integer")),
        Some(other) => Err(format!(
            "Invalid value: expected an integer, got {other}"
        )),
    }
}
