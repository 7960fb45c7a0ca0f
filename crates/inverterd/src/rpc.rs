//! Line protocol envelope types
//!
//! One JSON object per line in each direction. The request `id` is opaque
//! caller data, round-tripped verbatim into the reply; an absent id is
//! represented as JSON `null`, which is also what replies to unparseable
//! lines carry (correlation is impossible there).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request parsed from one input line.
///
/// Unknown fields are ignored. A line that is not a JSON object with a
/// string `cmd` fails to parse and is reported as a malformed request.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Caller-supplied correlation data, `null` when absent
    #[serde(default)]
    pub id: Value,
    /// Command name
    pub cmd: String,
    /// Command-specific argument (only `set_min_soc` uses it)
    #[serde(default)]
    pub value: Option<Value>,
}

impl Request {
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// A reply serialized to one output line
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    /// The request's id, `null` when the request had none or never parsed
    pub id: Value,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// Create a success reply
    pub fn success(id: Value, data: Value) -> Self {
        Self {
            id,
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error reply
    pub fn failure(id: Value, error: impl Into<String>) -> Self {
        Self {
            id,
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// The closed set of recognized commands.
///
/// Parsing the command name up front makes an unrecognized name a normal,
/// exhaustively handled reply instead of a fallback path, and lets the
/// dispatcher reject it before any device interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    GetSensors,
    ReadRuntime,
    GetMinSoc,
    SetMinSoc,
}

impl Command {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "get_sensors" => Some(Self::GetSensors),
            "read_runtime" => Some(Self::ReadRuntime),
            "get_min_soc" => Some(Self::GetMinSoc),
            "set_min_soc" => Some(Self::SetMinSoc),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn request_parses_with_and_without_id() {
        let req = Request::parse(r#"{"id":1,"cmd":"get_min_soc"}"#).unwrap();
        assert_eq!(req.id, json!(1));
        assert_eq!(req.cmd, "get_min_soc");
        assert!(req.value.is_none());

        let req = Request::parse(r#"{"cmd":"read_runtime"}"#).unwrap();
        assert_eq!(req.id, Value::Null);
    }

    #[test]
    fn request_ignores_unknown_fields() {
        let req = Request::parse(r#"{"cmd":"get_sensors","extra":true,"ts":123}"#).unwrap();
        assert_eq!(req.cmd, "get_sensors");
    }

    #[test]
    fn request_requires_string_cmd() {
        assert!(Request::parse("not json at all").is_err());
        assert!(Request::parse(r#"{"id":1}"#).is_err());
        assert!(Request::parse(r#"{"cmd":7}"#).is_err());
        assert!(Request::parse(r#"[1,2,3]"#).is_err());
    }

    #[test]
    fn response_omits_absent_fields() {
        let line = serde_json::to_string(&Response::success(json!(2), json!({"a": 1}))).unwrap();
        assert_eq!(line, r#"{"id":2,"ok":true,"data":{"a":1}}"#);

        let line = serde_json::to_string(&Response::failure(Value::Null, "boom")).unwrap();
        assert_eq!(line, r#"{"id":null,"ok":false,"error":"boom"}"#);
    }

    #[test]
    fn response_preserves_unicode() {
        let line =
            serde_json::to_string(&Response::success(Value::Null, json!({"unit": "°C"}))).unwrap();
        assert!(line.contains("°C"));
        assert!(!line.contains("\\u"));
    }

    #[test]
    fn command_names_are_closed() {
        assert_eq!(Command::from_name("get_sensors"), Some(Command::GetSensors));
        assert_eq!(Command::from_name("read_runtime"), Some(Command::ReadRuntime));
        assert_eq!(Command::from_name("get_min_soc"), Some(Command::GetMinSoc));
        assert_eq!(Command::from_name("set_min_soc"), Some(Command::SetMinSoc));
        assert_eq!(Command::from_name("bogus"), None);
        assert_eq!(Command::from_name("GET_SENSORS"), None);
    }
}
