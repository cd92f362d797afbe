use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    Error,
}

/// Envelope for everything the binary prints on stdout
#[derive(Debug, Serialize)]
pub struct CliResponse {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl CliResponse {
    pub fn ok(data: impl Serialize) -> anyhow::Result<Self> {
        Ok(Self {
            status: Status::Ok,
            message: None,
            data: serde_json::to_value(data)?,
        })
    }

    /// Error envelope carrying the full context chain
    pub fn error(err: &anyhow::Error) -> Self {
        Self {
            status: Status::Error,
            message: Some(format!("{err:#}")),
            data: Value::Null,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, Status::Error)
    }

    pub fn render(&self, pretty: bool) -> String {
        let rendered = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        rendered.unwrap_or_else(|err| {
            format!(r#"{{"status":"error","message":"failed to serialize response: {err}"}}"#)
        })
    }
}
