use jiff::Timestamp;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime: String,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct DocLink {
    pub path: &'static str,
    pub desc: &'static str,
}

#[derive(Serialize)]
pub struct MetaResponse {
    pub app: &'static str,
    pub version: &'static str,
    pub server_time: Timestamp,
    pub has_weather_key: bool,
    pub cache_entries: usize,
    pub docs: Vec<DocLink>,
}

/// Plain `message` or `error` body, with optional pointers for the caller.
#[derive(Default, Serialize)]
pub struct MessageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl MessageResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_example(mut self, example: &'static str) -> Self {
        self.example = Some(example);
        self
    }

    pub fn with_hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }
}
