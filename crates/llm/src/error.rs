//! Error Taxonomy
//!
//! Errors surfaced by the gateway, OpenAI, and tool-endpoint clients,
//! together with the canned user-facing messages the display shows for
//! each class. Every error terminates in a display string; none is fatal.

use thiserror::Error;

/// Errors produced by the outbound HTTP clients.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Non-2xx HTTP status, with the response body text as detail
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A connection could not be established (refused, DNS, unreachable)
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request failed after connecting (reset, aborted body)
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// The upstream answered 2xx but the payload carried an error field
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The upstream answered 2xx with an empty payload
    #[error("empty response")]
    Empty,
}

/// Result type alias for client errors
pub type LlmResult<T> = Result<T, LlmError>;

impl LlmError {
    /// Classify a reqwest failure into the connect/transport split the
    /// display distinguishes.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }

    /// The canned user-facing message for this error.
    ///
    /// HTTP errors map by status code; transport failures map to one of
    /// the connection-themed strings; everything else falls to a generic
    /// templated message carrying the detail.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { status, .. } => status_message(*status),
            Self::Connect(_) => {
                "API 서버에 연결할 수 없습니다. 서버가 실행 중인지 확인해주세요.".to_string()
            }
            Self::Transport(_) => "API 서버 연결에 실패했습니다.".to_string(),
            Self::Empty => "응답을 받았지만 내용이 비어있습니다. 다시 시도해주세요.".to_string(),
            Self::Parse(detail) | Self::Upstream(detail) => {
                format!("에러가 발생했습니다: {}", detail)
            }
        }
    }
}

/// Map an HTTP status to its canned user-facing message.
pub fn status_message(status: u16) -> String {
    match status {
        400 => "잘못된 요청입니다. 입력 내용을 확인해주세요.",
        401 => "API 키가 유효하지 않습니다. API 키를 확인해주세요.",
        403 => "API 사용 권한이 없습니다. API 키 권한을 확인해주세요.",
        429 => "요청 한도를 초과했습니다. 잠시 후 다시 시도해주세요.",
        500 => "서버 오류가 발생했습니다. 잠시 후 다시 시도해주세요.",
        502 => "게이트웨이 오류가 발생했습니다. 잠시 후 다시 시도해주세요.",
        503 => "서비스를 일시적으로 사용할 수 없습니다. 잠시 후 다시 시도해주세요.",
        504 => "게이트웨이 응답이 지연되고 있습니다. 잠시 후 다시 시도해주세요.",
        _ => return format!("HTTP 오류 ({})", status),
    }
    .to_string()
}

/// Status mapping with the interface-backend wording used by the API
/// test screen.
pub fn api_status_message(status: u16) -> String {
    match status {
        400 => "잘못된 API 요청입니다. 파라미터를 확인해주세요.",
        404 => "API 엔드포인트를 찾을 수 없습니다. 서버 설정을 확인해주세요.",
        500 => "API 서버 내부 오류가 발생했습니다.",
        _ => return format!("API 서버 오류 (HTTP {})", status),
    }
    .to_string()
}
