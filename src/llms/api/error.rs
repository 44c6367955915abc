use serde::Deserialize;

/// A failed round trip to the completion endpoint. The driver treats every
/// variant the same way: the batch fails and the run aborts.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response, or the body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx response carrying an OpenAI-style `{"error": {..}}` body.
    #[error("api error ({status}): {error}")]
    Api { status: u16, error: ApiError },
    /// Non-2xx response with any other body.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to encode request: {0}")]
    EncodeRequest(serde_json::Error),
    /// A 2xx body that is not the expected JSON shape.
    #[error("failed to decode response: {source}")]
    DecodeResponse {
        source: serde_json::Error,
        body: String,
    },
}

impl ClientError {
    /// Classifies a non-2xx response by whether its body holds an error object.
    pub(crate) fn from_failed_response(status: u16, body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct Envelope {
            error: ApiError,
        }

        match serde_json::from_slice::<Envelope>(body) {
            Ok(envelope) => ClientError::Api {
                status,
                error: envelope.error,
            },
            Err(_) => ClientError::Status {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }

    pub(crate) fn decode(source: serde_json::Error, body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body).into_owned();
        crate::error!("Could not decode response body: {}", body);
        ClientError::DecodeResponse { source, body }
    }

    /// The HTTP status, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } | ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiError {
    pub message: String,
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.r#type {
            Some(kind) => write!(f, "{}: {}", kind, self.message),
            None => f.write_str(&self.message),
        }
    }
}
