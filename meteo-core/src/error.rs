use thiserror::Error;

/// Failure of a single request against the Open-Meteo APIs.
///
/// Every variant renders as "request failed: ..." so callers can treat
/// them uniformly and still match on the detail when they care.
#[derive(Debug, Error)]
pub enum OpenMeteoError {
    /// Connection, DNS, timeout or body-read failure
    #[error("request failed: {0}")]
    Transport(String),

    /// Upstream answered with a non-2xx status
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Body is not JSON of the expected shape
    #[error("request failed: could not decode response: {0}")]
    Decode(String),
}

impl OpenMeteoError {
    /// HTTP status, when the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_reads_as_request_failed() {
        let errors = [
            OpenMeteoError::Transport("connection refused".into()),
            OpenMeteoError::Status { status: 500, body: "oops".into() },
            OpenMeteoError::Decode("expected value".into()),
        ];

        for err in errors {
            assert!(err.to_string().starts_with("request failed"), "{err}");
        }
    }

    #[test]
    fn status_is_exposed_only_for_http_errors() {
        let err = OpenMeteoError::Status { status: 404, body: String::new() };
        assert_eq!(err.status(), Some(404));
        assert_eq!(OpenMeteoError::Transport("x".into()).status(), None);
    }
}
