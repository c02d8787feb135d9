use thiserror::Error;
use vh_core::ports::HandyServiceError;

#[derive(Debug, Error)]
pub enum SoapError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} {reason}\n{body}")]
    Http {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("{message}")]
    Fault { message: String, raw: String },

    #[error("malformed XML {0}")]
    Xml(String),

    #[error("Result tag not found: {0}")]
    MissingResult(String),

    #[error("{0}")]
    Value(String),
}

impl From<SoapError> for HandyServiceError {
    fn from(err: SoapError) -> Self {
        match err {
            SoapError::Transport(e) => HandyServiceError::Transport(e.to_string()),
            SoapError::Http {
                status,
                reason,
                body,
            } => HandyServiceError::Http {
                status,
                reason,
                body,
            },
            SoapError::Fault { message, raw } => HandyServiceError::Fault { message, raw },
            other @ (SoapError::Xml(_) | SoapError::MissingResult(_) | SoapError::Value(_)) => {
                HandyServiceError::Parse(other.to_string())
            }
        }
    }
}
