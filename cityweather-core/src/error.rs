use thiserror::Error;

/// The request never produced a usable HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not reach weather provider: {0}")]
    Unreachable(String),

    #[error("weather provider responded with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// A response arrived but did not have the expected shape.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed weather payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("weather payload contained no condition entries")]
    MissingCondition,
}

/// Outcome of a failed lookup.
#[derive(Debug, Error)]
pub enum LookupFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl LookupFailure {
    pub fn is_transport(&self) -> bool {
        matches!(self, LookupFailure::Transport(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, LookupFailure::Parse(_))
    }

    /// Short tag for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupFailure::Transport(_) => "transport",
            LookupFailure::Parse(_) => "parse",
        }
    }
}
