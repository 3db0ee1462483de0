//! Domain error types.

/// Top-level error type for mockstreet.
#[derive(Debug, thiserror::Error)]
pub enum MockstreetError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("insufficient funds: need {required:.2}, have {available:.2}")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("unknown symbol: {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MockstreetError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        MockstreetError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl MockstreetError {
    /// Process exit status for this error category.
    pub fn exit_code(&self) -> u8 {
        match self {
            MockstreetError::Io(_) => 1,
            MockstreetError::ConfigParse { .. }
            | MockstreetError::ConfigMissing { .. }
            | MockstreetError::ConfigInvalid { .. } => 2,
            MockstreetError::Data { .. } => 3,
            MockstreetError::InvalidArgument { .. } | MockstreetError::UnknownSymbol { .. } => 4,
            MockstreetError::InsufficientFunds { .. } => 5,
        }
    }
}

impl From<&MockstreetError> for std::process::ExitCode {
    fn from(err: &MockstreetError) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}
