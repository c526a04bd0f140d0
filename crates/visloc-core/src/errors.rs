use thiserror::Error;
use visloc_core_types::{RequestId, TraceId};

/// Result type alias using the canonical ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers and tests can match on
/// without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input/Configuration
    InvalidInput,
    InvalidConfig,

    // Stored data
    /// A stored value is present but could not be decoded (or a value could not be encoded)
    Serialization,
    /// A key holds a different data type than the operation expects
    WrongType,

    // Transport
    Connection,
    Timeout,
    /// The store answered with an error response
    ExternalService,
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::WrongType => "ERR_WRONG_TYPE",
            ExErrorKind::Connection => "ERR_CONNECTION",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for failures of the transport rather than of the data
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ExErrorKind::Connection
                | ExErrorKind::Timeout
                | ExErrorKind::ExternalService
                | ExErrorKind::Io
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context
/// (operation, store key, correlation ids) needed to debug a failed request.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    key: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            key: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the store key the operation addressed
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain failures raised by the visloc core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisionError {
    /// The location key holds text that is not a valid location object
    #[error("Malformed location under key {key}: {reason}")]
    MalformedLocation { key: String, reason: String },

    /// A value could not be encoded to the text form another process reads back
    #[error("Failed to encode {what}: {reason}")]
    Encode { what: &'static str, reason: String },

    /// A well-known key name was rejected
    #[error("Invalid key name: {reason}")]
    InvalidKey { reason: String },

    /// The key exists but holds a different data type
    #[error("Key {key} does not hold a {expected}")]
    WrongType { key: String, expected: &'static str },

    /// The in-memory store lock was poisoned by a panicking holder
    #[error("In-memory store lock poisoned")]
    StorePoisoned,
}

impl From<VisionError> for ExError {
    fn from(err: VisionError) -> Self {
        let message = err.to_string();
        match err {
            VisionError::MalformedLocation { key, .. } => {
                ExError::new(ExErrorKind::Serialization)
                    .with_key(key)
                    .with_message(message)
            }
            VisionError::Encode { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
            VisionError::InvalidKey { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            VisionError::WrongType { key, .. } => ExError::new(ExErrorKind::WrongType)
                .with_key(key)
                .with_message(message),
            VisionError::StorePoisoned => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}
