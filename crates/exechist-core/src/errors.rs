use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    InvalidIdentity,
    InvalidFingerprint,
    NotFound,
    IdentityMismatch,

    // Content-addressed storage
    /// A blob referenced by the history ledger is missing from the CAS
    MissingBlob,
    /// Stored bytes disagree with their digest, or a migration checksum changed
    IntegrityViolation,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Concurrency,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidIdentity => "ERR_INVALID_IDENTITY",
            ExErrorKind::InvalidFingerprint => "ERR_INVALID_FINGERPRINT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::IdentityMismatch => "ERR_IDENTITY_MISMATCH",
            ExErrorKind::MissingBlob => "ERR_MISSING_BLOB",
            ExErrorKind::IntegrityViolation => "ERR_INTEGRITY_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context
/// (operation, work identity, filesystem path) needed for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    identity: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            identity: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Set the operation that failed
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Set the identity of the unit of work involved
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Set the filesystem path involved
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach an underlying error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
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

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
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
        if let Some(identity) = &self.identity {
            write!(f, " (identity: {})", identity)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain validation errors raised while building or checking history data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistoryError {
    /// Work identity is empty or otherwise unusable as a history key
    #[error("Invalid work identity: {reason}")]
    InvalidIdentity { reason: String },

    /// A content hash is not a lowercase hex SHA-256 digest
    #[error("Invalid content hash for {path}: {hash}")]
    InvalidContentHash { path: String, hash: String },

    /// A record loaded for one identity claims to belong to another
    #[error("History record identity mismatch: expected {expected}, found {found}")]
    IdentityMismatch { expected: String, found: String },

    /// No history record exists for the identity
    #[error("No history recorded for: {identity}")]
    HistoryNotFound { identity: String },

    /// A shared backend lock was poisoned by a panicking writer
    #[error("Lock poisoned: {resource}")]
    LockPoisoned { resource: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<HistoryError> for ExError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::InvalidIdentity { reason } => ExError::new(ExErrorKind::InvalidIdentity)
                .with_op("validate_identity")
                .with_message(format!("Invalid work identity: {}", reason)),

            HistoryError::InvalidContentHash { path, hash } => {
                ExError::new(ExErrorKind::InvalidFingerprint)
                    .with_op("validate_fingerprint")
                    .with_path(path)
                    .with_message(format!("Invalid content hash '{}'", hash))
            }

            HistoryError::IdentityMismatch { expected, found } => {
                ExError::new(ExErrorKind::IdentityMismatch)
                    .with_identity(expected)
                    .with_message(format!("Stored record belongs to '{}'", found))
            }

            HistoryError::HistoryNotFound { identity } => ExError::new(ExErrorKind::NotFound)
                .with_identity(identity)
                .with_message("No history recorded"),

            HistoryError::LockPoisoned { resource } => ExError::new(ExErrorKind::Concurrency)
                .with_message(format!("Lock poisoned: {}", resource)),

            HistoryError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to HistoryError
impl From<serde_json::Error> for HistoryError {
    fn from(err: serde_json::Error) -> Self {
        HistoryError::Serialization {
            message: err.to_string(),
        }
    }
}
