use std::path::PathBuf;

use manifex_core_types::RunId;

/// Result type alias using MxError
pub type Result<T> = std::result::Result<T, MxError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in the Manifex system. Each kind maps to a stable error code that can be
/// used for programmatic error handling, testing, and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MxErrorKind {
    // Structural/Validation
    /// Transform input has the wrong shape (e.g. non-object manifest data)
    InvalidInput,
    /// Manifest file content is not valid JSON, or its root is not an object
    InvalidManifest,
    NotFound,

    // Integration/IO
    Io,
    Serialization,
    /// A collaborator process (git, tar) failed or could not be spawned
    ExternalService,

    // Internal
    Internal,
}

impl MxErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            MxErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            MxErrorKind::InvalidManifest => "ERR_INVALID_MANIFEST",
            MxErrorKind::NotFound => "ERR_NOT_FOUND",
            MxErrorKind::Io => "ERR_IO",
            MxErrorKind::Serialization => "ERR_SERIALIZATION",
            MxErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            MxErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for
/// debugging.
#[derive(Debug, Clone)]
pub struct MxError {
    kind: MxErrorKind,
    op: Option<String>,
    dir: Option<PathBuf>,
    path: Option<PathBuf>,
    key: Option<String>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<MxError>>,
}

impl MxError {
    /// Create a new error with the specified kind
    pub fn new(kind: MxErrorKind) -> Self {
        Self {
            kind,
            op: None,
            dir: None,
            path: None,
            key: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add package directory context
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add manifest key context
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add run ID context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: MxError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> MxErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the package directory context, if any
    pub fn dir(&self) -> Option<&std::path::Path> {
        self.dir.as_deref()
    }

    /// Get the file path context, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        self.path.as_deref()
    }

    /// Get the manifest key context, if any
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Get the run ID context, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&MxError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for MxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(dir) = &self.dir {
            write!(f, " (dir: {})", dir.display())?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for MxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========
