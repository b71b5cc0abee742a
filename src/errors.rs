use std::fmt;

/// Application-specific error types.
#[derive(Debug)]
pub enum LeadError {
    /// Phone does not match the accepted format.
    InvalidPhone(String),
    /// Email was supplied but is malformed.
    InvalidEmail(String),
    /// Explicit consent was absent or false.
    ConsentRequired,
    /// Lookup or interaction-log target does not exist.
    NotFound(String),
    /// Database-related errors.
    DatabaseError(sqlx::Error),
    /// Metadata could not be serialized or deserialized.
    Serialization(serde_json::Error),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<LeadError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for LeadError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadError::InvalidPhone(phone) => write!(f, "Invalid phone: {}", phone),
            LeadError::InvalidEmail(email) => write!(f, "Invalid email: {}", email),
            LeadError::ConsentRequired => write!(f, "Consent required"),
            LeadError::NotFound(msg) => write!(f, "Not found: {}", msg),
            LeadError::DatabaseError(e) => write!(f, "Database error: {}", e),
            LeadError::Serialization(e) => write!(f, "Metadata serialization error: {}", e),
            LeadError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for LeadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeadError::DatabaseError(e) => Some(e),
            LeadError::Serialization(e) => Some(e),
            LeadError::WithContext { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for LeadError {
    /// Converts a `sqlx::Error` into a `LeadError`.
    fn from(err: sqlx::Error) -> Self {
        LeadError::DatabaseError(err)
    }
}

impl From<serde_json::Error> for LeadError {
    /// Converts a `serde_json::Error` into a `LeadError`.
    fn from(err: serde_json::Error) -> Self {
        LeadError::Serialization(err)
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `LeadError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// # Arguments
    ///
    /// * `context` - The context message to add.
    fn context(self, context: impl Into<String>) -> Result<T, LeadError>;

    /// Add context lazily (only evaluated on error).
    ///
    /// # Arguments
    ///
    /// * `f` - A closure that produces the context message.
    #[allow(dead_code)]
    fn with_context<F>(self, f: F) -> Result<T, LeadError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, LeadError> {
    fn context(self, context: impl Into<String>) -> Result<T, LeadError> {
        self.map_err(|e| LeadError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, LeadError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| LeadError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

/// Extension for sqlx::Error to add context
impl<T> ResultExt<T> for Result<T, sqlx::Error> {
    fn context(self, context: impl Into<String>) -> Result<T, LeadError> {
        self.map_err(|e| LeadError::WithContext {
            source: Box::new(LeadError::DatabaseError(e)),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, LeadError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| LeadError::WithContext {
            source: Box::new(LeadError::DatabaseError(e)),
            context: f(),
        })
    }
}
