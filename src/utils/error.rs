use thiserror::Error;

/// A single field failing one of the construction-time rules.
///
/// Every variant names the offending field (e.g. `channel.name`,
/// `zone.channels`) so callers can point at the bad input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: String },

    #[error("{field} must be at most {max} characters, got {len}")]
    TooLong { field: String, max: usize, len: usize },

    #[error("{field} must not be the reserved value \"None\"")]
    ReservedName { field: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("{field} must be a multiple of {step}, got {value}")]
    NotMultiple {
        field: String,
        value: String,
        step: String,
    },

    #[error("{field} holds {len} entries, at most {max} allowed")]
    TooMany { field: String, max: usize, len: usize },
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Empty { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::ReservedName { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::NotMultiple { field, .. }
            | ValidationError::TooMany { field, .. } => field,
        }
    }
}

#[derive(Error, Debug)]
pub enum CodeplugError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An entity reached the projection without satisfying its own rules.
    #[error("Precondition violated while projecting {entity}: {source}")]
    Precondition {
        entity: String,
        #[source]
        source: ValidationError,
    },

    #[error("Unresolved {kind} reference \"{name}\" in {referrer}")]
    UnresolvedReference {
        kind: &'static str,
        name: String,
        referrer: String,
    },

    #[error("Codeplug definition error: {message}")]
    Definition { message: String },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad codeplug data; fixable by editing the definition.
    UserData,
    /// A bug upstream of the projection.
    Programming,
    /// Disk or encoding trouble outside the codeplug itself.
    Environment,
}

impl CodeplugError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CodeplugError::Validation(_)
            | CodeplugError::UnresolvedReference { .. }
            | CodeplugError::Definition { .. } => ErrorCategory::UserData,
            CodeplugError::Precondition { .. } => ErrorCategory::Programming,
            CodeplugError::Csv(_) | CodeplugError::Json(_) | CodeplugError::Io(_) => {
                ErrorCategory::Environment
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::UserData => 1,
            ErrorCategory::Environment => 2,
            ErrorCategory::Programming => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodeplugError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let e = ValidationError::NotMultiple {
            field: "channel.squelch".to_string(),
            value: "0.07".to_string(),
            step: "0.05".to_string(),
        };
        assert_eq!(e.to_string(), "channel.squelch must be a multiple of 0.05, got 0.07");
        assert_eq!(e.field(), "channel.squelch");
    }

    #[test]
    fn test_error_categories() {
        let validation: CodeplugError = ValidationError::Empty {
            field: "zone.name".to_string(),
        }
        .into();
        assert_eq!(validation.category(), ErrorCategory::UserData);
        assert_eq!(validation.exit_code(), 1);

        let precondition = CodeplugError::Precondition {
            entity: "channel".to_string(),
            source: ValidationError::ReservedName {
                field: "channel.name".to_string(),
            },
        };
        assert_eq!(precondition.category(), ErrorCategory::Programming);

        let io: CodeplugError = std::io::Error::other("disk full").into();
        assert_eq!(io.category(), ErrorCategory::Environment);
    }
}
