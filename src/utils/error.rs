use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Endpoint unreachable: {message}")]
    ConnectivityError { message: String },

    #[error("Response is not valid JSON: {message}")]
    DecodeError { message: String },

    #[error("Unexpected payload type: {message}")]
    TypeMismatchError { message: String },

    #[error("Response has no `{field}` key")]
    MissingFieldError { field: String },

    #[error("Homework record has no `{field}` key")]
    IncompleteRecordError { field: String },

    #[error("Unknown homework status: {status}")]
    UnknownStatusError { status: String },

    #[error("Message delivery failed: {message}")]
    DeliveryError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Payload,
    Delivery,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl NotifierError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            NotifierError::ConnectivityError { .. } => ErrorCategory::Network,
            NotifierError::DecodeError { .. }
            | NotifierError::TypeMismatchError { .. }
            | NotifierError::MissingFieldError { .. }
            | NotifierError::IncompleteRecordError { .. }
            | NotifierError::UnknownStatusError { .. } => ErrorCategory::Payload,
            NotifierError::DeliveryError { .. } => ErrorCategory::Delivery,
            NotifierError::MissingConfigError { .. }
            | NotifierError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Network hiccups are expected to heal by the next tick; a broken payload
    /// or a dead messaging channel usually needs a human.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Payload | ErrorCategory::Delivery => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, NotifierError>;
