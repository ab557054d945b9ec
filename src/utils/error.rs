use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("course {id} not found")]
    CourseNotFoundError { id: i64 },

    #[error("unsupported operation {{{namespace}}}{local}")]
    UnknownOperationError { namespace: String, local: String },

    #[error("invalid request: {message}")]
    InvalidRequestError { message: String },

    #[error("malformed XML: {message}")]
    XmlError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("missing configuration field: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, ServiceError>;
