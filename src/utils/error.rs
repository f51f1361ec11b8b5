use std::fmt;
use thiserror::Error;

/// The record field a validation rule is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    LastName,
    FirstName,
    MiddleName,
    Course,
    Group,
    BirthDate,
    Email,
    Phone,
}

impl Field {
    /// Column / property name used in both file formats.
    pub fn column_name(&self) -> &'static str {
        match self {
            Field::LastName => "LastName",
            Field::FirstName => "FirstName",
            Field::MiddleName => "MiddleName",
            Field::Course => "Course",
            Field::Group => "Group",
            Field::BirthDate => "BirthDate",
            Field::Email => "Email",
            Field::Phone => "Phone",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Csv,
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFormat::Json => f.write_str("JSON"),
            DataFormat::Csv => f.write_str("CSV"),
        }
    }
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Validation error on {field}: {reason}")]
    ValidationError { field: Field, reason: String },

    #[error("{format} parse error: {detail}")]
    ParseError { format: DataFormat, detail: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Record index {index} is out of range (roster holds {len} records)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl RosterError {
    pub fn validation(field: Field, reason: impl Into<String>) -> Self {
        RosterError::ValidationError {
            field,
            reason: reason.into(),
        }
    }

    pub fn parse(format: DataFormat, detail: impl Into<String>) -> Self {
        RosterError::ParseError {
            format,
            detail: detail.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        RosterError::ConfigError {
            message: message.into(),
        }
    }

    /// Message meant for the person at the keyboard rather than the log.
    pub fn user_friendly_message(&self) -> String {
        match self {
            RosterError::ValidationError { reason, .. } => reason.clone(),
            RosterError::ParseError { format, detail } => {
                format!("The {} file could not be read: {}", format, detail)
            }
            RosterError::IoError(e) => match e.kind() {
                std::io::ErrorKind::NotFound => "File not found".to_string(),
                std::io::ErrorKind::PermissionDenied => {
                    "Permission denied while accessing the file".to_string()
                }
                _ => format!("File operation failed: {}", e),
            },
            RosterError::CsvError(e) => format!("CSV export failed: {}", e),
            RosterError::IndexOutOfRange { index, len } => {
                format!("There is no record #{} (roster holds {})", index, len)
            }
            RosterError::ConfigError { message } => message.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
