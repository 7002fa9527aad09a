use std::fmt;

use thiserror::Error;

use crate::constants::{DEFAULT_ERROR_MSG, SELECT_TYPE_MSG};
use crate::data_types::FormField;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Required")]
    Required,
    #[error("String must contain at least {min} character(s)")]
    TooShort { min: usize },
    #[error("String must contain at most {max} character(s)")]
    TooLong { max: usize },
    #[error("Expected number, received \"{0}\"")]
    NotANumber(String),
    #[error("Expected integer, received float")]
    NotAnInteger,
    #[error("Number must be greater than or equal to {min}")]
    BelowMinimum { min: f64 },
    #[error("Number must be less than or equal to {max}")]
    AboveMaximum { max: f64 },
    #[error("{}", SELECT_TYPE_MSG)]
    MissingDiscriminator,
    #[error("Invalid discriminator value '{0}'. Expected 'soup' | 'pizza' | 'sandwich'")]
    UnknownDiscriminator(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: FormField,
    pub error: ValidationError,
}

/// Every violation found in one validation pass, in form order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: FormField, error: ValidationError) {
        self.0.push(FieldError { field, error });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn for_field(&self, field: FormField) -> Vec<&ValidationError> {
        self.0
            .iter()
            .filter(|e| e.field == field)
            .map(|e| &e.error)
            .collect()
    }

    pub fn contains(&self, field: FormField, error: &ValidationError) -> bool {
        self.0.iter().any(|e| e.field == field && &e.error == error)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field.form_key(), e.error))
            .collect();
        write!(f, "{}", msgs.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Error: while adding dish (HTTP {status}){}", server_message_suffix(.message))]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("Error: dish backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Error: invalid dish JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("{0}")]
    Unexpected(String),
}

fn server_message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {m}"),
        None => String::new(),
    }
}

impl SubmissionError {
    /// Text shown in the error notification; never empty.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            DEFAULT_ERROR_MSG.to_string()
        } else {
            msg
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid dish endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}
