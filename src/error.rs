// src/error.rs

//! Error types for the CarbonTrack engine

use thiserror::Error;

/// Errors produced by the calculator, factor table and record store
#[derive(Error, Debug)]
pub enum Error {
    /// Category is not present in the factor table
    #[error("Unknown category '{category}'. Available: {}", available.join(", "))]
    UnknownCategory {
        category: String,
        available: Vec<String>,
    },

    /// Category is known but the activity is not
    #[error("Unknown activity '{activity}' for {category}. Available: {}", available.join(", "))]
    UnknownActivity {
        category: String,
        activity: String,
        available: Vec<String>,
    },

    /// Factor table file is malformed or inconsistent
    #[error("Invalid factor table: {0}")]
    InvalidFactorTable(String),

    /// Stored timestamp could not be parsed
    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    /// Database initialization failed
    #[error("Initialization error: {0}")]
    InitError(String),

    /// SQLite error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors caused by caller input rather than infrastructure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownCategory { .. } | Error::UnknownActivity { .. }
        )
    }

    /// Valid names the caller can choose from, if this is a lookup error
    pub fn remediation(&self) -> Option<&[String]> {
        match self {
            Error::UnknownCategory { available, .. } | Error::UnknownActivity { available, .. } => {
                Some(available)
            }
            _ => None,
        }
    }
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_message_lists_options() {
        let err = Error::UnknownCategory {
            category: "spaceflight".to_string(),
            available: vec!["transport".to_string(), "food".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown category 'spaceflight'. Available: transport, food"
        );
        assert!(err.is_client_error());
        assert_eq!(err.remediation().unwrap().len(), 2);
    }

    #[test]
    fn test_storage_errors_are_not_client_errors() {
        let err = Error::InitError("no parent".to_string());
        assert!(!err.is_client_error());
        assert!(err.remediation().is_none());
    }
}
