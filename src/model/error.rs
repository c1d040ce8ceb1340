//! Error types for honkview.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error for startup and terminal failures
//!   - `ConfigError` - Config file could not be read or parsed
//!   - `LoggingError` - Tracing subscriber could not be installed
//!   - [`TransportError`] - Only when the HTTP client itself cannot be built
//!   - `std::io::Error` - Terminal/TUI rendering failures
//! - [`TransportError`] - A single fetch or submission failed
//!
//! # Error Recovery Strategy
//!
//! Transport errors are **non-fatal**: the navigation controller or refresh
//! scheduler that issued the request recovers locally, reports a short status
//! string, and returns the engine to a stable idle state. Nothing is retried
//! automatically; retry is always a user-initiated repeat action.
//!
//! A response that arrives for a view the user already left is not an error
//! at all. It is dropped silently and never reported.

use thiserror::Error;

/// Top-level application error encompassing fatal failure modes.
///
/// Returned from `main`. Everything that can go wrong while the engine is
/// running is a [`TransportError`] and is handled inside the engine instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    ///
    /// A config file that exists but cannot be read or parsed aborts startup.
    /// A missing config file is not an error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The HTTP client could not be constructed (bad server URL, TLS setup).
    #[error("Transport setup error: {0}")]
    Transport(#[from] TransportError),

    /// Terminal or TUI rendering error.
    ///
    /// Failures in the crossterm/ratatui layer, such as broken pipes or raw-mode
    /// errors. Without a working terminal the client cannot function.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failure of one network operation (fetch-view or submit-action).
///
/// # Recovery
///
/// All variants are recovered at the call site and surfaced as a short
/// human-readable status string, see [`TransportError::status_text`]:
///
/// - **Timeout**: the request exceeded its client-side bound
///   (15 s for reads, 30 s for writes).
/// - **Http**: the server answered with a non-2xx status.
/// - **MalformedPayload**: the body was not JSON or lacked a required field.
///   Treated like an HTTP failure; it must never crash the engine.
/// - **Network**: the request never produced a response (connection
///   refused, DNS failure). Treated like an HTTP failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request exceeded its client-side time bound.
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx response.
    ///
    /// # Examples
    ///
    /// ```
    /// use honkview::model::error::TransportError;
    ///
    /// let err = TransportError::Http { status: 502 };
    /// assert!(err.to_string().contains("502"));
    /// assert_eq!(err.status_text(), " status: 502");
    /// ```
    #[error("HTTP error: status {status}")]
    Http {
        /// The HTTP status code the server returned.
        status: u16,
    },

    /// Response body missing required fields or not valid JSON.
    #[error("Malformed payload: {reason}")]
    MalformedPayload {
        /// Parser error description.
        reason: String,
    },

    /// The request failed before a response arrived.
    #[error("Network error: {reason}")]
    Network {
        /// Underlying client error description.
        reason: String,
    },
}

impl TransportError {
    /// Short status-line text for this failure.
    ///
    /// The leading space matches how the status line is composed after the
    /// refresh trigger.
    pub fn status_text(&self) -> String {
        match self {
            TransportError::Timeout => " timed out".to_string(),
            TransportError::Http { status } => format!(" status: {}", status),
            TransportError::MalformedPayload { .. } => " bad response".to_string(),
            TransportError::Network { .. } => " network error".to_string(),
        }
    }
}
