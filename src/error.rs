//! # Error Types
//!
//! This module defines error types used throughout the pixelbake library.
//!
//! Blit operations never fail: every placement, including fully off-screen
//! ones, is a valid no-op. Errors only come from the offline side of the
//! pipeline (decoding, configuration, file output).

use thiserror::Error;

/// Main error type for pixelbake operations
#[derive(Debug, Error)]
pub enum PixelbakeError {
    /// Source image missing, undecodable, or zero-dimensioned
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Scale factor outside the supported range
    #[error("Invalid scale {0}: must be between 2 and 16")]
    InvalidScale(u32),

    /// Pixel table that does not match its declared dimensions
    #[error("Invalid pixel table: {0}")]
    InvalidTable(String),

    /// Malformed batch manifest
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, PixelbakeError>;
