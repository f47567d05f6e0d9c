// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Error types for certificate stream decoding and issuer resolution
//!
//! This module defines the error types returned while framing and decoding
//! certificates, signed-data envelopes and attribute-certificate issuers,
//! compatible with both `std` and `no_std` environments.

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;

/// Result type alias for decoding operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for certificate decoding and issuer handling
///
/// Every variant returned by a certificate source is a decode error: the
/// bytes could not be framed or interpreted as a certificate.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Errors framing objects in the byte stream
    ParseError(ParseError),

    /// Errors decoding or encoding ASN.1 structures (from der crate)
    Asn1(der::Error),

    /// Errors in the PEM text framing
    EncodingError(EncodingError),

    /// Distinguished name errors
    NameError(NameError),

    /// I/O failure of the underlying byte stream
    #[cfg(feature = "std")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },
}

/// Errors that occur while framing DER objects
#[derive(Debug, Clone)]
pub enum ParseError {
    /// Unexpected end of input
    UnexpectedEof,

    /// Invalid length encoding
    InvalidLength(String),

    /// BER indefinite length, not accepted in DER
    IndefiniteLength,

    /// Object larger than the configured read limit
    ObjectTooLarge { limit: usize, length: usize },

    /// Malformed signed-data envelope
    MalformedEnvelope(String),

    /// The source failed earlier and can no longer be read
    SourceFailed,
}

/// Errors in PEM framing
#[derive(Debug, Clone)]
pub enum EncodingError {
    /// Invalid PEM format or base64 payload
    InvalidPem(String),

    /// PEM label mismatch
    InvalidPemLabel { expected: String, found: String },

    /// BEGIN line without a matching END line
    MissingPemFooter(String),
}

/// Errors related to distinguished names
#[derive(Debug, Clone)]
pub enum NameError {
    /// Invalid name encoding or text form
    InvalidEncoding(String),

    /// Attribute short name with no known OID
    UnknownAttributeType(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParseError(e) => write!(f, "Parse error: {}", e),
            Error::Asn1(e) => write!(f, "ASN.1 error: {}", e),
            Error::EncodingError(e) => write!(f, "Encoding error: {}", e),
            Error::NameError(e) => write!(f, "Name error: {}", e),
            #[cfg(feature = "std")]
            Error::Io { kind, message } => write!(f, "I/O error ({:?}): {}", kind, message),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedEof => write!(f, "Unexpected end of input"),
            ParseError::InvalidLength(msg) => write!(f, "Invalid length: {}", msg),
            ParseError::IndefiniteLength => write!(f, "Indefinite length encoding not supported"),
            ParseError::ObjectTooLarge { limit, length } => {
                write!(f, "Object of {} bytes exceeds read limit of {}", length, limit)
            }
            ParseError::MalformedEnvelope(msg) => write!(f, "Malformed signed-data: {}", msg),
            ParseError::SourceFailed => {
                write!(f, "Certificate source unusable after an earlier decode error")
            }
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidPem(msg) => write!(f, "Invalid PEM: {}", msg),
            EncodingError::InvalidPemLabel { expected, found } => {
                write!(
                    f,
                    "Invalid PEM label: expected '{}', found '{}'",
                    expected, found
                )
            }
            EncodingError::MissingPemFooter(label) => {
                write!(f, "PEM block '{}' has no END line", label)
            }
        }
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::InvalidEncoding(msg) => write!(f, "Invalid name encoding: {}", msg),
            NameError::UnknownAttributeType(typ) => write!(f, "Unknown attribute type: {}", typ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

// ============================================================================
// Conversions from external crate errors
// ============================================================================

/// Convert from der crate errors
impl From<der::Error> for Error {
    fn from(err: der::Error) -> Self {
        Error::Asn1(err)
    }
}

/// Convert from PEM decoding errors
impl From<pem_rfc7468::Error> for Error {
    fn from(err: pem_rfc7468::Error) -> Self {
        Error::EncodingError(EncodingError::InvalidPem(err.to_string()))
    }
}

/// Convert from I/O errors; a short read is a truncated object
#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::ParseError(ParseError::UnexpectedEof),
            kind => Error::Io {
                kind,
                message: err.to_string(),
            },
        }
    }
}

impl Error {
    /// Create a malformed signed-data error
    pub fn malformed_envelope<S: Into<String>>(msg: S) -> Self {
        Error::ParseError(ParseError::MalformedEnvelope(msg.into()))
    }

    /// Create a read-limit error
    pub fn too_large(limit: usize, length: usize) -> Self {
        Error::ParseError(ParseError::ObjectTooLarge { limit, length })
    }

    /// Create an invalid name error
    pub fn invalid_name<S: Into<String>>(msg: S) -> Self {
        Error::NameError(NameError::InvalidEncoding(msg.into()))
    }

    /// Whether this error marks a source that failed on an earlier call
    pub fn is_source_failed(&self) -> bool {
        matches!(self, Error::ParseError(ParseError::SourceFailed))
    }
}
