// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate stream decoding.
//!
//! A [`CertificateSource`] turns a byte stream into certificates. The stream
//! may hold binary DER or PEM text, and bare certificates or PKCS#7
//! signed-data envelopes back to back. Which path is taken is decided by
//! peeking at the first byte of each top-level object: `0x30` (SEQUENCE)
//! means DER, anything else is scanned as PEM text.
//!
//! # Failure policy
//!
//! The position in the stream after a partial decode is not recoverable,
//! so the first decode error marks the source as failed. Every later call
//! returns [`ParseError::SourceFailed`] without reading, and the
//! [`Iterator`] implementation ends after yielding the error.
//!
//! # Examples
//!
//! ```no_run
//! use pki_ident::stream::CertificateSource;
//!
//! # fn example(file: std::fs::File) -> pki_ident::Result<()> {
//! let mut source = CertificateSource::new(file);
//! for cert in source.read_all()? {
//!     println!("{}", cert.subject());
//! }
//! # Ok(())
//! # }
//! ```

mod pem;

use std::io::{BufRead, BufReader, Read};

use alloc::string::String;
use alloc::vec::Vec;
use der::Any;

use crate::certificate::Certificate;
use crate::envelope::{EnvelopeEntry, SignedData, TopLevelObject};
use crate::error::{Error, ParseError, Result};

/// Largest top-level object read by default (16 MiB).
pub const DEFAULT_READ_LIMIT: usize = 16 * 1024 * 1024;

const SEQUENCE_TAG: u8 = 0x30;

// ============================================================================
// Parser Options
// ============================================================================

/// Options for certificate stream decoding.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// PEM label accepted by the text path
    pub pem_label: String,

    /// Whether `-----BEGIN X509 <label>-----` headers are accepted too
    pub accept_x509_label: bool,

    /// Maximum content length of one top-level object, in bytes
    pub read_limit: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            pem_label: String::from(crate::certificate::PEM_LABEL),
            accept_x509_label: true,
            read_limit: DEFAULT_READ_LIMIT,
        }
    }
}

impl ParserOptions {
    /// Create a new ParserOptions with the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept PEM blocks with a different label
    pub fn with_pem_label(mut self, label: &str) -> Self {
        self.pem_label = String::from(label);
        self
    }

    /// Set the maximum size of one top-level object
    pub fn with_read_limit(mut self, limit: usize) -> Self {
        self.read_limit = limit;
        self
    }

    /// Only accept the configured label, not its `X509 ` form
    pub fn strict_pem_label(mut self) -> Self {
        self.accept_x509_label = false;
        self
    }
}

// ============================================================================
// Envelope Cursor
// ============================================================================

/// Position within the certificate set of a signed-data envelope.
#[derive(Debug, Clone)]
pub struct EnvelopeCursor {
    items: Vec<Any>,
    next_index: usize,
}

impl EnvelopeCursor {
    /// Cursor at the first element of the envelope's certificate set.
    pub fn new(signed: SignedData) -> Self {
        Self {
            items: signed
                .certificates
                .map(|set| set.into_vec())
                .unwrap_or_default(),
            next_index: 0,
        }
    }

    /// Number of set elements not yet visited.
    pub fn remaining(&self) -> usize {
        self.items.len() - self.next_index
    }

    /// Next ordinary certificate, skipping every other kind of element.
    pub fn next_certificate(&mut self) -> Option<Certificate> {
        while let Some(item) = self.items.get(self.next_index) {
            self.next_index += 1;
            match EnvelopeEntry::classify(item) {
                EnvelopeEntry::Certificate(cert) => return Some(cert),
                EnvelopeEntry::Unsupported { tag } => {
                    log::debug!(
                        "skipping certificate set entry {} with tag {}",
                        self.next_index - 1,
                        tag
                    );
                }
            }
        }
        None
    }
}

// ============================================================================
// Certificate Source
// ============================================================================

#[derive(Debug)]
enum SourceState {
    Ready,
    Envelope(EnvelopeCursor),
    Failed,
}

/// A stream of certificates read from bytes.
#[derive(Debug)]
pub struct CertificateSource<R> {
    reader: R,
    options: ParserOptions,
    state: SourceState,
}

impl<R: Read> CertificateSource<BufReader<R>> {
    /// Wrap an unbuffered reader with default options.
    pub fn new(reader: R) -> Self {
        Self::from_buf_read(BufReader::new(reader))
    }
}

impl<R: BufRead> CertificateSource<R> {
    /// Use a buffered reader directly, with default options.
    pub fn from_buf_read(reader: R) -> Self {
        Self::with_options(reader, ParserOptions::default())
    }

    /// Use a buffered reader with the given options.
    pub fn with_options(reader: R, options: ParserOptions) -> Self {
        Self {
            reader,
            options,
            state: SourceState::Ready,
        }
    }

    /// The options in effect.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Whether an earlier call failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.state, SourceState::Failed)
    }

    /// Decode the next certificate.
    ///
    /// `Ok(None)` once the stream is exhausted, and on every call after that.
    pub fn next_certificate(&mut self) -> Result<Option<Certificate>> {
        if self.is_failed() {
            return Err(Error::ParseError(ParseError::SourceFailed));
        }

        self.advance().map_err(|e| {
            log::error!("certificate stream failed: {}", e);
            self.state = SourceState::Failed;
            e
        })
    }

    /// Decode every remaining certificate.
    ///
    /// A decode error aborts the call; certificates read before it are lost.
    pub fn read_all(&mut self) -> Result<Vec<Certificate>> {
        let mut certs = Vec::new();
        while let Some(cert) = self.next_certificate()? {
            certs.push(cert);
        }
        Ok(certs)
    }

    fn advance(&mut self) -> Result<Option<Certificate>> {
        loop {
            if let SourceState::Envelope(cursor) = &mut self.state {
                if let Some(cert) = cursor.next_certificate() {
                    return Ok(Some(cert));
                }
                log::trace!("envelope exhausted");
                self.state = SourceState::Ready;
            }

            let first = match self.reader.fill_buf()?.first() {
                Some(byte) => *byte,
                None => return Ok(None),
            };

            if first != SEQUENCE_TAG {
                return match pem::read_block(&mut self.reader, &self.options)? {
                    Some(der) => Certificate::from_der(&der).map(Some),
                    None => Ok(None),
                };
            }

            let der = read_der_object(&mut self.reader, self.options.read_limit)?;
            match TopLevelObject::from_der(&der)? {
                TopLevelObject::Certificate(cert) => return Ok(Some(cert)),
                TopLevelObject::Envelope(signed) => {
                    self.state = SourceState::Envelope(EnvelopeCursor::new(signed));
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for CertificateSource<R> {
    type Item = Result<Certificate>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_failed() {
            return None;
        }
        self.next_certificate().transpose()
    }
}

/// Read one complete DER TLV whose first byte is a single-byte tag.
///
/// Supports short-form and long-form (1-4 byte) definite lengths. The
/// content length must not exceed `limit`.
fn read_der_object<R: BufRead>(reader: &mut R, limit: usize) -> Result<Vec<u8>> {
    let mut object = vec![0u8; 2];
    reader.read_exact(&mut object)?;

    let content_len = if object[1] & 0x80 == 0 {
        // Short form: length fits in 7 bits
        object[1] as usize
    } else {
        // Long form: lower 7 bits give the number of subsequent length bytes
        let num_len_bytes = (object[1] & 0x7F) as usize;
        if num_len_bytes == 0 {
            return Err(Error::ParseError(ParseError::IndefiniteLength));
        }
        if num_len_bytes > 4 {
            return Err(Error::ParseError(ParseError::InvalidLength(
                alloc::format!(
                    "Unsupported DER length encoding: {} length bytes",
                    num_len_bytes
                ),
            )));
        }

        let mut len_bytes = [0u8; 4];
        reader.read_exact(&mut len_bytes[..num_len_bytes])?;
        object.extend_from_slice(&len_bytes[..num_len_bytes]);
        len_bytes[..num_len_bytes]
            .iter()
            .fold(0usize, |len, byte| (len << 8) | *byte as usize)
    };

    if content_len > limit {
        return Err(Error::too_large(limit, content_len));
    }

    let header_len = object.len();
    let read = reader
        .by_ref()
        .take(content_len as u64)
        .read_to_end(&mut object)?;
    if read < content_len {
        log::trace!(
            "object truncated: {} of {} content bytes",
            read,
            content_len
        );
        return Err(Error::ParseError(ParseError::UnexpectedEof));
    }

    log::trace!("read DER object of {} bytes", header_len + content_len);
    Ok(object)
}
