// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Line-oriented PEM block scanner.
//!
//! Unlike `pem_rfc7468`, which wants one complete document, the scanner
//! reads a stream one line at a time: text before the BEGIN line is
//! skipped, RFC 1421 header lines are ignored and the block may be wrapped
//! at any width. The collected payload is then re-wrapped and handed to
//! `pem_rfc7468` for base64 decoding.

use std::io::{BufRead, Read};

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::ParserOptions;
use crate::error::{EncodingError, Error, Result};

const BASE64_WRAP: usize = 64;
const END_PREFIX: &[u8] = b"-----END ";

/// Read one line of at most `limit` bytes. Returns `false` at end of input.
fn read_line<R: BufRead>(reader: &mut R, line: &mut Vec<u8>, limit: usize) -> Result<bool> {
    line.clear();
    let read = reader
        .by_ref()
        .take(limit as u64 + 1)
        .read_until(b'\n', line)?;
    if read > limit {
        return Err(Error::too_large(limit, read));
    }
    Ok(read > 0)
}

fn trim(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &line[start..end]
}

fn is_begin_line(line: &[u8], options: &ParserOptions) -> bool {
    let plain = alloc::format!("-----BEGIN {}-----", options.pem_label);
    let legacy = alloc::format!("-----BEGIN X509 {}-----", options.pem_label);
    line == plain.as_bytes() || (options.accept_x509_label && line == legacy.as_bytes())
}

/// Scan for the next block and return its decoded payload.
///
/// `Ok(None)` when the input ends before a BEGIN line.
pub(crate) fn read_block<R: BufRead>(
    reader: &mut R,
    options: &ParserOptions,
) -> Result<Option<Vec<u8>>> {
    let mut line = Vec::new();

    loop {
        if !read_line(reader, &mut line, options.read_limit)? {
            log::trace!("no PEM block before end of input");
            return Ok(None);
        }
        if is_begin_line(trim(&line), options) {
            break;
        }
    }

    let mut payload = String::new();
    loop {
        if !read_line(reader, &mut line, options.read_limit)? {
            return Err(Error::EncodingError(EncodingError::MissingPemFooter(
                options.pem_label.clone(),
            )));
        }

        let text = trim(&line);
        if text.starts_with(END_PREFIX) {
            break;
        }
        if text.is_empty() || text.contains(&b':') {
            continue;
        }

        let text = core::str::from_utf8(text)
            .map_err(|e| Error::EncodingError(EncodingError::InvalidPem(e.to_string())))?;
        payload.extend(text.chars().filter(|c| !c.is_ascii_whitespace()));

        let decoded_len = payload.len() / 4 * 3;
        if decoded_len > options.read_limit {
            return Err(Error::too_large(options.read_limit, decoded_len));
        }
    }

    let (_, der) = pem_rfc7468::decode_vec(rewrap(&options.pem_label, &payload).as_bytes())?;
    log::trace!("decoded PEM '{}' block of {} bytes", options.pem_label, der.len());
    Ok(Some(der))
}

fn rewrap(label: &str, payload: &str) -> String {
    let mut pem = alloc::format!("-----BEGIN {}-----\n", label);
    for chunk in payload.as_bytes().chunks(BASE64_WRAP) {
        // payload is ASCII: non-ASCII characters fail base64 decoding anyway
        pem.push_str(&String::from_utf8_lossy(chunk));
        pem.push('\n');
    }
    pem.push_str(&alloc::format!("-----END {}-----\n", label));
    pem
}
