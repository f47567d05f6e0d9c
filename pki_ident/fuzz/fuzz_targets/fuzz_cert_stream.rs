// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![no_main]

use libfuzzer_sys::fuzz_target;

use pki_ident::stream::{CertificateSource, ParserOptions};

fuzz_target!(|data: &[u8]| {
    // Small limit keeps oversized length fields cheap
    let options = ParserOptions::new().with_read_limit(64 * 1024);
    let mut source = CertificateSource::with_options(data, options);
    if let Ok(certs) = source.read_all() {
        for cert in certs {
            let _ = cert.to_der();
        }
    }

    let mut source = CertificateSource::from_buf_read(data);
    while let Some(result) = source.next() {
        if result.is_err() {
            assert!(source.next().is_none());
            break;
        }
    }
});
