// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![no_main]

use der::{Decode, Encode};
use libfuzzer_sys::fuzz_target;

use pki_ident::acert::AttCertIssuer;
use pki_ident::Certificate;

fuzz_target!(|data: &[u8]| {
    let (issuer_der, cert_der) = data.split_at(data.len() / 2);

    if let Ok(issuer) = AttCertIssuer::from_der(issuer_der) {
        let _ = issuer.principals();
        if let Ok(cert) = Certificate::from_der(cert_der) {
            let _ = issuer.matches(&cert);
        }
        if let Ok(der) = issuer.to_der() {
            let _ = AttCertIssuer::from_der(&der);
        }
    }
});
