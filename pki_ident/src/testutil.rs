// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate builders shared by the unit tests.

use core::time::Duration;

use const_oid::ObjectIdentifier;
use der::asn1::BitString;
use num_bigint::BigInt;
use spki::AlgorithmIdentifier;

use crate::certificate::validity::Validity;
use crate::certificate::{Certificate, SubjectPublicKeyInfo, TBSCertificate};

const ECDSA_WITH_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");
const EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

pub(crate) fn certificate(subject: &str, issuer: &str, serial: i64) -> Certificate {
    certificate_with_serial(subject, issuer, &BigInt::from(serial))
}

pub(crate) fn certificate_with_serial(subject: &str, issuer: &str, serial: &BigInt) -> Certificate {
    let algorithm = AlgorithmIdentifier {
        oid: ECDSA_WITH_SHA256,
        parameters: None,
    };
    let spki = SubjectPublicKeyInfo {
        algorithm: AlgorithmIdentifier {
            oid: EC_PUBLIC_KEY,
            parameters: None,
        },
        subject_public_key: BitString::from_bytes(&[0x04, 0x01, 0x02, 0x03]).unwrap(),
    };
    let validity = Validity::from_unix_range(
        Duration::from_secs(1_577_836_800),
        Duration::from_secs(1_893_456_000),
    )
    .unwrap();

    let tbs = TBSCertificate::new(
        serial,
        algorithm.clone(),
        issuer.parse().unwrap(),
        validity,
        subject.parse().unwrap(),
        spki,
    );
    Certificate::new(tbs, algorithm, BitString::from_bytes(&[0u8; 8]).unwrap())
}
