// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use std::time::Duration;

use const_oid::ObjectIdentifier;
use der::asn1::BitString;
use der::{Any, Decode, Tag};
use num_bigint::BigInt;
use spki::AlgorithmIdentifier;

use pki_ident::acert::{AttCertIssuer, IssuerSerial, V2Form};
use pki_ident::certificate::name::{
    AttributeTypeAndValue, Name, RDNSequence, RelativeDistinguishedName,
};
use pki_ident::certificate::validity::Validity;
use pki_ident::certificate::{SubjectPublicKeyInfo, TBSCertificate};
use pki_ident::{Certificate, SignedData};

pub const ECDSA_WITH_SHA384: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3");
pub const EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// 2024-01-01T00:00:00Z
const NOT_BEFORE: u64 = 1_704_067_200;
/// 2034-01-01T00:00:00Z
const NOT_AFTER: u64 = 2_019_686_400;

#[cfg(test)]
pub fn setup_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn name(text: &str) -> Name {
    text.parse().unwrap()
}

/// A single-RDN name whose CN is a PrintableString.
pub fn printable_cn(value: &str) -> Name {
    let attr = AttributeTypeAndValue::new_printable(pki_ident::certificate::name::CN, value)
        .unwrap();
    RDNSequence::from_rdns(vec![RelativeDistinguishedName::new(attr).unwrap()])
}

/// A single-RDN name whose CN is a UTF8String.
pub fn utf8_cn(value: &str) -> Name {
    let attr =
        AttributeTypeAndValue::new_utf8(pki_ident::certificate::name::CN, value).unwrap();
    RDNSequence::from_rdns(vec![RelativeDistinguishedName::new(attr).unwrap()])
}

pub fn certificate(subject: &str, issuer: &str, serial: i64) -> Certificate {
    certificate_for(name(subject), name(issuer), &BigInt::from(serial))
}

pub fn certificate_for(subject: Name, issuer: Name, serial: &BigInt) -> Certificate {
    let algorithm = AlgorithmIdentifier {
        oid: ECDSA_WITH_SHA384,
        parameters: None,
    };
    let spki = SubjectPublicKeyInfo {
        algorithm: AlgorithmIdentifier {
            oid: EC_PUBLIC_KEY,
            parameters: None,
        },
        subject_public_key: BitString::from_bytes(&[0x04; 97]).unwrap(),
    };
    let validity = Validity::from_unix_range(
        Duration::from_secs(NOT_BEFORE),
        Duration::from_secs(NOT_AFTER),
    )
    .unwrap();

    let tbs = TBSCertificate::new(serial, algorithm.clone(), issuer, validity, subject, spki);
    Certificate::new(tbs, algorithm, BitString::from_bytes(&[0xAB; 96]).unwrap())
}

/// A certificate-set element holding `cert`.
pub fn cert_entry(cert: &Certificate) -> Any {
    Any::from_der(&cert.to_der().unwrap()).unwrap()
}

/// `[2]` tagged element, as an attribute certificate would be.
pub fn attribute_cert_entry() -> Any {
    Any::from_der(&[0xA2, 0x05, 0x30, 0x03, 0x02, 0x01, 0x01]).unwrap()
}

/// `[3]` tagged element, as an other-format certificate would be.
pub fn other_cert_entry() -> Any {
    Any::from_der(&[0xA3, 0x03, 0x06, 0x01, 0x00]).unwrap()
}

/// A SEQUENCE that is not a certificate.
pub fn bogus_sequence_entry() -> Any {
    Any::new(Tag::Sequence, vec![0x02, 0x01, 0x07]).unwrap()
}

/// DER ContentInfo of a signed-data envelope holding `entries` in order.
pub fn envelope(entries: Vec<Any>) -> Vec<u8> {
    let mut signed = SignedData::certs_only(&[]).unwrap();
    for entry in entries {
        signed.push_entry(entry);
    }
    signed.to_content_info_der().unwrap()
}

/// Issuer reference by base certificate id only.
pub fn base_id_issuer(issuer: &str, serial: u64) -> AttCertIssuer {
    AttCertIssuer::V2Form(V2Form {
        base_certificate_id: Some(IssuerSerial::new(&name(issuer), serial.into()).unwrap()),
        ..V2Form::default()
    })
}
