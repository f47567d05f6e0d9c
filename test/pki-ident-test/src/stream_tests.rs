// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use std::io::{Cursor, Read};

use pki_ident::error::{EncodingError, Error, ParseError};
use pki_ident::stream::{CertificateSource, ParserOptions};
use pki_ident::Certificate;

use crate::common::{self, *};

/// Hands out at most one byte per read call.
struct Trickle<'a> {
    data: &'a [u8],
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.data.is_empty() || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.data[0];
        self.data = &self.data[1..];
        Ok(1)
    }
}

fn chain() -> Vec<Certificate> {
    vec![
        common::certificate("CN=Leaf,O=Acme", "CN=Intermediate,O=Acme", 3),
        common::certificate("CN=Intermediate,O=Acme", "CN=Root,O=Acme", 2),
        common::certificate("CN=Root,O=Acme", "CN=Root,O=Acme", 1),
    ]
}

fn decode_all(bytes: &[u8]) -> Vec<Certificate> {
    CertificateSource::new(bytes).read_all().unwrap()
}

#[test]
fn test_der_and_pem_decode_to_same_certificates() {
    setup_logger();
    let certs = chain();

    let mut der = Vec::new();
    let mut pem = String::new();
    for cert in &certs {
        der.extend_from_slice(&cert.to_der().unwrap());
        pem.push_str(&cert.to_pem().unwrap());
    }

    let from_der = decode_all(&der);
    let from_pem = decode_all(pem.as_bytes());
    assert_eq!(from_der, certs);
    assert_eq!(from_pem, certs);
}

#[test]
fn test_pem_with_surrounding_text() {
    setup_logger();
    let certs = chain();
    let mut pem = String::from("Bag Attributes\n    friendlyName: bundle\n");
    for cert in &certs {
        pem.push_str("subject=");
        pem.push_str(&cert.subject().to_string());
        pem.push('\n');
        pem.push_str(&cert.to_pem().unwrap());
        pem.push('\n');
    }
    pem.push_str("trailing notes\n");

    assert_eq!(decode_all(pem.as_bytes()), certs);
}

#[test]
fn test_envelope_yields_only_ordinary_certificates_in_order() {
    setup_logger();
    let certs = chain();
    let der = envelope(vec![
        attribute_cert_entry(),
        cert_entry(&certs[0]),
        other_cert_entry(),
        bogus_sequence_entry(),
        cert_entry(&certs[1]),
        attribute_cert_entry(),
        cert_entry(&certs[2]),
    ]);

    assert_eq!(decode_all(&der), certs);
}

#[test]
fn test_envelope_without_certificates_yields_nothing() {
    setup_logger();
    let der = envelope(vec![attribute_cert_entry(), other_cert_entry()]);
    let mut source = CertificateSource::new(der.as_slice());
    assert!(source.next_certificate().unwrap().is_none());
    assert!(!source.is_failed());
}

#[test]
fn test_bare_envelope_bare_concatenation() {
    setup_logger();
    let certs = chain();

    let mut der = certs[0].to_der().unwrap();
    der.extend_from_slice(&envelope(vec![
        other_cert_entry(),
        cert_entry(&certs[1]),
    ]));
    der.extend_from_slice(&certs[2].to_der().unwrap());

    assert_eq!(decode_all(&der), certs);
}

#[test]
fn test_empty_envelope_between_certificates_is_skipped() {
    setup_logger();
    let certs = chain();

    let mut der = certs[0].to_der().unwrap();
    der.extend_from_slice(&envelope(vec![attribute_cert_entry()]));
    der.extend_from_slice(&certs[1].to_der().unwrap());

    assert_eq!(decode_all(&der), certs[..2].to_vec());
}

#[test]
fn test_der_followed_by_pem() {
    setup_logger();
    let certs = chain();
    let mut bytes = certs[0].to_der().unwrap();
    bytes.extend_from_slice(certs[1].to_pem().unwrap().as_bytes());

    assert_eq!(decode_all(&bytes), certs[..2].to_vec());
}

#[test]
fn test_end_of_stream_is_sticky() {
    setup_logger();
    let cert = common::certificate("CN=Only", "CN=Only", 42);
    let der = cert.to_der().unwrap();
    let mut source = CertificateSource::new(der.as_slice());

    assert_eq!(source.next_certificate().unwrap(), Some(cert));
    for _ in 0..3 {
        assert_eq!(source.next_certificate().unwrap(), None);
    }
}

#[test]
fn test_empty_input() {
    setup_logger();
    let mut source = CertificateSource::new(&b""[..]);
    assert_eq!(source.next_certificate().unwrap(), None);
    assert_eq!(source.next_certificate().unwrap(), None);
}

#[test]
fn test_text_without_pem_block_is_end_of_stream() {
    setup_logger();
    let mut source = CertificateSource::new(&b"no certificates here\n"[..]);
    assert_eq!(source.next_certificate().unwrap(), None);
}

#[test]
fn test_unbuffered_reader_is_buffered() {
    setup_logger();
    let certs = chain();
    let mut der = envelope(certs.iter().map(cert_entry).collect());
    der.extend_from_slice(certs[0].to_pem().unwrap().as_bytes());

    let found = CertificateSource::new(Trickle { data: &der })
        .read_all()
        .unwrap();
    assert_eq!(found.len(), 4);
    assert_eq!(found[..3], certs[..]);
    assert_eq!(found[3], certs[0]);
}

#[test]
fn test_truncated_certificate_fails_then_poisons() {
    setup_logger();
    let certs = chain();
    let mut der = certs[0].to_der().unwrap();
    let second = certs[1].to_der().unwrap();
    der.extend_from_slice(&second[..second.len() - 10]);

    let mut source = CertificateSource::new(der.as_slice());
    assert_eq!(source.next_certificate().unwrap(), Some(certs[0].clone()));
    assert!(matches!(
        source.next_certificate(),
        Err(Error::ParseError(ParseError::UnexpectedEof))
    ));
    assert!(source.is_failed());
    assert!(source
        .next_certificate()
        .unwrap_err()
        .is_source_failed());
}

#[test]
fn test_iterator_stops_after_error() {
    setup_logger();
    let cert = common::certificate("CN=First", "CN=First", 1);
    let mut der = cert.to_der().unwrap();
    der.extend_from_slice(&[0x30, 0x03, 0x02, 0x01]);

    let results: Vec<_> = CertificateSource::new(der.as_slice()).collect();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap(), &cert);
    assert!(results[1].is_err());
}

#[test]
fn test_read_all_error_discards_partial_results() {
    setup_logger();
    let cert = common::certificate("CN=First", "CN=First", 1);
    let mut pem = cert.to_pem().unwrap();
    pem.push_str("-----BEGIN CERTIFICATE-----\nMIIB\n");

    let err = CertificateSource::new(pem.as_bytes())
        .read_all()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::EncodingError(EncodingError::MissingPemFooter(_))
    ));
}

#[test]
fn test_garbage_sequence_fails() {
    setup_logger();
    let mut source = CertificateSource::new(&[0x30, 0x03, 0x02, 0x01, 0x05][..]);
    assert!(matches!(source.next_certificate(), Err(Error::Asn1(_))));
    assert!(source.is_failed());
}

#[test]
fn test_structure_errors_have_one_variant_for_der_and_pem() {
    setup_logger();
    // the same non-certificate SEQUENCE, bare and inside a PEM block
    let pem = "-----BEGIN CERTIFICATE-----\nMAMCAQU=\n-----END CERTIFICATE-----\n";
    let mut source = CertificateSource::new(pem.as_bytes());
    assert!(matches!(source.next_certificate(), Err(Error::Asn1(_))));

    let mut source = CertificateSource::new(&[0x30, 0x02, 0x05, 0x00][..]);
    assert!(matches!(source.next_certificate(), Err(Error::Asn1(_))));
}

#[test]
fn test_read_limit() {
    setup_logger();
    let cert = common::certificate("CN=Big", "CN=Big", 7);
    let der = cert.to_der().unwrap();

    let options = ParserOptions::default().with_read_limit(16);
    let mut source = CertificateSource::with_options(Cursor::new(der.clone()), options);
    assert!(matches!(
        source.next_certificate(),
        Err(Error::ParseError(ParseError::ObjectTooLarge { limit: 16, .. }))
    ));

    let options = ParserOptions::default().with_read_limit(der.len());
    let mut source = CertificateSource::with_options(Cursor::new(der), options);
    assert_eq!(source.next_certificate().unwrap(), Some(cert));
}

#[test]
fn test_x509_certificate_label() {
    setup_logger();
    let cert = common::certificate("CN=Legacy", "CN=Legacy", 9);
    let pem = cert
        .to_pem()
        .unwrap()
        .replace("BEGIN CERTIFICATE", "BEGIN X509 CERTIFICATE")
        .replace("END CERTIFICATE", "END X509 CERTIFICATE");

    assert_eq!(decode_all(pem.as_bytes()), vec![cert]);

    let strict = ParserOptions::default().strict_pem_label();
    let mut source = CertificateSource::with_options(Cursor::new(pem.into_bytes()), strict);
    assert_eq!(source.next_certificate().unwrap(), None);
}
