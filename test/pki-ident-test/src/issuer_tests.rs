// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use der::{Decode, Encode};
use num_bigint::{BigInt, BigUint};

use pki_ident::acert::{AttCertIssuer, CertSelector, IssuerSerial, V2Form};
use pki_ident::stream::CertificateSource;
use pki_ident::{GeneralName, GeneralNames};

use crate::common::{self, *};

#[test]
fn test_principal_round_trip() {
    setup_logger();
    let principal = name("CN=Attribute Authority,OU=Platform,O=Acme,C=US");
    let issuer = AttCertIssuer::from_principal(&principal).unwrap();
    assert_eq!(issuer.principals(), vec![principal.clone()]);

    let decoded = AttCertIssuer::from_der(&issuer.to_der().unwrap()).unwrap();
    assert_eq!(decoded, issuer);
    assert_eq!(decoded.principals(), vec![principal]);
}

#[test]
fn test_principal_matches_subject_not_issuer() {
    setup_logger();
    let authority = common::certificate("CN=Authority,O=Acme", "CN=Root,O=Acme", 5);
    let issuer = AttCertIssuer::from_principal(authority.subject()).unwrap();
    assert!(issuer.matches(&authority));

    let issued_by_authority = common::certificate("CN=Leaf,O=Acme", "CN=Authority,O=Acme", 6);
    assert!(!issuer.matches(&issued_by_authority));
}

#[test]
fn test_principal_match_ignores_string_encoding() {
    setup_logger();
    let cert = common::certificate_for(
        printable_cn("Platform Authority"),
        name("CN=Root"),
        &BigInt::from(1),
    );

    let issuer = AttCertIssuer::from_principal(&utf8_cn("platform  authority")).unwrap();
    assert!(issuer.matches(&cert));

    let issuer = AttCertIssuer::from_principal(&utf8_cn("Platform Authority 2")).unwrap();
    assert!(!issuer.matches(&cert));
}

#[test]
fn test_base_certificate_id_decides_alone() {
    setup_logger();
    let authority = common::certificate("CN=Authority,O=Acme", "CN=Root,O=Acme", 77);

    let issuer = base_id_issuer("CN=Root,O=Acme", 77);
    assert!(issuer.matches(&authority));
    assert!(!issuer.matches(&common::certificate(
        "CN=Authority,O=Acme",
        "CN=Root,O=Acme",
        78
    )));
    assert!(!issuer.matches(&common::certificate(
        "CN=Authority,O=Acme",
        "CN=Other Root,O=Acme",
        77
    )));

    // The subject names the certificate, yet the base id disagrees.
    let issuer = AttCertIssuer::V2Form(V2Form {
        issuer_name: GeneralNames::from_directory_name(authority.subject()).unwrap(),
        base_certificate_id: Some(IssuerSerial::new(&name("CN=Root,O=Acme"), 1u32.into()).unwrap()),
        object_digest_info: None,
    });
    assert!(!issuer.matches(&authority));
}

#[test]
fn test_base_certificate_id_large_serial() {
    setup_logger();
    let serial = BigUint::parse_bytes(b"7f3a9c21e4b50d6688aa01ff02030405060708", 16).unwrap();
    let cert = common::certificate_for(
        name("CN=Authority"),
        name("CN=Root"),
        &BigInt::from(serial.clone()),
    );

    let reference = IssuerSerial::new(&name("CN=Root"), serial).unwrap();
    let issuer = AttCertIssuer::V2Form(V2Form {
        base_certificate_id: Some(reference),
        ..V2Form::default()
    });

    let decoded = AttCertIssuer::from_der(&issuer.to_der().unwrap()).unwrap();
    assert!(decoded.matches(&cert));
}

#[test]
fn test_negative_serial_never_matches_base_id() {
    setup_logger();
    let cert = common::certificate("CN=Authority", "CN=Root", -5);
    assert!(!base_id_issuer("CN=Root", 5).matches(&cert));
}

#[test]
fn test_v1_form_matches_subject() {
    setup_logger();
    let authority = common::certificate("CN=Authority,O=Acme", "CN=Root,O=Acme", 5);
    let names = GeneralNames::new(vec![
        GeneralName::DnsName("aa.example.com".into()),
        GeneralName::directory_name(&name("CN=Someone Else")).unwrap(),
        GeneralName::directory_name(&name("cn=authority, o=ACME")).unwrap(),
    ]);
    let issuer = AttCertIssuer::from_der(&names.to_der().unwrap()).unwrap();

    assert!(matches!(issuer, AttCertIssuer::V1Form(_)));
    assert_eq!(issuer.principals().len(), 2);
    assert!(issuer.matches(&authority));
}

#[test]
fn test_malformed_directory_names_are_skipped() {
    setup_logger();
    let authority = common::certificate("CN=Authority", "CN=Root", 5);
    let names = GeneralNames::new(vec![
        GeneralName::DirectoryName(vec![0x30, 0x05, 0x31, 0x03, 0x02, 0x01]),
        GeneralName::DirectoryName(vec![0x04, 0x00]),
        GeneralName::directory_name(authority.subject()).unwrap(),
    ]);
    let issuer = AttCertIssuer::V2Form(V2Form {
        issuer_name: names,
        ..V2Form::default()
    });
    let issuer = AttCertIssuer::from_der(&issuer.to_der().unwrap()).unwrap();

    assert_eq!(issuer.principals(), vec![authority.subject().clone()]);
    assert!(issuer.matches(&authority));
    assert!(!issuer.matches(&common::certificate("CN=Stranger", "CN=Root", 5)));
}

#[test]
fn test_only_malformed_names_match_nothing() {
    setup_logger();
    let issuer = AttCertIssuer::V1Form(GeneralNames::new(vec![GeneralName::DirectoryName(
        vec![0xff, 0xff],
    )]));

    assert!(issuer.principals().is_empty());
    assert!(!issuer.matches(&common::certificate("CN=Anyone", "CN=Root", 1)));
}

#[test]
fn test_primitive_directory_name_is_rejected() {
    setup_logger();
    let names = GeneralNames::from_directory_name(&name("CN=Authority")).unwrap();
    let mut der = names.to_der().unwrap();
    assert_eq!(der[2], 0xA4);
    let issuer = AttCertIssuer::from_der(&der).unwrap();
    assert_eq!(issuer.to_der().unwrap(), der);

    der[2] = 0x84;
    assert!(AttCertIssuer::from_der(&der).is_err());
}

#[test]
fn test_unknown_issuer_form_is_rejected() {
    setup_logger();
    // [1] is neither a bare GeneralNames nor the [0] V2Form
    let bytes = [0xA1, 0x02, 0x30, 0x00];
    assert!(AttCertIssuer::from_der(&bytes).is_err());
}

#[test]
fn test_select_from_stream() {
    setup_logger();
    let certs = vec![
        common::certificate("CN=Leaf,O=Acme", "CN=Authority,O=Acme", 9),
        common::certificate("CN=Authority,O=Acme", "CN=Root,O=Acme", 8),
        common::certificate("CN=Root,O=Acme", "CN=Root,O=Acme", 1),
    ];
    let bundle = envelope(
        [attribute_cert_entry()]
            .into_iter()
            .chain(certs.iter().map(cert_entry))
            .collect(),
    );
    let found = CertificateSource::new(bundle.as_slice()).read_all().unwrap();

    let by_name = AttCertIssuer::from_principal(&name("CN=Authority,O=Acme")).unwrap();
    assert_eq!(by_name.select(&found), vec![&certs[1]]);

    let by_id = base_id_issuer("CN=Root,O=Acme", 1);
    assert_eq!(by_id.select(&found), vec![&certs[2]]);
}
