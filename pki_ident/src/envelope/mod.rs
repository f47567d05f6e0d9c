// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! PKCS#7 / CMS signed-data envelopes carrying certificates.
//!
//! Only the certificate set of a signed-data structure is interpreted. The
//! digest algorithms, encapsulated content and signer infos are carried
//! opaquely; nothing here verifies a signature.
//!
//! ```asn1
//! ContentInfo ::= SEQUENCE {
//!     contentType ContentType,
//!     content [0] EXPLICIT ANY DEFINED BY contentType }
//!
//! SignedData ::= SEQUENCE {
//!     version CMSVersion,
//!     digestAlgorithms SET OF DigestAlgorithmIdentifier,
//!     encapContentInfo EncapsulatedContentInfo,
//!     certificates [0] IMPLICIT CertificateSet OPTIONAL,
//!     crls [1] IMPLICIT RevocationInfoChoices OPTIONAL,
//!     signerInfos SignerInfos }
//! ```

extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;

use const_oid::ObjectIdentifier;
use der::{
    Any, Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, SliceReader,
    Tag, Tagged, Writer,
};

use crate::certificate::Certificate;
use crate::error::{Error, Result};

/// id-signedData - 1.2.840.113549.1.7.2
pub const SIGNED_DATA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.2");

/// id-data - 1.2.840.113549.1.7.1
pub const DATA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.1");

/// Outer CMS wrapper naming the type of its content.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct ContentInfo {
    pub content_type: ObjectIdentifier,
    #[asn1(context_specific = "0", tag_mode = "EXPLICIT")]
    pub content: Any,
}

/// EncapsulatedContentInfo; empty (detached) for certificate-only envelopes.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct EncapsulatedContentInfo {
    pub econtent_type: ObjectIdentifier,
    #[asn1(context_specific = "0", tag_mode = "EXPLICIT", optional = "true")]
    pub econtent: Option<Any>,
}

/// A SET OF arbitrary elements, kept in encoding order.
///
/// `SetOfVec` would re-sort on decode and require an ordering for every
/// element kind; entries here only need to round-trip.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EntrySet(Vec<Any>);

impl EntrySet {
    pub fn new(entries: Vec<Any>) -> Self {
        Self(entries)
    }

    pub fn push(&mut self, entry: Any) {
        self.0.push(entry);
    }

    pub fn as_slice(&self) -> &[Any] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Any> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> DecodeValue<'a> for EntrySet {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let mut entries = Vec::new();
            while !reader.is_finished() {
                entries.push(Any::decode(reader)?);
            }
            Ok(Self(entries))
        })
    }
}

impl EncodeValue for EntrySet {
    fn value_len(&self) -> der::Result<Length> {
        self.0
            .iter()
            .try_fold(Length::ZERO, |len, entry| len + entry.encoded_len()?)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        for entry in &self.0 {
            entry.encode(writer)?;
        }
        Ok(())
    }
}

impl der::FixedTag for EntrySet {
    const TAG: Tag = Tag::Set;
}

/// RFC 5652 SignedData.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct SignedData {
    pub version: u8,
    pub digest_algorithms: Any,
    pub encap_content_info: EncapsulatedContentInfo,
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", optional = "true")]
    pub certificates: Option<EntrySet>,
    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub crls: Option<EntrySet>,
    pub signer_infos: Any,
}

impl SignedData {
    /// A degenerate signed-data structure with no signers, carrying `certs`.
    pub fn certs_only(certs: &[Certificate]) -> Result<Self> {
        let empty_set = Any::new(Tag::Set, Vec::new())?;
        let mut signed = Self {
            version: 1,
            digest_algorithms: empty_set.clone(),
            encap_content_info: EncapsulatedContentInfo {
                econtent_type: DATA,
                econtent: None,
            },
            certificates: None,
            crls: None,
            signer_infos: empty_set,
        };

        for cert in certs {
            signed.push_entry(Any::from_der(&cert.to_der()?)?);
        }
        Ok(signed)
    }

    /// Append one element to the certificate set.
    pub fn push_entry(&mut self, entry: Any) {
        self.certificates
            .get_or_insert_with(EntrySet::default)
            .push(entry);
    }

    /// Elements of the certificate set, in encoding order.
    pub fn entries(&self) -> &[Any] {
        self.certificates
            .as_ref()
            .map(EntrySet::as_slice)
            .unwrap_or(&[])
    }

    /// Wrap in a ContentInfo and encode.
    pub fn to_content_info_der(&self) -> Result<Vec<u8>> {
        let info = ContentInfo {
            content_type: SIGNED_DATA,
            content: Any::from_der(&self.to_der()?)?,
        };
        Ok(info.to_der()?)
    }

    /// Decode a ContentInfo carrying signed-data.
    ///
    /// `Ok(None)` when `der` is not a ContentInfo of type signed-data, that
    /// is, when it is a SEQUENCE whose first element is not the signed-data
    /// OID or which has a single element. A sequence that announces
    /// signed-data but does not carry it is an error.
    pub fn from_content_info_der(der: &[u8]) -> Result<Option<Self>> {
        let outer = Any::from_der(der)?;
        if outer.tag() != Tag::Sequence {
            return Ok(None);
        }

        let mut children = SliceReader::new(outer.value())?;
        let announces_signed_data = match Any::decode(&mut children) {
            Ok(first) if first.tag() == Tag::ObjectIdentifier => {
                ObjectIdentifier::from_bytes(first.value()).ok() == Some(SIGNED_DATA)
            }
            _ => false,
        };
        if !announces_signed_data || children.is_finished() {
            return Ok(None);
        }

        let info = ContentInfo::from_der(der)
            .map_err(|e| Error::malformed_envelope(e.to_string()))?;
        let signed = SignedData::from_der(&info.content.to_der()?)
            .map_err(|e| Error::malformed_envelope(e.to_string()))?;

        log::trace!(
            "signed-data v{} with {} certificate set entries",
            signed.version,
            signed.entries().len()
        );
        Ok(Some(signed))
    }
}

/// One element of a signed-data certificate set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EnvelopeEntry {
    /// An ordinary X.509 certificate
    Certificate(Certificate),
    /// Anything else: tagged alternatives such as attribute certificates
    /// (`[1]`, `[2]`) or other formats (`[3]`), and sequences that are
    /// not certificates
    Unsupported { tag: Tag },
}

impl EnvelopeEntry {
    /// Sort one certificate-set element. Never fails.
    pub fn classify(entry: &Any) -> Self {
        let tag = entry.tag();
        if tag != Tag::Sequence {
            return EnvelopeEntry::Unsupported { tag };
        }

        match entry
            .to_der()
            .map_err(Error::from)
            .and_then(|der| Certificate::from_der(&der))
        {
            Ok(cert) => EnvelopeEntry::Certificate(cert),
            Err(e) => {
                log::debug!("sequence in certificate set is not a certificate: {}", e);
                EnvelopeEntry::Unsupported { tag }
            }
        }
    }
}

/// A complete object read from the top level of a stream.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TopLevelObject {
    Envelope(SignedData),
    Certificate(Certificate),
}

impl TopLevelObject {
    /// Classify one complete DER object: a signed-data envelope when it
    /// announces one, otherwise it must be a certificate.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        match SignedData::from_content_info_der(der)? {
            Some(signed) => Ok(TopLevelObject::Envelope(signed)),
            None => Certificate::from_der(der).map(TopLevelObject::Certificate),
        }
    }
}
