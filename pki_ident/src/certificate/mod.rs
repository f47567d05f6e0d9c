// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v3 Certificate structure and parsing.
//!
//! This module implements the X.509 v3 certificate structure as defined in RFC 5280,
//! as far as identity resolution needs it:
//! - TBSCertificate with all fields kept, so a decoded certificate re-encodes unchanged
//! - Certificate structure with signature (carried, never verified)
//! - Arbitrary-precision serial numbers
//! - DER and PEM encoding/decoding
//!
//! # Examples
//!
//! ```no_run
//! use pki_ident::Certificate;
//!
//! # fn example(der_bytes: &[u8], pem_string: &str) -> pki_ident::Result<()> {
//! // Parse from DER
//! let cert = Certificate::from_der(der_bytes)?;
//! println!("Subject: {}", cert.subject());
//! println!("Serial: {}", cert.serial_number());
//!
//! // Parse from PEM
//! let cert = Certificate::from_pem(pem_string)?;
//!
//! // Convert back to DER
//! let der_bytes = cert.to_der()?;
//! # let _ = der_bytes;
//! # Ok(())
//! # }
//! ```

pub mod name;
pub mod validity;

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use der::{
    asn1::{BitString, UintRef},
    Decode, DecodeValue, Encode, EncodeValue, ErrorKind, Header, Length, Reader, Sequence, Tag,
    TagMode, TagNumber, Writer,
};
use num_bigint::BigInt;

use crate::certificate::name::Name;
use crate::certificate::validity::Validity;
use crate::error::{EncodingError, Error, Result};
use spki::AlgorithmIdentifier;

// Re-export spki types
pub use spki::SubjectPublicKeyInfo as SpkiInfo;

/// Type alias for SubjectPublicKeyInfo with flexible parameters
pub type SubjectPublicKeyInfo = SpkiInfo<der::Any, BitString>;

/// PEM label of an X.509 certificate
pub const PEM_LABEL: &str = "CERTIFICATE";

// ============================================================================
// Version - RFC 5280 Section 4.1.2.1
// ============================================================================

/// X.509 certificate version.
///
/// ```asn1
/// Version  ::=  INTEGER  {  v1(0), v2(1), v3(2)  }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Version {
    /// Version 1 (value 0)
    V1 = 0,
    /// Version 2 (value 1)
    V2 = 1,
    /// Version 3 (value 2) - Default for modern certificates
    #[default]
    V3 = 2,
}

impl Version {
    /// Get the integer value of the version
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Create a Version from an integer value
    pub fn from_value(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Version::V1),
            1 => Ok(Version::V2),
            2 => Ok(Version::V3),
            _ => Err(Error::Asn1(der::Error::from(ErrorKind::Value {
                tag: Tag::Integer,
            }))),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.value() + 1)
    }
}

// ============================================================================
// Extensions - RFC 5280 Section 4.1.2.9
// ============================================================================

/// Extension represents a single X.509 v3 extension.
///
/// Extensions are carried opaquely so that certificates re-encode unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Sequence)]
pub struct Extension {
    /// Extension OID
    pub extn_id: const_oid::ObjectIdentifier,

    /// Whether this extension is critical
    #[asn1(default = "default_false")]
    pub critical: bool,

    /// Extension value (DER-encoded)
    pub extn_value: der::asn1::OctetString,
}

fn default_false() -> bool {
    false
}

/// Extensions  ::=  SEQUENCE SIZE (1..MAX) OF Extension
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extensions {
    /// List of extensions
    pub extensions: Vec<Extension>,
}

impl Extensions {
    /// Get the number of extensions
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Check if extensions list is empty
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl<'a> DecodeValue<'a> for Extensions {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |seq_reader| {
            let mut extensions = Vec::new();
            while !seq_reader.is_finished() {
                extensions.push(Extension::decode(seq_reader)?);
            }
            Ok(Self { extensions })
        })
    }
}

impl EncodeValue for Extensions {
    fn value_len(&self) -> der::Result<Length> {
        self.extensions
            .iter()
            .try_fold(Length::ZERO, |len, ext| len + ext.encoded_len()?)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        for ext in &self.extensions {
            ext.encode(writer)?;
        }
        Ok(())
    }
}

impl der::FixedTag for Extensions {
    const TAG: Tag = Tag::Sequence;
}

// ============================================================================
// TBSCertificate - RFC 5280 Section 4.1
// ============================================================================

/// TBSCertificate (To Be Signed Certificate) contains all certificate fields
/// that are signed by the issuer.
///
/// ```asn1
/// TBSCertificate  ::=  SEQUENCE  {
///     version         [0]  EXPLICIT Version DEFAULT v1,
///     serialNumber         CertificateSerialNumber,
///     signature            AlgorithmIdentifier,
///     issuer               Name,
///     validity             Validity,
///     subject              Name,
///     subjectPublicKeyInfo SubjectPublicKeyInfo,
///     issuerUniqueID  [1]  IMPLICIT UniqueIdentifier OPTIONAL,
///     subjectUniqueID [2]  IMPLICIT UniqueIdentifier OPTIONAL,
///     extensions      [3]  EXPLICIT Extensions OPTIONAL
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TBSCertificate {
    /// Certificate version (default v3)
    pub version: Version,

    /// INTEGER content octets of the serial number, two's complement,
    /// exactly as encoded.
    serial_number_bytes: Vec<u8>,

    /// Signature algorithm identifier (should match Certificate.signatureAlgorithm)
    pub signature: AlgorithmIdentifier<der::Any>,

    /// Issuer Distinguished Name, never empty
    pub issuer: Name,

    /// Validity period (notBefore and notAfter)
    pub validity: Validity,

    /// Subject Distinguished Name
    pub subject: Name,

    /// Subject's public key information
    pub subject_public_key_info: SubjectPublicKeyInfo,

    /// Issuer unique identifier (v2/v3 only, rarely used)
    pub issuer_unique_id: Option<BitString>,

    /// Subject unique identifier (v2/v3 only, rarely used)
    pub subject_unique_id: Option<BitString>,

    /// Extensions (v3 only)
    pub extensions: Option<Extensions>,
}

impl TBSCertificate {
    /// Create a new v3 TBSCertificate with the minimum required fields.
    pub fn new(
        serial_number: &BigInt,
        signature: AlgorithmIdentifier<der::Any>,
        issuer: Name,
        validity: Validity,
        subject: Name,
        subject_public_key_info: SubjectPublicKeyInfo,
    ) -> Self {
        Self {
            version: Version::V3,
            serial_number_bytes: serial_number.to_signed_bytes_be(),
            signature,
            issuer,
            validity,
            subject,
            subject_public_key_info,
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: None,
        }
    }

    /// Serial number as a signed integer.
    pub fn serial_number(&self) -> BigInt {
        BigInt::from_signed_bytes_be(&self.serial_number_bytes)
    }

    /// Serial number content octets as encoded.
    pub fn serial_number_bytes(&self) -> &[u8] {
        &self.serial_number_bytes
    }

    fn serial_number_header(&self) -> der::Result<Header> {
        Header::new(Tag::Integer, self.serial_number_bytes.len())
    }
}

// Serial numbers are read as raw INTEGER content: they may be negative or
// wider than any fixed-size integer, and must re-encode byte for byte.
fn decode_serial_number<'a, R: Reader<'a>>(reader: &mut R) -> der::Result<Vec<u8>> {
    let header = Header::decode(reader)?;
    header.tag.assert_eq(Tag::Integer)?;
    if header.length.is_zero() {
        return Err(reader.error(ErrorKind::Length { tag: Tag::Integer }));
    }
    reader.read_vec(header.length)
}

impl<'a> DecodeValue<'a> for TBSCertificate {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let version = reader
                .context_specific::<UintRef<'a>>(TagNumber::N0, TagMode::Explicit)?
                .map(|v| match v.as_bytes() {
                    [value] => Version::from_value(*value)
                        .map_err(|_| der::Error::from(ErrorKind::Value { tag: Tag::Integer })),
                    _ => Err(der::Error::from(ErrorKind::Value { tag: Tag::Integer })),
                })
                .transpose()?
                .unwrap_or(Version::V1);

            let serial_number_bytes = decode_serial_number(reader)?;
            let signature = AlgorithmIdentifier::decode(reader)?;
            let issuer = Name::decode(reader)?;
            if issuer.is_empty() {
                log::trace!("rejecting certificate with empty issuer name");
                return Err(reader.error(ErrorKind::Value { tag: Tag::Sequence }));
            }
            let validity = Validity::decode(reader)?;
            let subject = Name::decode(reader)?;
            let subject_public_key_info = SubjectPublicKeyInfo::decode(reader)?;

            let issuer_unique_id =
                reader.context_specific::<BitString>(TagNumber::N1, TagMode::Implicit)?;
            let subject_unique_id =
                reader.context_specific::<BitString>(TagNumber::N2, TagMode::Implicit)?;
            let extensions =
                reader.context_specific::<Extensions>(TagNumber::N3, TagMode::Explicit)?;

            Ok(Self {
                version,
                serial_number_bytes,
                signature,
                issuer,
                validity,
                subject,
                subject_public_key_info,
                issuer_unique_id,
                subject_unique_id,
                extensions,
            })
        })
    }
}

impl TBSCertificate {
    fn version_field(&self) -> Option<der::asn1::ContextSpecific<u8>> {
        (self.version != Version::V1).then(|| der::asn1::ContextSpecific {
            tag_number: TagNumber::N0,
            tag_mode: TagMode::Explicit,
            value: self.version.value(),
        })
    }

    fn unique_id_field(
        number: TagNumber,
        value: &Option<BitString>,
    ) -> Option<der::asn1::ContextSpecificRef<'_, BitString>> {
        value.as_ref().map(|value| der::asn1::ContextSpecificRef {
            tag_number: number,
            tag_mode: TagMode::Implicit,
            value,
        })
    }

    fn extensions_field(&self) -> Option<der::asn1::ContextSpecificRef<'_, Extensions>> {
        self.extensions
            .as_ref()
            .map(|value| der::asn1::ContextSpecificRef {
                tag_number: TagNumber::N3,
                tag_mode: TagMode::Explicit,
                value,
            })
    }
}

impl EncodeValue for TBSCertificate {
    fn value_len(&self) -> der::Result<Length> {
        let serial_len = (self.serial_number_header()?.encoded_len()?
            + Length::try_from(self.serial_number_bytes.len())?)?;

        self.version_field().encoded_len()?
            + serial_len
            + self.signature.encoded_len()?
            + self.issuer.encoded_len()?
            + self.validity.encoded_len()?
            + self.subject.encoded_len()?
            + self.subject_public_key_info.encoded_len()?
            + Self::unique_id_field(TagNumber::N1, &self.issuer_unique_id).encoded_len()?
            + Self::unique_id_field(TagNumber::N2, &self.subject_unique_id).encoded_len()?
            + self.extensions_field().encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.version_field().encode(writer)?;
        self.serial_number_header()?.encode(writer)?;
        writer.write(&self.serial_number_bytes)?;
        self.signature.encode(writer)?;
        self.issuer.encode(writer)?;
        self.validity.encode(writer)?;
        self.subject.encode(writer)?;
        self.subject_public_key_info.encode(writer)?;
        Self::unique_id_field(TagNumber::N1, &self.issuer_unique_id).encode(writer)?;
        Self::unique_id_field(TagNumber::N2, &self.subject_unique_id).encode(writer)?;
        self.extensions_field().encode(writer)
    }
}

impl der::FixedTag for TBSCertificate {
    const TAG: Tag = Tag::Sequence;
}

// ============================================================================
// Certificate - RFC 5280 Section 4.1
// ============================================================================

/// X.509 Certificate structure.
///
/// ```asn1
/// Certificate  ::=  SEQUENCE  {
///     tbsCertificate       TBSCertificate,
///     signatureAlgorithm   AlgorithmIdentifier,
///     signatureValue       BIT STRING
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    /// The certificate content to be signed
    pub tbs_certificate: TBSCertificate,

    /// The signature algorithm used by the issuer
    pub signature_algorithm: AlgorithmIdentifier<der::Any>,

    /// The signature value (signature of DER-encoded tbsCertificate)
    pub signature_value: BitString,
}

impl Certificate {
    /// Create a new Certificate.
    pub fn new(
        tbs_certificate: TBSCertificate,
        signature_algorithm: AlgorithmIdentifier<der::Any>,
        signature_value: BitString,
    ) -> Self {
        Self {
            tbs_certificate,
            signature_algorithm,
            signature_value,
        }
    }

    /// Parse a Certificate from DER-encoded bytes.
    ///
    /// The input must hold exactly one certificate.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        Ok(<Self as Decode<'_>>::from_der(bytes)?)
    }

    /// Parse a Certificate from a PEM `CERTIFICATE` block.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let (label, der_bytes) = pem_rfc7468::decode_vec(pem.as_bytes())?;
        if label != PEM_LABEL {
            return Err(Error::EncodingError(EncodingError::InvalidPemLabel {
                expected: String::from(PEM_LABEL),
                found: String::from(label),
            }));
        }

        Self::from_der(&der_bytes)
    }

    /// Encode the certificate to DER format.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        Ok(Encode::to_der(self)?)
    }

    /// Encode the certificate to PEM format.
    pub fn to_pem(&self) -> Result<String> {
        let der = self.to_der()?;
        Ok(pem_rfc7468::encode_string(
            PEM_LABEL,
            pem_rfc7468::LineEnding::LF,
            &der,
        )?)
    }

    /// Get the subject distinguished name.
    pub fn subject(&self) -> &Name {
        &self.tbs_certificate.subject
    }

    /// Get the issuer distinguished name.
    pub fn issuer(&self) -> &Name {
        &self.tbs_certificate.issuer
    }

    /// Get the certificate's serial number.
    pub fn serial_number(&self) -> BigInt {
        self.tbs_certificate.serial_number()
    }

    /// Get the serial number content octets as encoded.
    pub fn serial_number_bytes(&self) -> &[u8] {
        self.tbs_certificate.serial_number_bytes()
    }

    /// Get the validity period.
    pub fn validity(&self) -> &Validity {
        &self.tbs_certificate.validity
    }

    /// Get the certificate version.
    pub fn version(&self) -> Version {
        self.tbs_certificate.version
    }

    /// Get the extensions if present.
    pub fn extensions(&self) -> Option<&Extensions> {
        self.tbs_certificate.extensions.as_ref()
    }
}

impl<'a> DecodeValue<'a> for Certificate {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let tbs_certificate = TBSCertificate::decode(reader)?;
            let signature_algorithm = AlgorithmIdentifier::decode(reader)?;
            let signature_value = BitString::decode(reader)?;

            Ok(Self {
                tbs_certificate,
                signature_algorithm,
                signature_value,
            })
        })
    }
}

impl EncodeValue for Certificate {
    fn value_len(&self) -> der::Result<Length> {
        self.tbs_certificate.encoded_len()?
            + self.signature_algorithm.encoded_len()?
            + self.signature_value.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.tbs_certificate.encode(writer)?;
        self.signature_algorithm.encode(writer)?;
        self.signature_value.encode(writer)?;
        Ok(())
    }
}

impl der::FixedTag for Certificate {
    const TAG: Tag = Tag::Sequence;
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Certificate:")?;
        writeln!(f, "  Version: {}", self.version())?;
        writeln!(f, "  Serial Number: {:x}", self.serial_number())?;
        writeln!(f, "  Issuer: {}", self.issuer())?;
        writeln!(f, "  Validity:")?;
        writeln!(f, "    Not Before: {}", self.validity().not_before)?;
        writeln!(f, "    Not After: {}", self.validity().not_after)?;
        writeln!(f, "  Subject: {}", self.subject())?;

        if let Some(extensions) = self.extensions() {
            writeln!(f, "  Extensions: {} extension(s)", extensions.len())?;
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
