// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Attribute certificate issuer references (RFC 5755 Section 4.1).
//!
//! ```asn1
//! AttCertIssuer ::= CHOICE {
//!     v1Form   GeneralNames,  -- MUST NOT be used in this profile
//!     v2Form   [0] V2Form     -- v2 only
//! }
//!
//! V2Form ::= SEQUENCE {
//!     issuerName            GeneralNames  OPTIONAL,
//!     baseCertificateID     [0] IssuerSerial  OPTIONAL,
//!     objectDigestInfo      [1] ObjectDigestInfo  OPTIONAL
//! }
//!
//! IssuerSerial  ::=  SEQUENCE {
//!     issuer         GeneralNames,
//!     serial         CertificateSerialNumber,
//!     issuerUID      UniqueIdentifier OPTIONAL
//! }
//! ```
//!
//! All tags in the RFC 5755 module are IMPLICIT.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use der::{
    asn1::{BitString, ContextSpecificRef, UintRef},
    Any, Decode, DecodeValue, Encode, EncodeValue, ErrorKind, Header, Length, Reader, Tag,
    TagMode, TagNumber, Writer,
};
use num_bigint::BigUint;

use crate::certificate::name::{GeneralNames, Name};
use crate::certificate::Certificate;
use crate::error::Result;

// ============================================================================
// IssuerSerial
// ============================================================================

/// Identifies a public-key certificate by issuer and serial number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerSerial {
    /// Names of the issuer of the referenced certificate
    pub issuer: GeneralNames,
    /// Serial number of the referenced certificate
    pub serial: BigUint,
    /// Issuer unique identifier, rarely present
    pub issuer_uid: Option<BitString>,
}

impl IssuerSerial {
    /// Reference the certificate issued by `issuer` under `serial`.
    pub fn new(issuer: &Name, serial: BigUint) -> Result<Self> {
        Ok(Self {
            issuer: GeneralNames::from_directory_name(issuer)?,
            serial,
            issuer_uid: None,
        })
    }

    /// Whether `cert` is the referenced certificate: the serial numbers are
    /// equal and the certificate's issuer is one of the directory names.
    pub fn matches(&self, cert: &Certificate) -> bool {
        cert.serial_number().to_biguint().as_ref() == Some(&self.serial)
            && self.issuer.contains_directory_name(cert.issuer())
    }

    fn serial_bytes(&self) -> Vec<u8> {
        self.serial.to_bytes_be()
    }
}

impl<'a> DecodeValue<'a> for IssuerSerial {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let issuer = GeneralNames::decode(reader)?;
            // UintRef rejects negative serials
            let serial = BigUint::from_bytes_be(UintRef::decode(reader)?.as_bytes());
            let issuer_uid = if reader.is_finished() {
                None
            } else {
                Some(BitString::decode(reader)?)
            };

            Ok(Self {
                issuer,
                serial,
                issuer_uid,
            })
        })
    }
}

impl EncodeValue for IssuerSerial {
    fn value_len(&self) -> der::Result<Length> {
        let serial = self.serial_bytes();
        self.issuer.encoded_len()?
            + UintRef::new(&serial)?.encoded_len()?
            + self.issuer_uid.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        let serial = self.serial_bytes();
        self.issuer.encode(writer)?;
        UintRef::new(&serial)?.encode(writer)?;
        self.issuer_uid.encode(writer)
    }
}

impl der::FixedTag for IssuerSerial {
    const TAG: Tag = Tag::Sequence;
}

// ============================================================================
// ObjectDigestInfo
// ============================================================================

/// ObjectDigestInfo, kept as its encoded content.
///
/// Identifies the issuer by a digest of its public key or certificate;
/// carried for re-encoding only, never compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDigestInfo {
    content: Vec<u8>,
}

impl ObjectDigestInfo {
    /// Content octets of the SEQUENCE.
    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }
}

impl<'a> DecodeValue<'a> for ObjectDigestInfo {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        Ok(Self {
            content: reader.read_vec(header.length)?,
        })
    }
}

impl EncodeValue for ObjectDigestInfo {
    fn value_len(&self) -> der::Result<Length> {
        self.content.len().try_into()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        writer.write(&self.content)
    }
}

impl der::FixedTag for ObjectDigestInfo {
    const TAG: Tag = Tag::Sequence;
}

// ============================================================================
// V2Form
// ============================================================================

/// Second-form issuer reference.
///
/// An absent `issuerName` decodes as an empty list, and an empty list is
/// omitted on encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct V2Form {
    /// Names of the issuer
    pub issuer_name: GeneralNames,
    /// The issuer's own public-key certificate
    pub base_certificate_id: Option<IssuerSerial>,
    /// Digest identifying the issuer
    pub object_digest_info: Option<ObjectDigestInfo>,
}

impl V2Form {
    fn issuer_name_len(&self) -> der::Result<Length> {
        if self.issuer_name.is_empty() {
            Ok(Length::ZERO)
        } else {
            self.issuer_name.encoded_len()
        }
    }

    fn base_certificate_id_field(&self) -> Option<ContextSpecificRef<'_, IssuerSerial>> {
        self.base_certificate_id
            .as_ref()
            .map(|value| ContextSpecificRef {
                tag_number: TagNumber::N0,
                tag_mode: TagMode::Implicit,
                value,
            })
    }

    fn object_digest_info_field(&self) -> Option<ContextSpecificRef<'_, ObjectDigestInfo>> {
        self.object_digest_info
            .as_ref()
            .map(|value| ContextSpecificRef {
                tag_number: TagNumber::N1,
                tag_mode: TagMode::Implicit,
                value,
            })
    }
}

impl<'a> DecodeValue<'a> for V2Form {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let issuer_name = if !reader.is_finished() && reader.peek_tag()? == Tag::Sequence {
                GeneralNames::decode(reader)?
            } else {
                GeneralNames::default()
            };
            let base_certificate_id =
                reader.context_specific::<IssuerSerial>(TagNumber::N0, TagMode::Implicit)?;
            let object_digest_info =
                reader.context_specific::<ObjectDigestInfo>(TagNumber::N1, TagMode::Implicit)?;

            Ok(Self {
                issuer_name,
                base_certificate_id,
                object_digest_info,
            })
        })
    }
}

impl EncodeValue for V2Form {
    fn value_len(&self) -> der::Result<Length> {
        self.issuer_name_len()?
            + self.base_certificate_id_field().encoded_len()?
            + self.object_digest_info_field().encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        if !self.issuer_name.is_empty() {
            self.issuer_name.encode(writer)?;
        }
        self.base_certificate_id_field().encode(writer)?;
        self.object_digest_info_field().encode(writer)
    }
}

impl der::FixedTag for V2Form {
    const TAG: Tag = Tag::Sequence;
}

// ============================================================================
// AttCertIssuer
// ============================================================================

const V2_FORM_TAG: Tag = Tag::ContextSpecific {
    constructed: true,
    number: TagNumber::N0,
};

/// The issuer of an attribute certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttCertIssuer {
    /// Bare list of issuer names
    V1Form(GeneralNames),
    /// `[0]` tagged structured reference
    V2Form(V2Form),
}

impl AttCertIssuer {
    /// Reference the issuer with the given distinguished name.
    pub fn from_principal(principal: &Name) -> Result<Self> {
        Ok(AttCertIssuer::V2Form(V2Form {
            issuer_name: GeneralNames::from_directory_name(principal)?,
            ..V2Form::default()
        }))
    }

    /// Interpret an already decoded element.
    pub fn from_any(any: &Any) -> Result<Self> {
        Ok(Self::from_der(&any.to_der()?)?)
    }

    /// The issuer-name list of either form.
    pub fn issuer_names(&self) -> &GeneralNames {
        match self {
            AttCertIssuer::V1Form(names) => names,
            AttCertIssuer::V2Form(form) => &form.issuer_name,
        }
    }

    /// The base certificate reference, V2Form only.
    pub fn base_certificate_id(&self) -> Option<&IssuerSerial> {
        match self {
            AttCertIssuer::V1Form(_) => None,
            AttCertIssuer::V2Form(form) => form.base_certificate_id.as_ref(),
        }
    }

    /// Every directory name in the issuer-name list, in order.
    ///
    /// Entries that do not decode are left out.
    pub fn principals(&self) -> Vec<Name> {
        self.issuer_names().directory_names().collect()
    }

    /// Whether `cert` is the referenced issuer.
    ///
    /// With a base certificate reference, only that reference decides.
    /// Otherwise the certificate's subject must be one of the directory
    /// names of the issuer-name list.
    pub fn matches(&self, cert: &Certificate) -> bool {
        if let Some(base) = self.base_certificate_id() {
            return base.matches(cert);
        }
        self.issuer_names().contains_directory_name(cert.subject())
    }

    fn v2_form_field(form: &V2Form) -> ContextSpecificRef<'_, V2Form> {
        ContextSpecificRef {
            tag_number: TagNumber::N0,
            tag_mode: TagMode::Implicit,
            value: form,
        }
    }
}

impl<'a> Decode<'a> for AttCertIssuer {
    fn decode<R: Reader<'a>>(reader: &mut R) -> der::Result<Self> {
        let header = Header::decode(reader)?;
        match header.tag {
            Tag::Sequence => Ok(AttCertIssuer::V1Form(GeneralNames::decode_value(
                reader, header,
            )?)),
            V2_FORM_TAG => Ok(AttCertIssuer::V2Form(V2Form::decode_value(reader, header)?)),
            actual => Err(reader.error(ErrorKind::TagUnexpected {
                expected: Some(V2_FORM_TAG),
                actual,
            })),
        }
    }
}

impl Encode for AttCertIssuer {
    fn encoded_len(&self) -> der::Result<Length> {
        match self {
            AttCertIssuer::V1Form(names) => names.encoded_len(),
            AttCertIssuer::V2Form(form) => Self::v2_form_field(form).encoded_len(),
        }
    }

    fn encode(&self, writer: &mut impl Writer) -> der::Result<()> {
        match self {
            AttCertIssuer::V1Form(names) => names.encode(writer),
            AttCertIssuer::V2Form(form) => Self::v2_form_field(form).encode(writer),
        }
    }
}

impl fmt::Display for AttCertIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttCertIssuer::V1Form(names) => write!(f, "v1Form [{}]", names),
            AttCertIssuer::V2Form(form) => {
                write!(f, "v2Form [{}]", form.issuer_name)?;
                if let Some(base) = &form.base_certificate_id {
                    write!(f, " base [{}] serial {:x}", base.issuer, base.serial)?;
                }
                Ok(())
            }
        }
    }
}
