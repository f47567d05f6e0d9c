// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Distinguished Name (DN) and GeneralName support for X.509 certificates.
//!
//! This module provides parsing and representation for X.509 distinguished names and
//! the general names used by attribute-certificate issuers, including:
//! - RDNSequence (Distinguished Names)
//! - RelativeDistinguishedName (RDN)
//! - AttributeTypeAndValue
//! - Common DN attributes (CN, O, OU, C, ST, L, etc.)
//! - GeneralName / GeneralNames
//!
//! Names compare two ways. The derived `PartialEq` is byte-exact. The
//! [`RDNSequence::equivalent`] relation compares attribute values as text,
//! ignoring the string tag, letter case and surrounding/repeated whitespace,
//! and ignores the order of attributes inside a multi-valued RDN.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use const_oid::ObjectIdentifier;
use der::{
    asn1::{Ia5String, PrintableString, SetOfVec},
    Decode, DecodeValue, Encode, EncodeValue, Error, ErrorKind, Header, Length, Reader, Sequence,
    Tag, TagNumber, Tagged, ValueOrd, Writer,
};

use crate::error::NameError;

// ============================================================================
// Common Attribute Type OIDs (RFC 5280, Appendix A.1)
// ============================================================================

/// Common Name (CN) - 2.5.4.3
pub const CN: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");

/// Surname (SN) - 2.5.4.4
pub const SURNAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.4");

/// Serial Number - 2.5.4.5
pub const SERIAL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.5");

/// Country (C) - 2.5.4.6
pub const COUNTRY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");

/// Locality (L) - 2.5.4.7
pub const LOCALITY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");

/// State or Province (ST) - 2.5.4.8
pub const STATE_OR_PROVINCE_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");

/// Street Address - 2.5.4.9
pub const STREET_ADDRESS: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.9");

/// Organization (O) - 2.5.4.10
pub const ORGANIZATION_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");

/// Organizational Unit (OU) - 2.5.4.11
pub const ORGANIZATIONAL_UNIT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");

/// Title - 2.5.4.12
pub const TITLE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.12");

/// Given Name - 2.5.4.42
pub const GIVEN_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.42");

/// Domain Component (DC) - 0.9.2342.19200300.100.1.25
pub const DOMAIN_COMPONENT: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.25");

/// Email Address - 1.2.840.113549.1.9.1
pub const EMAIL_ADDRESS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.1");

/// Short names accepted in the text form, paired with their OIDs.
const SHORT_NAMES: &[(&str, ObjectIdentifier)] = &[
    ("CN", CN),
    ("SN", SURNAME),
    ("SERIALNUMBER", SERIAL_NUMBER),
    ("C", COUNTRY_NAME),
    ("L", LOCALITY_NAME),
    ("ST", STATE_OR_PROVINCE_NAME),
    ("STREET", STREET_ADDRESS),
    ("O", ORGANIZATION_NAME),
    ("OU", ORGANIZATIONAL_UNIT_NAME),
    ("TITLE", TITLE),
    ("GIVENNAME", GIVEN_NAME),
    ("DC", DOMAIN_COMPONENT),
    ("emailAddress", EMAIL_ADDRESS),
];

// ============================================================================
// DirectoryString - RFC 5280 Section 4.1.2.4
// ============================================================================

/// DirectoryString represents various ASN.1 string types used in X.509 names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryString {
    /// TeletexString (T61String) - Tag 20
    TeletexString(Vec<u8>),
    /// PrintableString - Tag 19
    PrintableString(PrintableString),
    /// UniversalString - Tag 28
    UniversalString(Vec<u8>),
    /// UTF8String - Tag 12
    Utf8String(String),
    /// BMPString - Tag 30
    BmpString(Vec<u8>),
    /// IA5String - Tag 22 (used for email addresses)
    Ia5String(Ia5String),
}

impl DirectoryString {
    /// Get the string value as UTF-8, converting if necessary.
    pub fn as_str(&self) -> Result<String, Error> {
        match self {
            DirectoryString::Utf8String(s) => Ok(s.clone()),
            DirectoryString::PrintableString(s) => Ok(s.to_string()),
            DirectoryString::Ia5String(s) => Ok(s.as_str().to_string()),
            DirectoryString::TeletexString(bytes) => Ok(String::from_utf8_lossy(bytes).to_string()),
            DirectoryString::BmpString(bytes) => {
                if bytes.len() % 2 != 0 {
                    return Err(ErrorKind::Length {
                        tag: Tag::BmpString,
                    }
                    .into());
                }
                let units: Vec<u16> = bytes
                    .chunks(2)
                    .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|_| {
                    ErrorKind::Value {
                        tag: Tag::BmpString,
                    }
                    .into()
                })
            }
            DirectoryString::UniversalString(bytes) => {
                if bytes.len() % 4 != 0 {
                    return Err(ErrorKind::Length {
                        tag: Tag::TeletexString,
                    }
                    .into());
                }
                bytes
                    .chunks(4)
                    .map(|chunk| {
                        let code_point =
                            u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                        char::from_u32(code_point).ok_or_else(|| {
                            ErrorKind::Value {
                                tag: Tag::TeletexString,
                            }
                            .into()
                        })
                    })
                    .collect()
            }
        }
    }

    /// Raw ASN.1 tag byte. `der::Tag` has no UniversalString (0x1C).
    fn encoding_tag_byte(&self) -> u8 {
        match self {
            DirectoryString::Utf8String(_) => 0x0C,
            DirectoryString::PrintableString(_) => 0x13,
            DirectoryString::Ia5String(_) => 0x16,
            DirectoryString::TeletexString(_) => 0x14,
            DirectoryString::BmpString(_) => 0x1E,
            DirectoryString::UniversalString(_) => 0x1C,
        }
    }
}

impl EncodeValue for DirectoryString {
    fn value_len(&self) -> der::Result<Length> {
        match self {
            DirectoryString::Utf8String(s) => s.len().try_into(),
            DirectoryString::PrintableString(s) => s.value_len(),
            DirectoryString::Ia5String(s) => s.value_len(),
            DirectoryString::TeletexString(bytes)
            | DirectoryString::BmpString(bytes)
            | DirectoryString::UniversalString(bytes) => bytes.len().try_into(),
        }
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        match self {
            DirectoryString::Utf8String(s) => writer.write(s.as_bytes()),
            DirectoryString::PrintableString(s) => s.encode_value(writer),
            DirectoryString::Ia5String(s) => s.encode_value(writer),
            DirectoryString::TeletexString(bytes)
            | DirectoryString::BmpString(bytes)
            | DirectoryString::UniversalString(bytes) => writer.write(bytes),
        }
    }
}

impl Encode for DirectoryString {
    fn encoded_len(&self) -> der::Result<Length> {
        let value_len = self.value_len()?;
        (Length::ONE + value_len.encoded_len()?)? + value_len
    }

    fn encode(&self, writer: &mut impl Writer) -> der::Result<()> {
        writer.write_byte(self.encoding_tag_byte())?;
        self.value_len()?.encode(writer)?;
        self.encode_value(writer)
    }
}

impl fmt::Display for DirectoryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Ok(s) => write!(f, "{}", s),
            Err(_) => write!(f, "<invalid encoding>"),
        }
    }
}

// ============================================================================
// AttributeTypeAndValue - RFC 5280 Section 4.1.2.4
// ============================================================================

/// Comparison form of an attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CanonicalValue {
    /// Any string type, case-folded with whitespace collapsed
    Text(String),
    /// Non-string or undecodable value
    Raw { tag: u8, content: Vec<u8> },
}

fn canonical_text(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// AttributeTypeAndValue represents a single attribute in an RDN.
///
/// Uses raw DER bytes for the value field to support ASN.1 tags not
/// representable in [`der::Tag`] (e.g., UniversalString tag 0x1C).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTypeAndValue {
    /// Attribute type (OID)
    pub oid: ObjectIdentifier,
    /// Raw DER-encoded value (tag + length + content).
    raw_value: Vec<u8>,
}

impl<'a> DecodeValue<'a> for AttributeTypeAndValue {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |nested| {
            let oid = ObjectIdentifier::decode(nested)?;
            let raw_value = nested.tlv_bytes()?.to_vec();
            Ok(Self { oid, raw_value })
        })
    }
}

impl EncodeValue for AttributeTypeAndValue {
    fn value_len(&self) -> der::Result<Length> {
        self.oid.encoded_len()? + Length::try_from(self.raw_value.len())?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.oid.encode(writer)?;
        writer.write(&self.raw_value)
    }
}

impl Sequence<'_> for AttributeTypeAndValue {}

impl AttributeTypeAndValue {
    /// Create a new AttributeTypeAndValue with a DirectoryString value.
    pub fn new(oid: ObjectIdentifier, value: DirectoryString) -> Result<Self, Error> {
        let raw_value = value.to_der()?;
        Ok(Self { oid, raw_value })
    }

    /// Create a new AttributeTypeAndValue with a UTF-8 string value.
    pub fn new_utf8(oid: ObjectIdentifier, value: &str) -> Result<Self, Error> {
        Self::new(oid, DirectoryString::Utf8String(value.to_string()))
    }

    /// Create a new AttributeTypeAndValue with a PrintableString value.
    pub fn new_printable(oid: ObjectIdentifier, value: &str) -> Result<Self, Error> {
        let printable = PrintableString::new(value).map_err(|_| ErrorKind::Value {
            tag: Tag::PrintableString,
        })?;
        Self::new(oid, DirectoryString::PrintableString(printable))
    }

    /// Create a new AttributeTypeAndValue with an IA5String value.
    pub fn new_ia5(oid: ObjectIdentifier, value: &str) -> Result<Self, Error> {
        let ia5 = Ia5String::new(value).map_err(|_| ErrorKind::Value {
            tag: Tag::Ia5String,
        })?;
        Self::new(oid, DirectoryString::Ia5String(ia5))
    }

    /// Create an attribute from text using the string type usual for `oid`.
    fn from_text(oid: ObjectIdentifier, value: &str) -> Result<Self, Error> {
        match oid {
            COUNTRY_NAME | SERIAL_NUMBER => {
                Self::new_printable(oid, value).or_else(|_| Self::new_utf8(oid, value))
            }
            DOMAIN_COMPONENT | EMAIL_ADDRESS => {
                Self::new_ia5(oid, value).or_else(|_| Self::new_utf8(oid, value))
            }
            _ => Self::new_utf8(oid, value),
        }
    }

    /// The raw tag byte of the attribute value.
    pub fn value_tag_byte(&self) -> u8 {
        self.raw_value.first().copied().unwrap_or(0)
    }

    /// The content bytes of the attribute value (after tag + length).
    pub fn value_content(&self) -> &[u8] {
        match self.raw_value.get(1) {
            Some(len_byte) if len_byte & 0x80 == 0 => self.raw_value.get(2..).unwrap_or(&[]),
            Some(len_byte) => {
                let n = (len_byte & 0x7F) as usize;
                self.raw_value.get(2 + n..).unwrap_or(&[])
            }
            None => &[],
        }
    }

    /// Get the attribute value as a [`DirectoryString`].
    pub fn directory_string(&self) -> Result<DirectoryString, Error> {
        let content = self.value_content();
        let text = |tag: Tag| {
            core::str::from_utf8(content).map_err(|_| Error::from(ErrorKind::Value { tag }))
        };

        match self.value_tag_byte() {
            0x0C => Ok(DirectoryString::Utf8String(text(Tag::Utf8String)?.to_string())),
            0x13 => PrintableString::new(text(Tag::PrintableString)?)
                .map(DirectoryString::PrintableString)
                .map_err(|_| {
                    ErrorKind::Value {
                        tag: Tag::PrintableString,
                    }
                    .into()
                }),
            0x16 => Ia5String::new(text(Tag::Ia5String)?)
                .map(DirectoryString::Ia5String)
                .map_err(|_| {
                    ErrorKind::Value {
                        tag: Tag::Ia5String,
                    }
                    .into()
                }),
            0x14 => Ok(DirectoryString::TeletexString(content.to_vec())),
            0x1E => Ok(DirectoryString::BmpString(content.to_vec())),
            0x1C => Ok(DirectoryString::UniversalString(content.to_vec())),
            tag_byte => Err(ErrorKind::TagUnexpected {
                expected: Some(Tag::Utf8String),
                actual: Tag::try_from(tag_byte).unwrap_or(Tag::Null),
            }
            .into()),
        }
    }

    /// Get the attribute value as a UTF-8 string.
    pub fn value_as_str(&self) -> Result<String, Error> {
        self.directory_string()?.as_str()
    }

    fn canonical_value(&self) -> CanonicalValue {
        match self.value_as_str() {
            Ok(text) => CanonicalValue::Text(canonical_text(&text)),
            Err(_) => CanonicalValue::Raw {
                tag: self.value_tag_byte(),
                content: self.value_content().to_vec(),
            },
        }
    }

    /// Whether both attributes carry the same type and the same value,
    /// regardless of the string type used to encode it.
    pub fn equivalent(&self, other: &Self) -> bool {
        self.oid == other.oid && self.canonical_value() == other.canonical_value()
    }

    /// Get a short name for the attribute type if known.
    pub fn attr_name(&self) -> &str {
        SHORT_NAMES
            .iter()
            .find(|(_, oid)| *oid == self.oid)
            .map(|(name, _)| *name)
            .unwrap_or("OID")
    }
}

impl fmt::Display for AttributeTypeAndValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.attr_name();
        match self.value_as_str() {
            Ok(value) if name == "OID" => write!(f, "{}={}", self.oid, value),
            Ok(value) => write!(f, "{}={}", name, value),
            Err(_) => write!(f, "{}=<error>", name),
        }
    }
}

impl ValueOrd for AttributeTypeAndValue {
    fn value_cmp(&self, other: &Self) -> der::Result<core::cmp::Ordering> {
        match self.oid.cmp(&other.oid) {
            core::cmp::Ordering::Equal => Ok(self.raw_value.cmp(&other.raw_value)),
            other_order => Ok(other_order),
        }
    }
}

// ============================================================================
// RelativeDistinguishedName - RFC 5280 Section 4.1.2.4
// ============================================================================

/// RelativeDistinguishedName (RDN) is a SET OF AttributeTypeAndValue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeDistinguishedName {
    /// Set of attributes
    pub attributes: SetOfVec<AttributeTypeAndValue>,
}

impl RelativeDistinguishedName {
    /// Create a new RDN with a single attribute.
    pub fn new(attr: AttributeTypeAndValue) -> Result<Self, Error> {
        Self::from_attributes(vec![attr])
    }

    /// Create a new RDN from multiple attributes.
    pub fn from_attributes(attrs: Vec<AttributeTypeAndValue>) -> Result<Self, Error> {
        let mut attributes = SetOfVec::new();
        for attr in attrs {
            attributes
                .insert(attr)
                .map_err(|_| ErrorKind::Value { tag: Tag::Set })?;
        }
        Ok(Self { attributes })
    }

    /// Get the first (or only) attribute in this RDN.
    pub fn first(&self) -> Option<&AttributeTypeAndValue> {
        self.attributes.iter().next()
    }

    /// Whether both RDNs hold pairwise-equivalent attributes, in any order.
    pub fn equivalent(&self, other: &Self) -> bool {
        if self.attributes.len() != other.attributes.len() {
            return false;
        }

        let theirs: Vec<&AttributeTypeAndValue> = other.attributes.iter().collect();
        let mut used = vec![false; theirs.len()];
        self.attributes.iter().all(|attr| {
            match (0..theirs.len()).find(|&i| !used[i] && attr.equivalent(theirs[i])) {
                Some(i) => {
                    used[i] = true;
                    true
                }
                None => false,
            }
        })
    }
}

impl<'a> DecodeValue<'a> for RelativeDistinguishedName {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let attributes = SetOfVec::decode_value(reader, header)?;
        Ok(Self { attributes })
    }
}

impl EncodeValue for RelativeDistinguishedName {
    fn value_len(&self) -> der::Result<Length> {
        self.attributes.value_len()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.attributes.encode_value(writer)
    }
}

impl der::FixedTag for RelativeDistinguishedName {
    const TAG: Tag = Tag::Set;
}

impl fmt::Display for RelativeDistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attrs: Vec<String> = self.attributes.iter().map(|a| a.to_string()).collect();
        write!(f, "{}", attrs.join("+"))
    }
}

// ============================================================================
// RDNSequence (Name) - RFC 5280 Section 4.1.2.4
// ============================================================================

/// RDNSequence represents a Distinguished Name (DN).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RDNSequence {
    /// Sequence of RDNs, ordered from root to leaf
    pub rdns: Vec<RelativeDistinguishedName>,
}

impl<'a> DecodeValue<'a> for RDNSequence {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let mut rdns = Vec::new();
            while !reader.is_finished() {
                rdns.push(RelativeDistinguishedName::decode(reader)?);
            }
            Ok(Self { rdns })
        })
    }
}

impl EncodeValue for RDNSequence {
    fn value_len(&self) -> der::Result<Length> {
        self.rdns
            .iter()
            .try_fold(Length::ZERO, |len, rdn| len + rdn.encoded_len()?)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        for rdn in &self.rdns {
            rdn.encode(writer)?;
        }
        Ok(())
    }
}

impl der::FixedTag for RDNSequence {
    const TAG: Tag = Tag::Sequence;
}

impl RDNSequence {
    /// Create a new empty RDNSequence.
    pub fn new() -> Self {
        Self { rdns: Vec::new() }
    }

    /// Create an RDNSequence from a vector of RDNs.
    pub fn from_rdns(rdns: Vec<RelativeDistinguishedName>) -> Self {
        Self { rdns }
    }

    /// Add an RDN to the sequence.
    pub fn push(&mut self, rdn: RelativeDistinguishedName) {
        self.rdns.push(rdn);
    }

    /// Get an iterator over the RDNs.
    pub fn iter(&self) -> core::slice::Iter<'_, RelativeDistinguishedName> {
        self.rdns.iter()
    }

    /// Whether the name has no RDNs.
    pub fn is_empty(&self) -> bool {
        self.rdns.is_empty()
    }

    /// Semantic DN equality.
    ///
    /// Same number of RDNs in the same order, each pair equivalent as
    /// defined by [`RelativeDistinguishedName::equivalent`]. Independent of
    /// the string tags and length framing of the original encoding.
    pub fn equivalent(&self, other: &Self) -> bool {
        self.rdns.len() == other.rdns.len()
            && self
                .rdns
                .iter()
                .zip(other.rdns.iter())
                .all(|(a, b)| a.equivalent(b))
    }
}

impl Default for RDNSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RDNSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rdns: Vec<String> = self.rdns.iter().rev().map(|r| r.to_string()).collect();
        write!(f, "{}", rdns.join(", "))
    }
}

/// Split on `sep` where it is not preceded by a backslash. Escapes are kept.
fn split_unescaped(text: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            current.push(c);
            if let Some(escaped) = chars.next() {
                current.push(escaped);
            }
        } else if c == sep {
            parts.push(core::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            _ => out.push(c),
        }
    }
    out
}

fn attribute_oid(name: &str) -> Result<ObjectIdentifier, crate::error::Error> {
    if let Some((_, oid)) = SHORT_NAMES
        .iter()
        .find(|(short, _)| short.eq_ignore_ascii_case(name))
    {
        return Ok(*oid);
    }

    let dotted = name
        .strip_prefix("OID.")
        .or_else(|| name.strip_prefix("oid."))
        .unwrap_or(name);
    if dotted.starts_with(|c: char| c.is_ascii_digit()) {
        return ObjectIdentifier::new(dotted)
            .map_err(|_| crate::error::Error::invalid_name(alloc::format!("bad OID '{}'", name)));
    }

    Err(crate::error::Error::NameError(
        NameError::UnknownAttributeType(name.to_string()),
    ))
}

/// Parses the RFC 4514 text form, most specific RDN first (`"CN=Leaf, O=Org, C=US"`).
impl FromStr for RDNSequence {
    type Err = crate::error::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }

        let mut rdns = Vec::new();
        for rdn_text in split_unescaped(text, ',') {
            let mut attrs = Vec::new();
            for attr_text in split_unescaped(&rdn_text, '+') {
                let (name, value) = attr_text.split_once('=').ok_or_else(|| {
                    crate::error::Error::invalid_name(alloc::format!(
                        "missing '=' in '{}'",
                        attr_text.trim()
                    ))
                })?;
                let oid = attribute_oid(name.trim())?;
                attrs.push(AttributeTypeAndValue::from_text(oid, &unescape(value.trim()))?);
            }
            rdns.push(RelativeDistinguishedName::from_attributes(attrs)?);
        }

        rdns.reverse();
        Ok(Self { rdns })
    }
}

/// Type alias for Name (which is just RDNSequence in practice).
pub type Name = RDNSequence;

// ============================================================================
// GeneralName - RFC 5280 Section 4.2.1.6
// ============================================================================

/// GeneralName represents the tagged identity forms of RFC 5280.
///
/// Directory names keep their encoded `Name` octets; they are decoded on
/// demand so that one malformed entry does not invalidate the whole list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralName {
    /// otherName `[0]`
    OtherName(Vec<u8>),
    /// rfc822Name `[1]` - Email address
    Rfc822Name(String),
    /// dNSName `[2]` - DNS hostname
    DnsName(String),
    /// x400Address `[3]`
    X400Address(Vec<u8>),
    /// directoryName `[4]` - encoded Distinguished Name
    DirectoryName(Vec<u8>),
    /// ediPartyName `[5]`
    EdiPartyName(Vec<u8>),
    /// uniformResourceIdentifier `[6]` - URI
    Uri(String),
    /// iPAddress `[7]` - IPv4 or IPv6 address
    IpAddress(Vec<u8>),
    /// registeredID `[8]` - OID
    RegisteredId(ObjectIdentifier),
}

impl GeneralName {
    /// Directory-name general name wrapping `name`.
    pub fn directory_name(name: &Name) -> Result<Self, Error> {
        Ok(GeneralName::DirectoryName(name.to_der()?))
    }

    /// The context-specific tag number of this form.
    pub fn tag_number(&self) -> TagNumber {
        match self {
            GeneralName::OtherName(_) => TagNumber::N0,
            GeneralName::Rfc822Name(_) => TagNumber::N1,
            GeneralName::DnsName(_) => TagNumber::N2,
            GeneralName::X400Address(_) => TagNumber::N3,
            GeneralName::DirectoryName(_) => TagNumber::N4,
            GeneralName::EdiPartyName(_) => TagNumber::N5,
            GeneralName::Uri(_) => TagNumber::N6,
            GeneralName::IpAddress(_) => TagNumber::N7,
            GeneralName::RegisteredId(_) => TagNumber::N8,
        }
    }

    /// Decode a directory-name entry.
    ///
    /// `None` for every other form; `Some(Err(_))` when the stored octets
    /// are not a well-formed Name.
    pub fn decode_directory_name(&self) -> Option<Result<Name, Error>> {
        match self {
            GeneralName::DirectoryName(encoded) => Some(Name::from_der(encoded)),
            _ => None,
        }
    }

    fn ip_address_string(bytes: &[u8]) -> Option<String> {
        match bytes.len() {
            4 => Some(alloc::format!(
                "{}.{}.{}.{}",
                bytes[0],
                bytes[1],
                bytes[2],
                bytes[3]
            )),
            16 => {
                let groups: Vec<String> = bytes
                    .chunks(2)
                    .map(|c| alloc::format!("{:x}", u16::from_be_bytes([c[0], c[1]])))
                    .collect();
                Some(groups.join(":"))
            }
            _ => None,
        }
    }
}

impl<'a> DecodeValue<'a> for GeneralName {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let tag = header.tag;

        if !tag.is_context_specific() {
            return Err(ErrorKind::TagUnexpected {
                expected: None,
                actual: tag,
            }
            .into());
        }

        let bytes = reader.read_vec(header.length)?;
        let text = |bytes: Vec<u8>| String::from_utf8(bytes).map_err(|_| ErrorKind::Value { tag });

        let name = match tag.number() {
            TagNumber::N0 => GeneralName::OtherName(bytes),
            TagNumber::N1 => GeneralName::Rfc822Name(text(bytes)?),
            TagNumber::N2 => GeneralName::DnsName(text(bytes)?),
            TagNumber::N3 => GeneralName::X400Address(bytes),
            // EXPLICIT [4] Name: the content octets are the Name TLV.
            TagNumber::N4 => GeneralName::DirectoryName(bytes),
            TagNumber::N5 => GeneralName::EdiPartyName(bytes),
            TagNumber::N6 => GeneralName::Uri(text(bytes)?),
            TagNumber::N7 => GeneralName::IpAddress(bytes),
            TagNumber::N8 => ObjectIdentifier::from_bytes(&bytes)
                .map(GeneralName::RegisteredId)
                .map_err(|_| Error::from(ErrorKind::Value { tag }))?,
            _ => {
                return Err(ErrorKind::TagUnexpected {
                    expected: None,
                    actual: tag,
                }
                .into())
            }
        };

        // The constructed bit must be the one this form is encoded with.
        if name.tag() != tag {
            return Err(ErrorKind::TagUnexpected {
                expected: Some(name.tag()),
                actual: tag,
            }
            .into());
        }
        Ok(name)
    }
}

impl EncodeValue for GeneralName {
    fn value_len(&self) -> der::Result<Length> {
        match self {
            GeneralName::OtherName(bytes)
            | GeneralName::X400Address(bytes)
            | GeneralName::DirectoryName(bytes)
            | GeneralName::EdiPartyName(bytes)
            | GeneralName::IpAddress(bytes) => bytes.len().try_into(),
            GeneralName::Rfc822Name(s) | GeneralName::DnsName(s) | GeneralName::Uri(s) => {
                s.len().try_into()
            }
            GeneralName::RegisteredId(oid) => oid.as_bytes().len().try_into(),
        }
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        match self {
            GeneralName::OtherName(bytes)
            | GeneralName::X400Address(bytes)
            | GeneralName::DirectoryName(bytes)
            | GeneralName::EdiPartyName(bytes)
            | GeneralName::IpAddress(bytes) => writer.write(bytes),
            GeneralName::Rfc822Name(s) | GeneralName::DnsName(s) | GeneralName::Uri(s) => {
                writer.write(s.as_bytes())
            }
            GeneralName::RegisteredId(oid) => writer.write(oid.as_bytes()),
        }
    }
}

impl Tagged for GeneralName {
    fn tag(&self) -> Tag {
        Tag::ContextSpecific {
            constructed: matches!(
                self,
                GeneralName::OtherName(_)
                    | GeneralName::X400Address(_)
                    | GeneralName::DirectoryName(_)
                    | GeneralName::EdiPartyName(_)
            ),
            number: self.tag_number(),
        }
    }
}

impl fmt::Display for GeneralName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneralName::OtherName(_) => write!(f, "otherName:<unsupported>"),
            GeneralName::Rfc822Name(email) => write!(f, "email:{}", email),
            GeneralName::DnsName(dns) => write!(f, "DNS:{}", dns),
            GeneralName::X400Address(_) => write!(f, "X400:<unsupported>"),
            GeneralName::DirectoryName(_) => match self.decode_directory_name() {
                Some(Ok(name)) => write!(f, "DirName:{}", name),
                _ => write!(f, "DirName:<invalid>"),
            },
            GeneralName::EdiPartyName(_) => write!(f, "EDI:<unsupported>"),
            GeneralName::Uri(uri) => write!(f, "URI:{}", uri),
            GeneralName::IpAddress(bytes) => match GeneralName::ip_address_string(bytes) {
                Some(ip) => write!(f, "IP:{}", ip),
                None => write!(f, "IP:<invalid>"),
            },
            GeneralName::RegisteredId(oid) => write!(f, "RegID:{}", oid),
        }
    }
}

// ============================================================================
// GeneralNames - RFC 5280 Section 4.2.1.6
// ============================================================================

/// GeneralNames ::= SEQUENCE SIZE (1..MAX) OF GeneralName
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneralNames {
    /// Names in encoding order
    pub names: Vec<GeneralName>,
}

impl GeneralNames {
    /// Create a new GeneralNames.
    pub fn new(names: Vec<GeneralName>) -> Self {
        Self { names }
    }

    /// A list holding a single directory name.
    pub fn from_directory_name(name: &Name) -> Result<Self, Error> {
        Ok(Self::new(vec![GeneralName::directory_name(name)?]))
    }

    /// Get an iterator over the names.
    pub fn iter(&self) -> core::slice::Iter<'_, GeneralName> {
        self.names.iter()
    }

    /// Number of entries of any kind.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Every directory name that decodes, in list order.
    pub fn directory_names(&self) -> impl Iterator<Item = Name> + '_ {
        self.names
            .iter()
            .filter_map(|gn| match gn.decode_directory_name()? {
                Ok(name) => Some(name),
                Err(e) => {
                    log::debug!("skipping undecodable directory name: {}", e);
                    None
                }
            })
    }

    /// Whether any directory name in the list is equivalent to `name`.
    pub fn contains_directory_name(&self, name: &Name) -> bool {
        self.directory_names()
            .any(|candidate| candidate.equivalent(name))
    }
}

impl<'a> DecodeValue<'a> for GeneralNames {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let mut names = Vec::new();
            while !reader.is_finished() {
                let name_header = Header::decode(reader)?;
                names.push(GeneralName::decode_value(reader, name_header)?);
            }
            Ok(Self { names })
        })
    }
}

impl EncodeValue for GeneralNames {
    fn value_len(&self) -> der::Result<Length> {
        self.names
            .iter()
            .try_fold(Length::ZERO, |len, name| len + name.encoded_len()?)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        for name in &self.names {
            name.encode(writer)?;
        }
        Ok(())
    }
}

impl der::FixedTag for GeneralNames {
    const TAG: Tag = Tag::Sequence;
}

impl fmt::Display for GeneralNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.names.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

// ============================================================================
// Tests
// ============================================================================
