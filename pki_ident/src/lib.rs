// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! PKI Identity Resolution
//!
//! A no_std-compatible X.509 identity layer built on `der`. It turns byte
//! streams into certificates and resolves attribute-certificate issuer
//! references against them. Signatures are carried, never verified.
//!
//! # Features
//! - Decode certificate streams: DER or PEM, bare or inside PKCS#7 signed-data (`std`)
//! - Build and read certificate-only signed-data envelopes
//! - Arbitrary-precision serial numbers
//! - Distinguished-name comparison independent of the string encoding
//! - RFC 5755 `AttCertIssuer` matching and principal listing
//!
//! # Example
//! ```no_run
//! use der::Decode;
//! use pki_ident::acert::AttCertIssuer;
//! use pki_ident::stream::CertificateSource;
//!
//! # fn example(bundle: &[u8], issuer_der: &[u8]) -> pki_ident::Result<()> {
//! let issuer = AttCertIssuer::from_der(issuer_der)?;
//! for cert in CertificateSource::new(bundle).read_all()? {
//!     if issuer.matches(&cert) {
//!         println!("issued by {}", cert.subject());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod acert;
pub mod certificate;
pub mod envelope;
pub mod error;
#[cfg(feature = "std")]
pub mod stream;

#[cfg(test)]
mod testutil;

pub use acert::{AttCertIssuer, CertSelector};
pub use certificate::name::{GeneralName, GeneralNames, Name};
pub use certificate::Certificate;
pub use envelope::SignedData;
pub use error::{Error, Result};
#[cfg(feature = "std")]
pub use stream::{CertificateSource, ParserOptions};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::acert::{AttCertIssuer, CertSelector};
    pub use crate::certificate::name::Name;
    pub use crate::{Certificate, Error, Result};

    #[cfg(feature = "std")]
    pub use crate::stream::CertificateSource;
}
