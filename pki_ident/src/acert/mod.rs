// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Attribute certificate issuer resolution.
//!
//! An attribute certificate names its issuer indirectly, by distinguished
//! name or by the issuer's own public-key certificate (issuer name plus
//! serial number). This module decides which public-key certificates
//! satisfy such a reference.
//!
//! # Examples
//!
//! ```no_run
//! use pki_ident::acert::{AttCertIssuer, CertSelector};
//! use pki_ident::{Certificate, Name};
//!
//! # fn example(candidates: &[Certificate]) -> pki_ident::Result<()> {
//! let root: Name = "CN=Attribute Authority, O=Example".parse()?;
//! let issuer = AttCertIssuer::from_principal(&root)?;
//! for cert in issuer.select(candidates) {
//!     println!("issuer certificate: {}", cert.subject());
//! }
//! # Ok(())
//! # }
//! ```

mod issuer;

pub use issuer::{AttCertIssuer, IssuerSerial, ObjectDigestInfo, V2Form};

use alloc::vec::Vec;

use crate::certificate::Certificate;

/// A predicate over certificates.
pub trait CertSelector {
    /// Whether `cert` satisfies this selector. Never fails.
    fn matches(&self, cert: &Certificate) -> bool;

    /// The certificates of `certs` that satisfy this selector, in order.
    fn select<'c, I>(&self, certs: I) -> Vec<&'c Certificate>
    where
        I: IntoIterator<Item = &'c Certificate>,
        Self: Sized,
    {
        certs.into_iter().filter(|cert| self.matches(cert)).collect()
    }
}

impl CertSelector for AttCertIssuer {
    fn matches(&self, cert: &Certificate) -> bool {
        AttCertIssuer::matches(self, cert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use alloc::vec;

    #[test]
    fn test_select_keeps_order() {
        let issuer = AttCertIssuer::from_principal(&"CN=AA".parse().unwrap()).unwrap();
        let first = testutil::certificate("CN=AA", "CN=Root", 1);
        let other = testutil::certificate("CN=Other", "CN=Root", 2);
        let second = testutil::certificate("cn=aa", "CN=Root", 3);
        let certs = vec![first.clone(), other, second.clone()];

        assert_eq!(issuer.select(&certs), vec![&first, &second]);
    }

    #[test]
    fn test_selector_as_trait_object() {
        let issuer = AttCertIssuer::from_principal(&"CN=AA".parse().unwrap()).unwrap();
        let selector: &dyn CertSelector = &issuer;
        assert!(selector.matches(&testutil::certificate("CN=AA", "CN=Root", 1)));
    }
}
