// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate validity period.
//!
//! Validity is decoded and re-encoded only; this crate does not check it.
//! RFC 5280 mandates UTCTime for dates through 2049 and GeneralizedTime
//! from 2050 on.

use core::fmt;
use core::time::Duration;

use der::{
    asn1::{GeneralizedTime, UtcTime},
    Choice, DateTime, Sequence,
};

/// A timestamp that can be either UTCTime or GeneralizedTime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Choice)]
pub enum Time {
    /// UTCTime format (YYMMDDHHMMSSZ)
    #[asn1(type = "UTCTime")]
    UtcTime(UtcTime),

    /// GeneralizedTime format (YYYYMMDDHHMMSSZ)
    #[asn1(type = "GeneralizedTime")]
    GeneralizedTime(GeneralizedTime),
}

impl Time {
    /// Time for the given offset from the Unix epoch, in the encoding
    /// RFC 5280 prescribes for that year.
    pub fn from_unix_duration(duration: Duration) -> der::Result<Self> {
        let date_time = DateTime::from_unix_duration(duration)?;
        if date_time.year() < 2050 {
            Ok(Time::UtcTime(UtcTime::from_date_time(date_time)?))
        } else {
            Ok(Time::GeneralizedTime(GeneralizedTime::from_date_time(
                date_time,
            )))
        }
    }

    /// Calendar form of this time.
    pub fn to_date_time(&self) -> DateTime {
        match self {
            Time::UtcTime(utc) => utc.to_date_time(),
            Time::GeneralizedTime(gen) => gen.to_date_time(),
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_date_time())
    }
}

/// Validity ::= SEQUENCE { notBefore Time, notAfter Time }
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub struct Validity {
    /// Start of the validity period
    pub not_before: Time,
    /// End of the validity period
    pub not_after: Time,
}

impl Validity {
    /// Creates a new Validity period.
    pub const fn new(not_before: Time, not_after: Time) -> Self {
        Self {
            not_before,
            not_after,
        }
    }

    /// Validity between two offsets from the Unix epoch.
    pub fn from_unix_range(not_before: Duration, not_after: Duration) -> der::Result<Self> {
        Ok(Self::new(
            Time::from_unix_duration(not_before)?,
            Time::from_unix_duration(not_after)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::{Decode, Encode};

    const YEAR_2020: u64 = 1_577_836_800;
    const YEAR_2060: u64 = 2_840_140_800;

    #[test]
    fn test_time_encoding_by_year() {
        let early = Time::from_unix_duration(Duration::from_secs(YEAR_2020)).unwrap();
        assert!(matches!(early, Time::UtcTime(_)));

        let late = Time::from_unix_duration(Duration::from_secs(YEAR_2060)).unwrap();
        assert!(matches!(late, Time::GeneralizedTime(_)));
        assert_eq!(late.to_date_time().unix_duration(), Duration::from_secs(YEAR_2060));
    }

    #[test]
    fn test_validity_der() {
        let validity = Validity::from_unix_range(
            Duration::from_secs(YEAR_2020),
            Duration::from_secs(YEAR_2060),
        )
        .unwrap();

        let der = validity.to_der().unwrap();
        assert_eq!(der[0], 0x30);
        assert_eq!(Validity::from_der(&der).unwrap(), validity);
    }
}
