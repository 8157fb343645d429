//! FHIR date-time primitives.
//!
//! FHIR date primitives are kept in their raw lexical form and parsed on
//! demand. Clinical data is frequently incomplete or malformed, so a value
//! that does not parse degrades to `None` instead of erroring.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// A FHIR `dateTime`, `instant` or `date` primitive in raw string form.
///
/// The string is preserved exactly as supplied; [`FhirDateTime::to_utc`]
/// parses it lazily. Day-precision values (`YYYY-MM-DD`, e.g. birth dates)
/// resolve to midnight UTC.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FhirDateTime(String);

impl FhirDateTime {
    /// Wraps a raw lexical value without validating it.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw lexical form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the value into a UTC timestamp.
    ///
    /// Accepts RFC3339 timestamps and day-precision dates; anything else
    /// yields `None`.
    pub fn to_utc(&self) -> Option<OffsetDateTime> {
        parse_utc(&self.0)
    }
}

impl fmt::Display for FhirDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strict constructor: rejects values that would not parse.
impl FromStr for FhirDateTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        if parse_utc(s).is_none() {
            return Err(CoreError::invalid_date_time(s));
        }
        Ok(Self(s.to_string()))
    }
}

impl From<OffsetDateTime> for FhirDateTime {
    fn from(datetime: OffsetDateTime) -> Self {
        let formatted = datetime
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default();
        Self(formatted)
    }
}

fn parse_utc(raw: &str) -> Option<OffsetDateTime> {
    if let Ok(datetime) =
        OffsetDateTime::parse(raw, &time::format_description::well_known::Rfc3339)
    {
        return Some(datetime);
    }
    let date_only = format_description!("[year]-[month]-[day]");
    if let Ok(date) = Date::parse(raw, &date_only) {
        return Some(date.midnight().assume_utc());
    }
    None
}

/// A FHIR `Period` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Period {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<FhirDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<FhirDateTime>,
}

impl Period {
    /// Creates a period spanning `start..end`.
    pub fn new(start: Option<FhirDateTime>, end: Option<FhirDateTime>) -> Self {
        Self { start, end }
    }

    /// The representative timestamp of the period: the end if one is
    /// present, otherwise the start.
    pub fn date(&self) -> Option<OffsetDateTime> {
        match (&self.end, &self.start) {
            (Some(end), _) => end.to_utc(),
            (None, Some(start)) => start.to_utc(),
            (None, None) => None,
        }
    }

    /// The end timestamp, if present and parseable.
    pub fn end_date(&self) -> Option<OffsetDateTime> {
        self.end.as_ref()?.to_utc()
    }
}
