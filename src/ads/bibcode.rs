//! Defines a custom type for ADS bibcodes and associated parsing/validation logic.

use std::marker::PhantomData;

use arrayvec::ArrayString;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur when parsing or validating an ADS bibcode string.
#[derive(Error, Debug)]
pub enum BibcodeError {
    /// The candidate string for a bibcode is not exactly 19 characters long.
    #[error("bibcode candidate string is not 19 characters long")]
    Not19Characters,
    /// The first four characters do not form a plausible publication year.
    #[error("bibcode does not start with a four-digit year")]
    InvalidYear,
}

/// A validated ADS bibcode (`YYYYJJJJJVVVVMPPPPA`).
///
/// Bibcodes are fixed-width 19-character identifiers, so they are stored inline
/// without heap allocation. The leading four characters encode the publication
/// year and are validated on construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bibcode {
    string: ArrayString<19>,
}

impl Serialize for Bibcode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.string.as_str())
    }
}

impl<'de> Deserialize<'de> for Bibcode {
    /// Deserializes a string value into a validated `Bibcode`.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let visitor = BibcodeVisitor(PhantomData);
        deserializer.deserialize_str(visitor)
    }
}

/// A visitor for deserializing a string into a `Bibcode`.
struct BibcodeVisitor(PhantomData<fn() -> Bibcode>);
impl Visitor<'_> for BibcodeVisitor {
    type Value = Bibcode;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(formatter, "a 19-character ADS bibcode string")
    }

    fn visit_str<E>(self, bibcode_str: &str) -> Result<Bibcode, E>
    where
        E: de::Error,
    {
        Bibcode::try_from(bibcode_str)
            .map_err(|e| de::Error::custom(format!("invalid bibcode: {e}")))
    }
}

impl TryFrom<&str> for Bibcode {
    type Error = BibcodeError;
    /// Attempts to create a `Bibcode` from a string slice.
    ///
    /// Validates that the string is 19 characters long and starts with a
    /// four-digit year.
    fn try_from(bibcode_str: &str) -> Result<Self, Self::Error> {
        if bibcode_str.chars().count() != 19 {
            return Err(BibcodeError::Not19Characters);
        }

        if !bibcode_str.chars().take(4).all(|c| c.is_ascii_digit()) {
            return Err(BibcodeError::InvalidYear);
        }

        Ok(Bibcode {
            string: ArrayString::from(bibcode_str).map_err(|_| BibcodeError::Not19Characters)?,
        })
    }
}

impl AsRef<str> for Bibcode {
    fn as_ref(&self) -> &str {
        self.string.as_str()
    }
}

impl Bibcode {
    /// Returns the publication year encoded in the first four characters.
    pub fn year(&self) -> i32 {
        self.string
            .chars()
            .take(4)
            .filter_map(|c| c.to_digit(10))
            .fold(0, |acc, digit| acc * 10 + digit as i32)
    }
}

impl fmt::Display for Bibcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.string.as_str())
    }
}
