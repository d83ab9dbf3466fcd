use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::bibcode::Bibcode;

/// Top-level envelope of an ADS search response.
#[derive(Deserialize, Debug)]
pub struct SearchResponse {
    pub response: SearchBody,
}

/// The body of an ADS search response.
#[derive(Deserialize, Debug)]
pub struct SearchBody {
    #[serde(rename = "numFound", default)]
    pub num_found: u32,
    pub docs: Vec<AdsDoc>,
}

/// Represents a document as returned by the ADS search API.
///
/// This struct mirrors the structure of the document objects in the ADS API
/// response. All fields are optional since the API only returns the fields
/// requested through `fl`, and some records are genuinely incomplete.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct AdsDoc {
    /// The ADS bibcode of the document.
    pub bibcode: Option<Bibcode>,
    /// The title variants of the document; the first element is canonical.
    pub title: Option<Vec<String>>,
    /// The full author list, in order.
    pub author: Option<Vec<String>>,
    /// The first author display string.
    pub first_author: Option<String>,
    /// The publication date as `YYYY-MM-DD`; day is usually `00`.
    pub pubdate: Option<String>,
    /// The number of citations ADS has recorded for this document.
    pub citation_count: Option<u32>,
    /// The publication venue (journal name).
    #[serde(rename = "pub")]
    pub venue: Option<String>,
    /// The volume within the venue.
    pub volume: Option<String>,
    /// The page range variants.
    pub page: Option<Vec<String>>,
    /// Bibcodes of the documents citing this one.
    ///
    /// Parsed leniently: entries that are not valid bibcodes are skipped
    /// so one malformed citer cannot fail the whole document.
    #[serde(default, deserialize_with = "deserialize_lenient_bibcodes")]
    pub citation: Option<Vec<Bibcode>>,
}

impl AdsDoc {
    /// Gets the publication date as a fractional year (`year + (month-1)/12`),
    /// if a parseable `pubdate` is present.
    ///
    /// ADS encodes an unknown month as `00`, which is treated as January,
    /// matching the fallback used for undated BibTeX records.
    pub fn fractional_pub_year(&self) -> Option<f64> {
        parse_pubdate(self.pubdate.as_deref()?)
    }

    /// Gets the publication date as a fractional year, falling back to the
    /// year encoded in the bibcode when `pubdate` is missing or unparseable.
    ///
    /// The bibcode only carries a year, so the fallback is pinned to January.
    pub fn pub_year_or_bibcode(&self) -> Option<f64> {
        self.fractional_pub_year()
            .or_else(|| self.bibcode.as_ref().map(|b| f64::from(b.year())))
    }
}

/// Parses an ADS `pubdate` string (`YYYY-MM-DD`) into a fractional year.
///
/// Returns `None` when the year is missing or unparseable. A missing or zero
/// month contributes nothing, i.e. the date is pinned to January.
pub fn parse_pubdate(pubdate: &str) -> Option<f64> {
    let mut parts = pubdate.split('-');

    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts
        .next()
        .and_then(|m| m.parse::<u32>().ok())
        .unwrap_or(0);

    Some(fractional_year(year, month))
}

/// Encodes a calendar year and 1-based month as a fractional year.
///
/// Month 0 (ADS's "unknown") and month 1 both map to the start of the year.
pub fn fractional_year(year: i32, month: u32) -> f64 {
    let month_offset = month.saturating_sub(1).min(11);
    f64::from(year) + f64::from(month_offset) / 12.0
}

/// Deserializes a list of bibcode strings, skipping invalid entries.
///
/// The ADS `citation` field occasionally carries bibcodes that fail validation
/// (deleted or merged records). Those are dropped with a debug log instead of
/// failing deserialization of the whole document.
fn deserialize_lenient_bibcodes<'de, D>(deserializer: D) -> Result<Option<Vec<Bibcode>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientBibcodesVisitor;

    impl<'de> Visitor<'de> for LenientBibcodesVisitor {
        type Value = Option<Vec<Bibcode>>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(formatter, "null or an array of bibcode strings")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct SeqVisitor;

            impl<'de> Visitor<'de> for SeqVisitor {
                type Value = Vec<Bibcode>;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    write!(formatter, "an array of bibcode strings")
                }

                fn visit_seq<V>(self, mut seq: V) -> Result<Self::Value, V::Error>
                where
                    V: SeqAccess<'de>,
                {
                    let mut out = Vec::new();
                    while let Some(value) = seq.next_element::<String>()? {
                        match Bibcode::try_from(value.as_str()) {
                            Ok(bibcode) => out.push(bibcode),
                            Err(e) => log::debug!("skipping invalid bibcode {value:?}: {e}"),
                        }
                    }
                    Ok(out)
                }
            }

            deserializer.deserialize_seq(SeqVisitor).map(Some)
        }
    }

    deserializer.deserialize_option(LenientBibcodesVisitor)
}

/// A citing work reduced to the two fields self-citation attribution needs.
#[derive(Debug, Clone)]
pub struct CiterRecord {
    /// The first author display string of the citing work.
    pub first_author: Option<String>,
    /// The citing work's publication date as a fractional year.
    pub pub_year: Option<f64>,
}

impl From<AdsDoc> for CiterRecord {
    fn from(doc: AdsDoc) -> Self {
        CiterRecord {
            pub_year: doc.fractional_pub_year(),
            first_author: doc.first_author,
        }
    }
}
