//! Client for the NASA ADS search API.
//!
//! ADS is the bibliographic provider: given a DOI it resolves the publication
//! record (metadata plus the list of citing bibcodes), and given a list of
//! citing bibcodes it resolves each citer's publication date and first author.
//! All requests carry a static bearer token.

pub mod bibcode;
pub mod error;
pub mod record;
pub mod request;

use bibcode::Bibcode;
use error::AdsError;
use record::{AdsDoc, CiterRecord, SearchResponse};
use request::request_and_parse;

/// Fields requested when resolving a publication by DOI.
const PUBLICATION_FIELDS: &[&str] = &[
    "bibcode",
    "title",
    "author",
    "pubdate",
    "citation_count",
    "pub",
    "volume",
    "page",
    "citation",
];

/// Fields requested when resolving citing works.
const CITER_FIELDS: &[&str] = &["bibcode", "first_author", "pubdate"];

/// GET query strings have a practical length limit, so citer lookups are
/// chunked well below the POST limit the API allows.
const CITER_CHUNK_SIZE: usize = 50;

/// Resolves a publication record from its DOI.
///
/// # Arguments
///
/// * `client`: The `reqwest::Client` to use for requests.
/// * `token`: The ADS API bearer token.
/// * `doi`: The DOI to resolve.
///
/// # Returns
///
/// A `Result` containing the matching `AdsDoc`, or `AdsError::UnresolvedDoi`
/// when ADS has no document for the DOI.
pub async fn fetch_publication(
    client: &reqwest::Client,
    token: &str,
    doi: &str,
) -> Result<AdsDoc, AdsError> {
    let query = format!("doi:\"{}\"", doi.trim());
    let parsed: SearchResponse =
        request_and_parse(client, token, &query, PUBLICATION_FIELDS, 1).await?;

    parsed
        .response
        .docs
        .into_iter()
        .next()
        .ok_or_else(|| AdsError::UnresolvedDoi(doi.to_owned()))
}

/// Resolves the publication date and first author of a list of citing works.
///
/// Requests are chunked to keep query strings within limits, and the chunks are
/// fetched concurrently. Citers that ADS no longer resolves are simply absent
/// from the result; the caller must treat the returned list as a lower bound
/// on the authoritative citation count.
///
/// # Arguments
///
/// * `client`: The `reqwest::Client` to use for requests.
/// * `token`: The ADS API bearer token.
/// * `bibcodes`: The bibcodes of the citing works.
///
/// # Returns
///
/// A `Result` containing one `CiterRecord` per resolved citer, or an `AdsError`.
pub async fn fetch_citers(
    client: &reqwest::Client,
    token: &str,
    bibcodes: &[Bibcode],
) -> Result<Vec<CiterRecord>, AdsError> {
    if bibcodes.is_empty() {
        return Ok(Vec::new());
    }

    let records = futures::future::join_all(
        bibcodes
            .chunks(CITER_CHUNK_SIZE)
            .map(|chunk| fetch_citers_chunk(client, token, chunk)),
    )
    .await
    .into_iter()
    .collect::<Result<Vec<_>, AdsError>>()?
    .into_iter()
    .flatten()
    .collect::<Vec<_>>();

    Ok(records)
}

/// Resolves a single chunk of citing works.
async fn fetch_citers_chunk(
    client: &reqwest::Client,
    token: &str,
    bibcodes: &[Bibcode],
) -> Result<Vec<CiterRecord>, AdsError> {
    let terms = bibcodes
        .iter()
        .map(|b| format!("\"{}\"", b.as_ref()))
        .collect::<Vec<_>>()
        .join(" OR ");
    let query = format!("bibcode:({terms})");

    let parsed: SearchResponse =
        request_and_parse(client, token, &query, CITER_FIELDS, bibcodes.len()).await?;

    Ok(parsed
        .response
        .docs
        .into_iter()
        .map(CiterRecord::from)
        .collect())
}
