//! Client for the ORCID public API.
//!
//! ORCID is the identity provider: given a researcher iD it returns the set of
//! DOIs attached to the researcher's works and the researcher's display name.
//! Works without a DOI cannot be resolved downstream and are skipped with a
//! warning; a malformed work entry never aborts the listing.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

lazy_static! {
    /// Compiled regex for validating ORCID iDs (XXXX-XXXX-XXXX-XXXX, last
    /// character may be the checksum 'X').
    static ref ORCID_ID_REGEX: Regex =
        Regex::new("^[0-9]{4}-[0-9]{4}-[0-9]{4}-[0-9]{3}[0-9X]$").expect("ORCID_ID_REGEX failed to compile");
}

/// Returns true if the candidate string has the shape of an ORCID iD.
pub fn is_orcid_id(candidate: &str) -> bool {
    ORCID_ID_REGEX.is_match(candidate)
}

#[derive(Error, Debug)]
pub enum OrcidError {
    #[error("request error")]
    Request(#[from] reqwest::Error),
    #[error("serde_json error")]
    SerdeJson(#[from] serde_json::Error),
    #[error("'{0}' is not a valid ORCID iD")]
    InvalidId(String),
    #[error("record has no public name")]
    MissingName,
}

/// A researcher's public name as recorded on ORCID.
#[derive(Debug, Clone)]
pub struct ResearcherName {
    pub given: String,
    pub family: String,
}

impl ResearcherName {
    /// The full display form, `Given Family`.
    pub fn display(&self) -> String {
        format!("{} {}", self.given, self.family)
    }

    /// The family-name token used by self-citation matching.
    pub fn surname(&self) -> &str {
        &self.family
    }
}

#[derive(Deserialize, Debug)]
struct PersonResponse {
    name: Option<PersonName>,
}

#[derive(Deserialize, Debug)]
struct PersonName {
    #[serde(rename = "given-names")]
    given_names: Option<NameValue>,
    #[serde(rename = "family-name")]
    family_name: Option<NameValue>,
}

#[derive(Deserialize, Debug)]
struct NameValue {
    value: String,
}

#[derive(Deserialize, Debug)]
struct WorksResponse {
    #[serde(default)]
    group: Vec<WorkGroup>,
}

#[derive(Deserialize, Debug)]
struct WorkGroup {
    #[serde(rename = "work-summary", default)]
    work_summary: Vec<WorkSummary>,
}

#[derive(Deserialize, Debug)]
struct WorkSummary {
    #[serde(rename = "external-ids")]
    external_ids: Option<ExternalIds>,
    title: Option<WorkTitle>,
}

#[derive(Deserialize, Debug)]
struct ExternalIds {
    #[serde(rename = "external-id", default)]
    external_id: Vec<ExternalId>,
}

#[derive(Deserialize, Debug)]
struct ExternalId {
    #[serde(rename = "external-id-type")]
    id_type: String,
    #[serde(rename = "external-id-value")]
    id_value: String,
}

#[derive(Deserialize, Debug)]
struct WorkTitle {
    title: Option<NameValue>,
}

impl WorkSummary {
    /// The first DOI attached to this work, if any.
    fn doi(&self) -> Option<&str> {
        self.external_ids
            .as_ref()?
            .external_id
            .iter()
            .find(|id| id.id_type.eq_ignore_ascii_case("doi"))
            .map(|id| id.id_value.as_str())
    }

    fn title(&self) -> Option<&str> {
        Some(self.title.as_ref()?.title.as_ref()?.value.as_str())
    }
}

/// Retrieves the researcher's work DOIs and public name from ORCID.
///
/// Each work group on ORCID carries one or more provider summaries of the same
/// work; the first summary with a DOI wins. Groups without any DOI are logged
/// and skipped since the bibliographic provider cannot resolve them.
///
/// # Arguments
///
/// * `client`: The `reqwest::Client` to use for requests.
/// * `researcher_id`: The ORCID iD, e.g. `0000-0002-5074-7183`.
///
/// # Returns
///
/// A `Result` containing the deduplicated DOI list and the researcher's name,
/// or an `OrcidError`.
pub async fn fetch_identifier_list(
    client: &reqwest::Client,
    researcher_id: &str,
) -> Result<(Vec<String>, ResearcherName), OrcidError> {
    if !is_orcid_id(researcher_id) {
        return Err(OrcidError::InvalidId(researcher_id.to_owned()));
    }

    let name = fetch_researcher_name(client, researcher_id).await?;

    let works: WorksResponse = client
        .get(format!("https://pub.orcid.org/v3.0/{researcher_id}/works"))
        .header("Accept", "application/json")
        .send()
        .await?
        .json()
        .await?;

    let mut dois = Vec::<String>::with_capacity(works.group.len());
    for group in &works.group {
        let Some(doi) = group.work_summary.iter().find_map(|summary| summary.doi()) else {
            let title = group
                .work_summary
                .first()
                .and_then(|summary| summary.title())
                .unwrap_or("<untitled>");
            log::warn!("work {title:?} has no DOI, skipping");
            continue;
        };

        // Several provider summaries of one work can repeat the same DOI,
        // and distinct groups occasionally do too.
        if !dois.iter().any(|existing| existing == doi) {
            dois.push(doi.to_owned());
        }
    }

    Ok((dois, name))
}

/// Retrieves the researcher's public name from the ORCID person endpoint.
pub async fn fetch_researcher_name(
    client: &reqwest::Client,
    researcher_id: &str,
) -> Result<ResearcherName, OrcidError> {
    let person: PersonResponse = client
        .get(format!("https://pub.orcid.org/v3.0/{researcher_id}/person"))
        .header("Accept", "application/json")
        .send()
        .await?
        .json()
        .await?;

    let name = person.name.ok_or(OrcidError::MissingName)?;
    let family = name.family_name.ok_or(OrcidError::MissingName)?.value;
    let given = name.given_names.map(|n| n.value).unwrap_or_default();

    Ok(ResearcherName { given, family })
}
