pub mod ads;
pub mod cache;
pub mod metrics;
pub mod orcid;
pub mod paper;
pub mod report;

use orcid::ResearcherName;
use paper::{Paper, PaperCollection};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("ads error")]
    Ads(#[from] ads::error::AdsError),
    #[error("orcid error")]
    Orcid(#[from] orcid::OrcidError),
    #[error("cache error")]
    Cache(#[from] cache::CacheError),
}

/// Builds a fresh paper collection from the live providers.
///
/// The researcher's DOI list comes from the identity provider; each DOI is
/// then resolved against the bibliographic provider and its citers fetched
/// and attributed. Recovery is local throughout: an unresolvable DOI, a
/// malformed record, or a failed citer lookup skips or degrades that one
/// paper with a warning and never aborts the run. Only identity-provider
/// failures are fatal, since without the work list there is nothing to do.
///
/// # Arguments
///
/// * `client`: The `reqwest::Client` shared across all requests.
/// * `token`: The ADS API bearer token.
/// * `researcher_id`: The ORCID iD of the researcher.
///
/// # Returns
///
/// A `Result` with the populated collection and the researcher's name.
pub async fn refresh_collection(
    client: &reqwest::Client,
    token: &str,
    researcher_id: &str,
) -> Result<(PaperCollection, ResearcherName), Error> {
    let (dois, name) = orcid::fetch_identifier_list(client, researcher_id).await?;
    log::info!("{} lists {} works with DOIs", name.display(), dois.len());

    let mut papers = PaperCollection::new();
    for doi in &dois {
        match resolve_paper(client, token, doi, &name).await {
            Ok(paper) => {
                papers.push(paper);
            }
            Err(e) => {
                log::warn!("skipping {doi}: {e}");
            }
        }
    }

    Ok((papers, name))
}

/// Resolves one DOI into a fully populated paper record.
///
/// Citer resolution failures degrade the record (authoritative count kept,
/// no events) instead of failing it.
async fn resolve_paper(
    client: &reqwest::Client,
    token: &str,
    doi: &str,
    name: &ResearcherName,
) -> Result<Paper, Error> {
    let doc = ads::fetch_publication(client, token, doi).await?;

    let mut paper = Paper::new(doi);
    paper.bibcode = doc.bibcode.clone();
    paper.titles = doc.title.clone().unwrap_or_default();
    paper.authors = doc.author.clone().unwrap_or_default();
    paper.citation_count = doc.citation_count.unwrap_or(0);
    paper.venue = doc.venue.clone();
    paper.volume = doc.volume.clone();
    paper.page = doc.page.as_ref().and_then(|p| p.first().cloned());
    paper.first_author_paper = paper
        .authors
        .first()
        .is_some_and(|author| author.contains(name.surname()));

    // Falls back to the year in the bibcode when pubdate is absent.
    match doc.pub_year_or_bibcode() {
        Some(year) => paper.pub_year = year,
        None => log::warn!("{doi} has no usable publication date"),
    }

    let citing_bibcodes = doc.citation.unwrap_or_default();
    match ads::fetch_citers(client, token, &citing_bibcodes).await {
        Ok(citers) => attach_citers(&mut paper, &citers, name.surname()),
        Err(e) => log::warn!("citer lookup failed for {doi}, keeping counts only: {e}"),
    }

    log::info!(
        "{doi}: {} citations, {} resolved, {} self",
        paper.citation_count,
        paper.citation_events.len(),
        paper.self_citation_count
    );

    Ok(paper)
}

/// Attaches resolved citer records to a paper: one citation event per dated
/// citer, plus self-citation attribution.
///
/// The authoritative count stays untouched and bounds the record on both
/// sides: a shortfall of resolved events is reported but not reconciled,
/// while citers beyond the reported count are dropped so
/// `citation_events` can never outgrow `citation_count`. Attribution is
/// capped the same way for `self_citation_count`.
fn attach_citers(paper: &mut Paper, citers: &[ads::record::CiterRecord], surname: &str) {
    let mut dropped = 0u32;
    for citer in citers {
        if let Some(year) = citer.pub_year {
            if (paper.citation_events.len() as u32) < paper.citation_count {
                paper.citation_events.push(year);
            } else {
                dropped += 1;
            }
        }

        let is_self = citer.first_author.as_deref().is_some_and(|first| {
            metrics::selfcite::is_self_citation(first, &paper.authors, surname)
        });
        if is_self && paper.self_citation_count < paper.citation_count {
            paper.self_citation_count += 1;
        }
    }

    if dropped > 0 {
        log::warn!(
            "{}: {} dated citers beyond the reported count of {}, dropping them",
            paper.doi,
            dropped,
            paper.citation_count
        );
    }
    if (paper.citation_events.len() as u32) < paper.citation_count {
        log::warn!(
            "{}: {} citations reported, {} resolved to events",
            paper.doi,
            paper.citation_count,
            paper.citation_events.len()
        );
    }
}
