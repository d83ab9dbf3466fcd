use serde::{Deserialize, Serialize};

use crate::ads::bibcode::Bibcode;

/// A single publication belonging to the researcher, with its resolved
/// citation data attached.
///
/// `citation_count` is the authoritative count as reported by the
/// bibliographic provider at fetch time; `citation_events` holds one
/// fractional-year timestamp per citing work that could actually be resolved,
/// so its length is a lower bound on `citation_count`, never an upper one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Paper {
    /// The bibliographic-provider key, absent while the DOI is unresolved.
    pub bibcode: Option<Bibcode>,
    /// The DOI, unique within a researcher's collection.
    pub doi: String,
    /// Title variants returned by the provider; the first one is canonical.
    pub titles: Vec<String>,
    /// The ordered author list. The first author drives display emphasis.
    pub authors: Vec<String>,
    /// Publication date as a fractional year (`year + (month-1)/12`).
    pub pub_year: f64,
    /// Authoritative number of citations at fetch time.
    pub citation_count: u32,
    /// Number of citations attributed as self-citations.
    pub self_citation_count: u32,
    /// Fractional-year timestamps of the citations that resolved.
    pub citation_events: Vec<f64>,
    /// Journal or venue name, for the report.
    pub venue: Option<String>,
    /// Volume within the venue, for the report.
    pub volume: Option<String>,
    /// Page or page range, for the report.
    pub page: Option<String>,
    /// True when the researcher is the paper's first author.
    pub first_author_paper: bool,
}

impl Paper {
    /// Creates an empty record for a DOI, before provider data is attached.
    pub fn new(doi: impl Into<String>) -> Self {
        Paper {
            bibcode: None,
            doi: doi.into(),
            titles: Vec::new(),
            authors: Vec::new(),
            pub_year: 0.0,
            citation_count: 0,
            self_citation_count: 0,
            citation_events: Vec::new(),
            venue: None,
            volume: None,
            page: None,
            first_author_paper: false,
        }
    }

    /// The canonical (first) title, or an empty string when none resolved.
    pub fn canonical_title(&self) -> &str {
        self.titles.first().map(String::as_str).unwrap_or("")
    }

    /// Paper age in months at `now_year`, floored at zero.
    pub fn age_in_months(&self, now_year: f64) -> f64 {
        ((now_year - self.pub_year) * 12.0).max(0.0)
    }
}

/// The researcher's publication list, deduplicated by DOI.
///
/// Metric computation is order-independent; the sort helpers exist for
/// display only. The collection is treated as immutable once computation
/// begins.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PaperCollection(Vec<Paper>);

impl PaperCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a paper unless its DOI is already present.
    ///
    /// Returns false (and drops the paper) on a duplicate DOI.
    pub fn push(&mut self, paper: Paper) -> bool {
        if self.0.iter().any(|existing| existing.doi == paper.doi) {
            log::warn!("duplicate DOI {}, keeping the first record", paper.doi);
            return false;
        }
        self.0.push(paper);
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Paper> {
        self.0.iter()
    }

    /// Papers sorted by publication date, newest first.
    pub fn sorted_for_display(&self) -> Vec<&Paper> {
        let mut papers: Vec<&Paper> = self.0.iter().collect();
        papers.sort_by(|a, b| b.pub_year.total_cmp(&a.pub_year));
        papers
    }

    /// Papers sorted by citation count, most cited first.
    pub fn sorted_by_citations(&self) -> Vec<&Paper> {
        let mut papers: Vec<&Paper> = self.0.iter().collect();
        papers.sort_by(|a, b| b.citation_count.cmp(&a.citation_count));
        papers
    }

    /// Fractional year of the earliest publication, if any paper has a date.
    pub fn earliest_pub_year(&self) -> Option<f64> {
        self.0
            .iter()
            .map(|paper| paper.pub_year)
            .filter(|year| *year > 0.0)
            .min_by(f64::total_cmp)
    }
}

impl From<Vec<Paper>> for PaperCollection {
    fn from(papers: Vec<Paper>) -> Self {
        let mut collection = PaperCollection::new();
        for paper in papers {
            collection.push(paper);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a PaperCollection {
    type Item = &'a Paper;
    type IntoIter = std::slice::Iter<'a, Paper>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(doi: &str, pub_year: f64, citation_count: u32) -> Paper {
        Paper {
            pub_year,
            citation_count,
            ..Paper::new(doi)
        }
    }

    #[test]
    fn push_rejects_duplicate_doi() {
        let mut collection = PaperCollection::new();
        assert!(collection.push(paper("10.1000/a", 2010.0, 3)));
        assert!(!collection.push(paper("10.1000/a", 2011.0, 5)));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.iter().next().unwrap().citation_count, 3);
    }

    #[test]
    fn display_order_is_newest_first() {
        let collection = PaperCollection::from(vec![
            paper("10.1000/a", 2010.0, 0),
            paper("10.1000/b", 2015.5, 0),
            paper("10.1000/c", 2012.25, 0),
        ]);

        let order: Vec<&str> = collection
            .sorted_for_display()
            .iter()
            .map(|p| p.doi.as_str())
            .collect();
        assert_eq!(order, ["10.1000/b", "10.1000/c", "10.1000/a"]);
    }

    #[test]
    fn citation_order_is_most_cited_first() {
        let collection = PaperCollection::from(vec![
            paper("10.1000/a", 2010.0, 2),
            paper("10.1000/b", 2015.5, 40),
        ]);

        assert_eq!(collection.sorted_by_citations()[0].doi, "10.1000/b");
    }

    #[test]
    fn earliest_pub_year_skips_undated() {
        let collection = PaperCollection::from(vec![
            paper("10.1000/a", 0.0, 0),
            paper("10.1000/b", 2008.5, 0),
        ]);
        assert_eq!(collection.earliest_pub_year(), Some(2008.5));

        assert_eq!(PaperCollection::new().earliest_pub_year(), None);
    }

    #[test]
    fn age_in_months_is_floored_at_zero() {
        let p = paper("10.1000/a", 2020.0, 0);
        assert_eq!(p.age_in_months(2021.0), 12.0);
        assert_eq!(p.age_in_months(2019.0), 0.0);
    }
}
