//! The pure computation engine.
//!
//! Everything in this module tree operates on a fully populated
//! `PaperCollection` and an explicit `(start_year, now_year)` window; there
//! is no I/O and no ambient time state. A paper with zero resolved citation
//! events contributes additive identities to every series, so consumers need
//! no special cases for partial data.

pub mod hindex;
pub mod selfcite;
pub mod smoothing;
pub mod timeline;

use serde::Serialize;

use crate::paper::{Paper, PaperCollection};

/// A paper's smoothed cumulative citation curve against years since
/// publication.
#[derive(Serialize, Debug, Clone)]
pub struct PaperCurve {
    pub doi: String,
    /// Whether the researcher is the paper's first author (drives coloring).
    pub first_author_paper: bool,
    /// Moving-averaged citation ages, in years since publication.
    pub years_since_publication: Vec<f64>,
    /// Cumulative citation count at each smoothed age.
    pub citations: Vec<u32>,
}

/// All derived series for one run, computed once and consumed immutably by
/// the report writer and any external chart renderer.
#[derive(Serialize, Debug, Clone)]
pub struct MetricsBundle {
    pub start_year: f64,
    pub now_year: f64,
    pub total_citations: u64,
    pub total_self_citations: u64,
    /// Every resolved citation event, ascending.
    pub timeline: Vec<f64>,
    /// Cumulative citation curve over `timeline` (`y[i] = i`), truncated to
    /// the resolved events.
    pub cumulative: Vec<u64>,
    /// Monthly grid matching `h_series`/`h5_series`, in fractional years.
    pub month_axis: Vec<f64>,
    pub h_series: Vec<u32>,
    pub h5_series: Vec<u32>,
    pub h_index: u32,
    pub h5_index: u32,
    /// Whole-career h-index slope, index points per year.
    pub long_term_slope: Option<f64>,
    /// Trailing three-year h-index slope; absent with under 37 months of
    /// history.
    pub short_term_slope: Option<f64>,
    pub paper_curves: Vec<PaperCurve>,
}

/// Derives every metric series from a populated collection.
///
/// # Arguments
///
/// * `papers`: The immutable paper collection.
/// * `start_year`: Start of the time axis as a fractional year.
/// * `now_year`: End of the time axis as a fractional year.
pub fn compute_metrics(papers: &PaperCollection, start_year: f64, now_year: f64) -> MetricsBundle {
    let total_citations: u64 = papers.iter().map(|p| u64::from(p.citation_count)).sum();
    let total_self_citations: u64 = papers
        .iter()
        .map(|p| u64::from(p.self_citation_count))
        .sum();

    let timeline = timeline::build_timeline(papers);
    let cumulative = timeline::cumulative_curve(&timeline, total_citations);

    let (h_series, h5_series) = hindex::compute_hindex_series(papers, start_year, now_year);
    let month_axis = (0..h_series.len())
        .map(|i| start_year + i as f64 / 12.0)
        .collect();

    let h_index = h_series.last().copied().unwrap_or(0);
    let h5_index = h5_series.last().copied().unwrap_or(0);

    let long_term_slope = hindex::long_term_slope(&h_series, start_year, now_year);
    let short_term_slope = match hindex::short_term_slope(&h_series) {
        Ok(slope) => Some(slope),
        Err(hindex::TrendError::InsufficientHistory) => {
            log::warn!("under 37 months of history, omitting the short-term trend");
            None
        }
    };

    let paper_curves = papers.iter().filter_map(paper_curve).collect();

    MetricsBundle {
        start_year,
        now_year,
        total_citations,
        total_self_citations,
        timeline,
        cumulative,
        month_axis,
        h_series,
        h5_series,
        h_index,
        h5_index,
        long_term_slope,
        short_term_slope,
        paper_curves,
    }
}

/// The smoothed "citations vs. years since publication" curve for one paper.
///
/// Needs more than two resolved events to produce a non-empty smoothed
/// curve; papers below that threshold are skipped, matching the plotting
/// guard of the unsmoothed data. The cumulative counts are sized from the
/// resolved events, not the authoritative count.
fn paper_curve(paper: &Paper) -> Option<PaperCurve> {
    if paper.citation_events.len() <= 2 {
        return None;
    }

    let mut ages: Vec<f64> = paper
        .citation_events
        .iter()
        .map(|event| event - paper.pub_year)
        .collect();
    ages.sort_by(f64::total_cmp);

    let years_since_publication = smoothing::moving_average(&ages, smoothing::DEFAULT_WINDOW);
    let citations: Vec<u32> = (1..=years_since_publication.len() as u32).collect();

    Some(PaperCurve {
        doi: paper.doi.clone(),
        first_author_paper: paper.first_author_paper,
        years_since_publication,
        citations,
    })
}

impl MetricsBundle {
    /// Writes the derived series as one JSON document for an external chart
    /// renderer. The core never depends on how they are plotted.
    pub fn write_series_json(&self, writer: impl std::io::Write) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(writer, self)
    }
}
