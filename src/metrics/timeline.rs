//! Citation timeline construction.
//!
//! All resolved citation events across the collection are merged into one
//! chronological series. Repeated simultaneous citations are valid and kept;
//! there is no deduplication.

use crate::paper::PaperCollection;

/// Flattens every citation event across every paper into one ascending
/// sequence of fractional-year timestamps.
pub fn build_timeline(papers: &PaperCollection) -> Vec<f64> {
    let mut timeline: Vec<f64> = papers
        .iter()
        .flat_map(|paper| paper.citation_events.iter().copied())
        .collect();
    timeline.sort_by(f64::total_cmp);
    timeline
}

/// The cumulative citation curve over a timeline: `y[i] = i`.
///
/// The range is sized from the resolved timeline, never from the
/// authoritative totals. When the provider reported more citations than
/// could be resolved to events, the curve is truncated to what resolved;
/// padding would misalign the two arrays.
pub fn cumulative_curve(timeline: &[f64], authoritative_total: u64) -> Vec<u64> {
    if authoritative_total > timeline.len() as u64 {
        log::warn!(
            "{authoritative_total} citations reported but only {} resolved, truncating the cumulative curve",
            timeline.len()
        );
    }
    (0..timeline.len() as u64).collect()
}

/// Bins the timeline onto a monthly grid and returns citations per month.
///
/// The grid runs from `start_year` to `now_year` in steps of one month; the
/// value at each grid point is the number of events that fell inside that
/// month. This is the histogram input for the citation-rate curve, usually
/// smoothed with a moving average before plotting.
pub fn citations_per_month(timeline: &[f64], start_year: f64, now_year: f64) -> (Vec<f64>, Vec<f64>) {
    let months = ((now_year - start_year) * 12.0).floor() as i64;
    if months < 0 {
        return (Vec::new(), Vec::new());
    }

    let grid: Vec<f64> = (0..=months)
        .map(|i| start_year + f64::from(i as i32) / 12.0)
        .collect();

    let mut counts = vec![0.0; grid.len()];
    for event in timeline {
        // Events before the grid accumulate into the first bin edge,
        // events past the end are outside the window.
        let offset = ((event - start_year) * 12.0).floor();
        if offset >= grid.len() as f64 {
            continue;
        }
        let index = offset.max(0.0) as usize;
        counts[index] += 1.0;
    }

    (grid, counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::{Paper, PaperCollection};

    fn paper_with_events(doi: &str, events: &[f64], citation_count: u32) -> Paper {
        let mut paper = Paper::new(doi);
        paper.citation_events = events.to_vec();
        paper.citation_count = citation_count;
        paper
    }

    #[test]
    fn timeline_flattens_and_sorts() {
        let collection = PaperCollection::from(vec![
            paper_with_events("10.1000/a", &[2011.0, 2010.0], 2),
            paper_with_events("10.1000/b", &[2010.5], 1),
        ]);

        assert_eq!(build_timeline(&collection), vec![2010.0, 2010.5, 2011.0]);
    }

    #[test]
    fn simultaneous_citations_are_kept() {
        let collection = PaperCollection::from(vec![
            paper_with_events("10.1000/a", &[2010.0, 2010.0], 2),
            paper_with_events("10.1000/b", &[2010.0], 1),
        ]);

        assert_eq!(build_timeline(&collection).len(), 3);
    }

    #[test]
    fn empty_collection_gives_empty_timeline() {
        assert!(build_timeline(&PaperCollection::new()).is_empty());
    }

    #[test]
    fn cumulative_curve_truncates_to_resolved_events() {
        let timeline = [2010.0, 2010.5, 2011.0];
        // Provider claims 5 citations but only 3 resolved.
        let curve = cumulative_curve(&timeline, 5);
        assert_eq!(curve, vec![0, 1, 2]);
    }

    #[test]
    fn monthly_bins_count_events() {
        let timeline = [2010.0, 2010.0 + 0.5 / 12.0, 2010.0 + 1.5 / 12.0];
        let (grid, counts) = citations_per_month(&timeline, 2010.0, 2010.5);

        assert_eq!(grid.len(), 7);
        assert_eq!(counts[0], 2.0);
        assert_eq!(counts[1], 1.0);
        assert_eq!(counts[2], 0.0);
    }

    #[test]
    fn inverted_window_gives_empty_grid() {
        let (grid, counts) = citations_per_month(&[2010.0], 2020.0, 2010.0);
        assert!(grid.is_empty());
        assert!(counts.is_empty());
    }
}
