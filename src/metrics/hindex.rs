//! The h-index/h5-index time-series engine.
//!
//! Both series are recomputed from scratch for every month in the window.
//! The per-month recomputation is deliberate: the strict-inequality
//! boundaries (`event < year`, `year - 5 < event`) and the rank scan are
//! load-bearing, and an incremental rewrite would have to reproduce them
//! exactly to be admissible.

use thiserror::Error;

use crate::paper::PaperCollection;

/// Number of h-index samples needed for the trailing three-year trend:
/// the current month plus 36 months of history.
const SHORT_TREND_SAMPLES: usize = 37;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TrendError {
    /// Fewer than 37 monthly samples exist; the trailing-window slope is
    /// undefined and the trend line must be omitted.
    #[error("fewer than {SHORT_TREND_SAMPLES} months of history")]
    InsufficientHistory,
}

/// Computes the h-index and h5-index as monthly time series.
///
/// For each month offset `i` from 0 to `floor((now - start) * 12) + 1`
/// inclusive, every paper's citation events are counted up to
/// `year = start + i/12` (strictly before), and within the trailing five-year
/// window (exclusive on both ends) for the h5 variant. The h-index at that
/// month is the largest rank `k` whose `k`-th most-cited paper has at least
/// `k` citations.
///
/// # Arguments
///
/// * `papers`: The paper collection; only the citation events are read and
///   paper order is irrelevant.
/// * `start_year`: Start of the time axis as a fractional year.
/// * `now_year`: End of the time axis as a fractional year.
///
/// # Returns
///
/// The `(h_series, h5_series)` pair; both are empty when `now_year`
/// precedes `start_year`.
pub fn compute_hindex_series(
    papers: &PaperCollection,
    start_year: f64,
    now_year: f64,
) -> (Vec<u32>, Vec<u32>) {
    let last_offset = ((now_year - start_year) * 12.0).floor() as i64 + 1;
    if last_offset < 0 {
        return (Vec::new(), Vec::new());
    }

    let mut h_series = Vec::with_capacity(last_offset as usize + 1);
    let mut h5_series = Vec::with_capacity(last_offset as usize + 1);

    for i in 0..=last_offset {
        let year = start_year + i as f64 / 12.0;

        let mut current_citations = Vec::with_capacity(papers.len());
        let mut current_short_citations = Vec::with_capacity(papers.len());
        for paper in papers {
            let events = &paper.citation_events;
            let citations = events.iter().filter(|&&e| e < year).count() as u32;
            let short_citations = events
                .iter()
                .filter(|&&e| e < year && e > year - 5.0)
                .count() as u32;
            current_citations.push(citations);
            current_short_citations.push(short_citations);
        }

        h_series.push(hindex_of(&mut current_citations));
        h5_series.push(hindex_of(&mut current_short_citations));
    }

    (h_series, h5_series)
}

/// The standard h-index of a set of per-paper citation counts.
///
/// Sorts descending and scans ranks 1..=n, stopping at the first rank whose
/// paper has fewer citations than the rank requires.
fn hindex_of(citation_counts: &mut [u32]) -> u32 {
    citation_counts.sort_unstable_by(|a, b| b.cmp(a));

    let mut h = 0;
    for (rank, &count) in citation_counts.iter().enumerate() {
        if (rank as u32) + 1 <= count {
            h += 1;
        } else {
            break;
        }
    }
    h
}

/// Slope of the whole-career h-index trend line, in index points per year.
///
/// Returns `None` for an empty series or a degenerate window.
pub fn long_term_slope(h_series: &[u32], start_year: f64, now_year: f64) -> Option<f64> {
    let last = *h_series.last()?;
    if now_year <= start_year {
        return None;
    }
    Some(f64::from(last) / (now_year - start_year))
}

/// Slope of the trailing three-year h-index trend, in index points per year.
///
/// Compares the current value against the one 36 months back; with fewer
/// than 37 samples the window would wrap and the slope is undefined.
pub fn short_term_slope(h_series: &[u32]) -> Result<f64, TrendError> {
    if h_series.len() < SHORT_TREND_SAMPLES {
        return Err(TrendError::InsufficientHistory);
    }

    let last = h_series[h_series.len() - 1];
    let three_years_back = h_series[h_series.len() - SHORT_TREND_SAMPLES];
    Ok((f64::from(last) - f64::from(three_years_back)) / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::Paper;

    fn collection(event_lists: &[&[f64]]) -> PaperCollection {
        let papers = event_lists
            .iter()
            .enumerate()
            .map(|(i, events)| {
                let mut paper = Paper::new(format!("10.1000/{i}"));
                paper.citation_events = events.to_vec();
                paper.citation_count = events.len() as u32;
                paper
            })
            .collect::<Vec<_>>();
        PaperCollection::from(papers)
    }

    #[test]
    fn hindex_of_ranked_counts() {
        assert_eq!(hindex_of(&mut [2, 1]), 1);
        assert_eq!(hindex_of(&mut [5, 4, 3, 2, 1]), 3);
        assert_eq!(hindex_of(&mut [10, 10, 10]), 3);
        assert_eq!(hindex_of(&mut [0, 0]), 0);
        assert_eq!(hindex_of(&mut []), 0);
    }

    #[test]
    fn two_paper_scenario() {
        // Paper A resolved [2010.0, 2010.5, 2011.0], paper B [2010.25].
        // At year 2010.6 the counts are [2, 1] and the h-index is 1.
        let papers = collection(&[&[2010.0, 2010.5, 2011.0], &[2010.25]]);
        let (h_series, _) = compute_hindex_series(&papers, 2010.6, 2010.6);

        assert_eq!(h_series[0], 1);
    }

    #[test]
    fn series_are_monotonically_non_decreasing() {
        let papers = collection(&[
            &[2008.0, 2009.5, 2010.0, 2012.25, 2013.0],
            &[2009.0, 2011.5],
            &[2010.75, 2012.0, 2014.5],
        ]);
        let (h_series, h5_series) = compute_hindex_series(&papers, 2007.0, 2015.0);

        for window in h_series.windows(2) {
            assert!(window[1] >= window[0]);
        }
        // h5 can decrease once citations age out of the five-year window,
        // but not in this short a span.
        assert!(!h5_series.is_empty());
    }

    #[test]
    fn h5_never_exceeds_h() {
        let papers = collection(&[
            &[2001.0, 2002.0, 2003.0, 2011.0],
            &[2001.5, 2002.5, 2012.0],
            &[2004.0, 2013.0, 2013.5],
        ]);
        let (h_series, h5_series) = compute_hindex_series(&papers, 2000.0, 2014.0);

        assert_eq!(h_series.len(), h5_series.len());
        for (h, h5) in h_series.iter().zip(h5_series.iter()) {
            assert!(h5 <= h);
        }
    }

    #[test]
    fn five_year_window_is_exclusive_on_both_ends() {
        // One event exactly five years before the probe month: outside the
        // window under the strict inequality.
        let papers = collection(&[&[2005.0]]);
        let (h_series, h5_series) = compute_hindex_series(&papers, 2010.0, 2010.0);

        assert_eq!(h_series[0], 1);
        assert_eq!(h5_series[0], 0);
    }

    #[test]
    fn empty_events_give_all_zero_series() {
        let papers = collection(&[&[], &[]]);
        let (h_series, h5_series) = compute_hindex_series(&papers, 2010.0, 2012.0);

        assert_eq!(h_series.len(), 26);
        assert!(h_series.iter().all(|&h| h == 0));
        assert!(h5_series.iter().all(|&h| h == 0));
    }

    #[test]
    fn series_length_covers_the_window_inclusive() {
        let papers = collection(&[]);
        let (h_series, _) = compute_hindex_series(&papers, 2010.0, 2011.0);
        // floor(12) + 1 offsets, inclusive of offset zero.
        assert_eq!(h_series.len(), 14);
    }

    #[test]
    fn inverted_window_gives_empty_series() {
        let papers = collection(&[&[2010.0]]);
        let (h_series, h5_series) = compute_hindex_series(&papers, 2015.0, 2010.0);
        assert!(h_series.is_empty());
        assert!(h5_series.is_empty());
    }

    #[test]
    fn long_term_slope_over_the_window() {
        let h_series = vec![0, 1, 2, 10];
        let slope = long_term_slope(&h_series, 2010.0, 2015.0).unwrap();
        assert!((slope - 2.0).abs() < 1e-12);

        assert!(long_term_slope(&[], 2010.0, 2015.0).is_none());
        assert!(long_term_slope(&h_series, 2015.0, 2015.0).is_none());
    }

    #[test]
    fn short_term_slope_requires_37_samples() {
        let mut h_series = vec![5u32; 36];
        assert_eq!(
            short_term_slope(&h_series),
            Err(TrendError::InsufficientHistory)
        );

        h_series.insert(0, 2);
        let slope = short_term_slope(&h_series).unwrap();
        assert!((slope - 1.0).abs() < 1e-12);
    }
}
