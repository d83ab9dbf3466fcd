//! Velocity and smoothing utilities for the derived series.

use crate::paper::Paper;

/// Default smoothing window used by the per-paper citation curves.
pub const DEFAULT_WINDOW: usize = 3;

/// Trailing simple moving average over a numeric sequence.
///
/// Computed by cumulative-sum differencing. The output has length
/// `series.len() - window + 1`; the first output element is the average of
/// `series[0..window]`. Returns an empty vector when the series is shorter
/// than the window or the window is zero.
pub fn moving_average(series: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || series.len() < window {
        return Vec::new();
    }

    let mut cumulative = Vec::with_capacity(series.len() + 1);
    cumulative.push(0.0);
    let mut running = 0.0;
    for value in series {
        running += value;
        cumulative.push(running);
    }

    (0..=series.len() - window)
        .map(|i| (cumulative[i + window] - cumulative[i]) / window as f64)
        .collect()
}

/// Citations per month of paper age.
///
/// Returns `None` for papers younger than one month, where the rate is
/// undefined (and would otherwise divide by a near-zero age).
pub fn citation_velocity(paper: &Paper, now_year: f64) -> Option<f64> {
    let age_in_months = paper.age_in_months(now_year);
    if age_in_months < 1.0 {
        return None;
    }

    Some(f64::from(paper.citation_count) / age_in_months)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_on_constant_sequences() {
        let series = [4.0, 4.0, 4.0, 4.0, 4.0];
        let smoothed = moving_average(&series, 3);
        assert_eq!(smoothed, vec![4.0, 4.0, 4.0]);
    }

    #[test]
    fn output_length_is_len_minus_window_plus_one() {
        let series = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(moving_average(&series, 3).len(), 2);
        assert_eq!(moving_average(&series, 4).len(), 1);
        assert_eq!(moving_average(&series, 5).len(), 0);
        assert_eq!(moving_average(&series, 0).len(), 0);
    }

    #[test]
    fn first_element_averages_the_first_window() {
        let series = [1.0, 2.0, 6.0, 10.0];
        let smoothed = moving_average(&series, 3);
        assert!((smoothed[0] - 3.0).abs() < 1e-12);
        assert!((smoothed[1] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn velocity_of_a_one_year_old_paper() {
        let mut paper = Paper::new("10.1000/a");
        paper.pub_year = 2020.0;
        paper.citation_count = 24;

        let velocity = citation_velocity(&paper, 2021.0).unwrap();
        assert!((velocity - 2.0).abs() < 1e-12);
    }

    #[test]
    fn velocity_undefined_under_one_month() {
        let mut paper = Paper::new("10.1000/a");
        paper.pub_year = 2021.0;
        paper.citation_count = 5;

        assert!(citation_velocity(&paper, 2021.0).is_none());
        // A hair under one month of age.
        assert!(citation_velocity(&paper, 2021.0 + 0.9 / 12.0).is_none());
        // Past one month the rate is defined.
        assert!(citation_velocity(&paper, 2021.0 + 1.5 / 12.0).is_some());
    }

    #[test]
    fn velocity_of_an_uncited_paper_is_zero() {
        let mut paper = Paper::new("10.1000/a");
        paper.pub_year = 2015.0;

        assert_eq!(citation_velocity(&paper, 2020.0), Some(0.0));
    }
}
