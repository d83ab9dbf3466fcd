//! Markdown report writer.
//!
//! Consumes the computed bundle and the paper list; it never feeds anything
//! back into the computation.

use std::io::Write;

use crate::metrics::MetricsBundle;
use crate::paper::{Paper, PaperCollection};

/// Author lists longer than this are truncated with `et al.`.
const MAX_LISTED_AUTHORS: usize = 10;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Writes the publication-list report.
///
/// Header lines carry the paper count, the first-author paper count, the
/// total citations rounded down to the nearest hundred, and the current
/// h-index; then one formatted entry per paper in display order (newest
/// first).
pub fn write_report(
    writer: &mut impl Write,
    papers: &PaperCollection,
    bundle: &MetricsBundle,
    researcher_name: &str,
    researcher_surname: &str,
) -> std::io::Result<()> {
    let first_author_papers = papers.iter().filter(|p| p.first_author_paper).count();

    writeln!(writer, "# Publications of {researcher_name}")?;
    writeln!(writer)?;
    writeln!(writer, "Number of papers: {}", papers.len())?;
    writeln!(writer, "Number of first-author papers: {first_author_papers}")?;
    writeln!(
        writer,
        "Total citations: more than {}",
        (bundle.total_citations / 100) * 100
    )?;
    writeln!(writer, "Current h-index: {}", bundle.h_index)?;
    writeln!(writer)?;

    for (ordinal, paper) in papers.sorted_for_display().iter().enumerate() {
        write_entry(writer, ordinal + 1, paper, researcher_surname)?;
    }

    Ok(())
}

/// Writes one formatted paper entry.
fn write_entry(
    writer: &mut impl Write,
    ordinal: usize,
    paper: &Paper,
    researcher_surname: &str,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "{ordinal}. {}",
        format_authors(&paper.authors, researcher_surname)
    )?;
    writeln!(writer, "   *{}*", paper.canonical_title())?;

    let mut venue_line = String::new();
    if let Some(venue) = &paper.venue {
        venue_line.push_str(venue);
    }
    if let Some(volume) = &paper.volume {
        venue_line.push_str(&format!(", {volume}"));
    }
    if let Some(page) = &paper.page {
        venue_line.push_str(&format!(", {page}"));
    }
    if !venue_line.is_empty() {
        writeln!(writer, "   {venue_line}")?;
    }

    writeln!(writer, "   {}", format_date(paper.pub_year))?;
    if paper.citation_count > 0 {
        writeln!(writer, "   Citations: {}", paper.citation_count)?;
    }
    writeln!(writer)?;

    Ok(())
}

/// Joins the author list, emphasizing the researcher's name and truncating
/// with `et al.` past the listing limit.
fn format_authors(authors: &[String], researcher_surname: &str) -> String {
    let mut formatted: Vec<String> = authors
        .iter()
        .take(MAX_LISTED_AUTHORS)
        .map(|author| {
            if !researcher_surname.is_empty() && author.contains(researcher_surname) {
                format!("**{author}**")
            } else {
                author.clone()
            }
        })
        .collect();

    if authors.len() > MAX_LISTED_AUTHORS {
        formatted.push("et al.".to_owned());
    }

    formatted.join("; ")
}

/// Formats a fractional year as `Month Year`.
fn format_date(pub_year: f64) -> String {
    let year = pub_year.floor();
    let month_index = (((pub_year - year) * 12.0).round() as usize).min(11);
    format!("{} {}", MONTH_NAMES[month_index], year as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;

    fn sample_paper() -> Paper {
        let mut paper = Paper::new("10.1000/a");
        paper.titles = vec!["An interesting result".to_owned()];
        paper.authors = vec!["Brinch, C.".to_owned(), "Smith, J.".to_owned()];
        paper.pub_year = 2010.0 + 2.0 / 12.0;
        paper.citation_count = 13;
        paper.citation_events = vec![2011.0, 2012.0];
        paper.venue = Some("Astronomy & Astrophysics".to_owned());
        paper.volume = Some("523".to_owned());
        paper.page = Some("A25".to_owned());
        paper.first_author_paper = true;
        paper
    }

    fn render(papers: &PaperCollection) -> String {
        let bundle = compute_metrics(papers, 2010.0, 2015.0);
        let mut buffer = Vec::new();
        write_report(&mut buffer, papers, &bundle, "Christian Brinch", "Brinch").unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn report_carries_the_header_counts() {
        let papers = PaperCollection::from(vec![sample_paper()]);
        let report = render(&papers);

        assert!(report.contains("Number of papers: 1"));
        assert!(report.contains("Number of first-author papers: 1"));
        // 13 rounds down to the nearest hundred.
        assert!(report.contains("Total citations: more than 0"));
        assert!(report.contains("Current h-index:"));
    }

    #[test]
    fn entry_formats_authors_title_and_date() {
        let papers = PaperCollection::from(vec![sample_paper()]);
        let report = render(&papers);

        assert!(report.contains("1. **Brinch, C.**; Smith, J."));
        assert!(report.contains("*An interesting result*"));
        assert!(report.contains("Astronomy & Astrophysics, 523, A25"));
        assert!(report.contains("March 2010"));
        assert!(report.contains("Citations: 13"));
    }

    #[test]
    fn zero_citations_entry_omits_the_count_line() {
        let mut paper = sample_paper();
        paper.citation_count = 0;
        paper.citation_events.clear();
        let papers = PaperCollection::from(vec![paper]);

        assert!(!render(&papers).contains("Citations:"));
    }

    #[test]
    fn long_author_lists_truncate_with_et_al() {
        let authors: Vec<String> = (0..12).map(|i| format!("Author, {i}")).collect();
        let formatted = format_authors(&authors, "Brinch");

        assert!(formatted.ends_with("et al."));
        assert_eq!(formatted.matches(';').count(), MAX_LISTED_AUTHORS);
    }

    #[test]
    fn rounding_down_to_the_nearest_hundred() {
        let mut paper = sample_paper();
        paper.citation_count = 438;
        let papers = PaperCollection::from(vec![paper]);

        assert!(render(&papers).contains("Total citations: more than 400"));
    }
}
