//! Self-citation attribution.
//!
//! A citation counts as a self-citation when the citing paper's first author
//! matches the target paper's author list. The match is approximated by the
//! researcher's family name: a single token checked as a substring of the
//! citer's first-author display string. This is deliberately permissive and
//! produces false positives on common surnames and some hyphenated names; it
//! is a documented approximation, not a defect. An earlier, stricter form
//! required the citer's full first-author string to appear verbatim in the
//! target's author list and missed most real self-citations over name-format
//! differences between providers.

/// Decides whether a citing record is a self-citation of the target paper.
///
/// The target's author list is consulted defensively: when the researcher's
/// surname does not appear among the target's authors at all (a mismatched
/// provider record), nothing is attributed.
pub fn is_self_citation(
    citer_first_author: &str,
    paper_authors: &[String],
    researcher_surname: &str,
) -> bool {
    if researcher_surname.is_empty() {
        return false;
    }

    let surname_on_paper = paper_authors
        .iter()
        .any(|author| author.contains(researcher_surname));

    surname_on_paper && citer_first_author.contains(researcher_surname)
}
