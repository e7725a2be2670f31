//! TF/DF counting and smoothed-IDF ranking over segmented documents.

use std::collections::{HashMap, HashSet};

use crate::normalize;
use crate::segment;

/// Ranked output is capped at this many terms.
pub const TOP_TERMS: usize = 50;

/// Per-term counters: total occurrences across the whole text (tf) and the
/// number of documents containing the term at least once (df).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TermStats {
    pub tf: u32,
    pub df: u32,
}

/// One ranked entry: term, raw frequency, smoothed inverse document frequency.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TermScore {
    pub term: String,
    pub tf: u32,
    pub idf: f64,
}

/// Result of one analysis pass: document count and ranked terms.
#[derive(Debug, serde::Serialize)]
pub struct Analysis {
    pub total_docs: usize,
    pub terms: Vec<TermScore>,
}

/// Count TF over the whole normalized text and DF over the documents.
///
/// TF counts repeats; DF counts presence, deduplicated within each document.
/// Both sides are derived from the same normalized text, so every term with
/// tf > 0 shows up in at least one document and df ends up > 0.
pub fn count(normalized: &str, documents: &[String]) -> HashMap<String, TermStats> {
    let mut stats: HashMap<String, TermStats> = HashMap::new();
    for word in normalized.split_whitespace() {
        stats.entry(word.to_string()).or_default().tf += 1;
    }
    for doc in documents {
        let unique: HashSet<&str> = doc.split_whitespace().collect();
        for word in unique {
            stats.entry(word.to_string()).or_default().df += 1;
        }
    }
    stats
}

/// Score and rank terms by `idf = ln(total_docs / (df + 1))`.
///
/// The `df + 1` keeps the quotient finite for every df: a term present in
/// all documents scores `ln(N/(N+1)) < 0` instead of zero-or-undefined. The
/// offset is part of the observable contract, not a knob to "correct" back
/// to the textbook formula. Sorted by idf descending; ties break on the term
/// ascending so the order is deterministic. At most [`TOP_TERMS`] entries.
pub fn rank(stats: HashMap<String, TermStats>, total_docs: usize) -> Vec<TermScore> {
    let mut scored: Vec<TermScore> = stats
        .into_iter()
        .map(|(term, s)| TermScore {
            idf: (total_docs as f64 / (f64::from(s.df) + 1.0)).ln(),
            term,
            tf: s.tf,
        })
        .collect();
    scored.sort_by(|a, b| {
        b.idf
            .partial_cmp(&a.idf)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.term.cmp(&b.term))
    });
    scored.truncate(TOP_TERMS);
    scored
}

/// Full pipeline: normalize, segment, count, rank.
///
/// Total over any input string. Text with no countable words (empty,
/// whitespace-only, or entirely outside the alphabet) yields one empty
/// document and an empty term list.
pub fn analyze(text: &str) -> Analysis {
    let normalized = normalize::normalize(text);
    let documents = segment::split_into_documents(&normalized);
    let stats = count(&normalized, &documents);
    let total_docs = documents.len();
    Analysis {
        total_docs,
        terms: rank(stats, total_docs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_of<'a>(analysis: &'a Analysis, term: &str) -> &'a TermScore {
        analysis
            .terms
            .iter()
            .find(|s| s.term == term)
            .unwrap_or_else(|| panic!("term {term:?} missing"))
    }

    #[test]
    fn two_documents_scenario() {
        // "cat" is in both documents, "dog" and "bird" in one each.
        let analysis = analyze("cat dog\n\ncat bird");
        assert_eq!(analysis.total_docs, 2);
        assert_eq!(analysis.terms.len(), 3);

        let cat = stats_of(&analysis, "cat");
        assert_eq!(cat.tf, 2);
        assert!((cat.idf - (2.0f64 / 3.0).ln()).abs() < 1e-12);

        let dog = stats_of(&analysis, "dog");
        assert_eq!(dog.tf, 1);
        assert_eq!(dog.idf, 0.0);
        assert_eq!(stats_of(&analysis, "bird").idf, 0.0);

        // dog/bird tie at the top, term-ascending; cat last.
        let order: Vec<&str> = analysis.terms.iter().map(|s| s.term.as_str()).collect();
        assert_eq!(order, vec!["bird", "dog", "cat"]);
    }

    #[test]
    fn single_document_scenario() {
        let analysis = analyze("hello world hello");
        assert_eq!(analysis.total_docs, 1);

        let hello = stats_of(&analysis, "hello");
        assert_eq!(hello.tf, 2);
        let world = stats_of(&analysis, "world");
        assert_eq!(world.tf, 1);

        // Both appear in the only document: idf = ln(1/2) for each.
        let expected = 0.5f64.ln();
        assert!((hello.idf - expected).abs() < 1e-12);
        assert!((world.idf - expected).abs() < 1e-12);
    }

    #[test]
    fn empty_input_yields_empty_ranking() {
        let analysis = analyze("");
        assert_eq!(analysis.total_docs, 1);
        assert!(analysis.terms.is_empty());

        let punct_only = analyze("?!... ---");
        assert!(punct_only.terms.is_empty());
    }

    #[test]
    fn output_capped_at_top_terms() {
        let text: String = (0..60).map(|i| format!("word{i:02} ")).collect();
        let analysis = analyze(&text);
        assert_eq!(analysis.terms.len(), TOP_TERMS);

        let few = analyze("a b c");
        assert_eq!(few.terms.len(), 3);
    }

    #[test]
    fn df_bounded_and_consistent_with_tf() {
        let normalized = normalize::normalize("Ant bee\n\nant ant cow\n\nbee ant");
        let docs = segment::split_into_documents(&normalized);
        let stats = count(&normalized, &docs);

        for (term, s) in &stats {
            assert!(s.df as usize <= docs.len(), "df out of range for {term}");
            assert!(s.tf > 0 && s.df > 0, "tf/df inconsistent for {term}");
            assert!(s.tf >= s.df, "tf below df for {term}");
        }
        assert_eq!(stats["ant"], TermStats { tf: 4, df: 3 });
        assert_eq!(stats["bee"], TermStats { tf: 2, df: 2 });
        assert_eq!(stats["cow"], TermStats { tf: 1, df: 1 });
    }

    #[test]
    fn repeats_inside_a_document_count_df_once() {
        let normalized = "spam spam spam".to_string();
        let docs = vec![normalized.clone()];
        let stats = count(&normalized, &docs);
        assert_eq!(stats["spam"], TermStats { tf: 3, df: 1 });
    }

    #[test]
    fn idf_strictly_decreases_in_df() {
        let mut stats = HashMap::new();
        for df in 0..5u32 {
            stats.insert(format!("t{df}"), TermStats { tf: 1, df });
        }
        let scored = rank(stats, 5);
        let idf_of = |term: &str| scored.iter().find(|s| s.term == term).unwrap().idf;
        for df in 0..4u32 {
            assert!(idf_of(&format!("t{df}")) > idf_of(&format!("t{}", df + 1)));
        }
        // Ranking already reflects that: t0 first, t4 last.
        assert_eq!(scored.first().unwrap().term, "t0");
        assert_eq!(scored.last().unwrap().term, "t4");
    }
}
