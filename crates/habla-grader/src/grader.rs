use crate::normalize::{fold_accents, normalize, strip_leading_article};

/// Which check accepted the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Equal after lowercasing and trimming.
    Exact,
    /// Equal after removing a leading Spanish article from either side.
    ArticleStripped,
    /// Equal after additionally dropping accents.
    AccentFolded,
    /// One accent-folded string contains the other.
    Containment,
    /// Within the Levenshtein tolerance for the expected word's length.
    Fuzzy,
}

impl MatchRule {
    pub fn label(&self) -> &'static str {
        match self {
            MatchRule::Exact => "exact",
            MatchRule::ArticleStripped => "article_stripped",
            MatchRule::AccentFolded => "accent_folded",
            MatchRule::Containment => "containment",
            MatchRule::Fuzzy => "fuzzy",
        }
    }
}

/// Outcome of grading one spoken answer, with the normalized forms the
/// decision was made on (useful for diagnostics and tests).
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub matched: bool,
    pub rule: Option<MatchRule>,
    /// Spoken transcript after lowercasing, article stripping, and accent folding.
    pub spoken_folded: String,
    /// Expected word after the same normalization.
    pub expected_folded: String,
    /// Levenshtein distance between the folded forms (computed only when the
    /// fuzzy fallback was reached).
    pub distance: Option<usize>,
    /// Edit tolerance derived from the expected word's folded length.
    pub tolerance: usize,
}

/// Maximum edit distance still accepted: the larger of 2 edits or 20% of the
/// expected word's length, rounded down. The floor of 2 keeps short words
/// (1–3 letters) from getting near-zero tolerance.
pub fn tolerance_for(expected_folded: &str) -> usize {
    (expected_folded.chars().count() / 5).max(2)
}

/// Levenshtein edit distance over Unicode scalar values.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Grade a spoken transcript against the expected vocabulary word.
///
/// Checks run in order with the first success short-circuiting: exact match,
/// article-stripped match, accent-folded match, substring containment, then a
/// Levenshtein fallback within [`tolerance_for`]. An empty transcript never
/// matches.
///
/// Containment is deliberately loose: a short expected word embedded in an
/// unrelated longer utterance ("sol" inside "solo") counts as a match. That is
/// an accepted tolerance tradeoff for young speakers and noisy recognizers,
/// not a bug.
pub fn grade(spoken: &str, expected: &str) -> MatchReport {
    let spoken_norm = normalize(spoken);
    let expected_norm = normalize(expected);

    let spoken_stripped = strip_leading_article(&spoken_norm);
    let expected_stripped = strip_leading_article(&expected_norm);

    let spoken_folded = fold_accents(spoken_stripped);
    let expected_folded = fold_accents(expected_stripped);
    let tolerance = tolerance_for(&expected_folded);

    let mut report = MatchReport {
        matched: false,
        rule: None,
        spoken_folded,
        expected_folded,
        distance: None,
        tolerance,
    };

    // No vacuous match on an empty transcript.
    if spoken_norm.is_empty() {
        return report;
    }

    let rule = if spoken_norm == expected_norm {
        Some(MatchRule::Exact)
    } else if spoken_stripped == expected_stripped {
        Some(MatchRule::ArticleStripped)
    } else if report.spoken_folded == report.expected_folded {
        Some(MatchRule::AccentFolded)
    } else if report.spoken_folded.contains(&report.expected_folded)
        || report.expected_folded.contains(&report.spoken_folded)
    {
        Some(MatchRule::Containment)
    } else {
        let distance = edit_distance(&report.spoken_folded, &report.expected_folded);
        report.distance = Some(distance);
        (distance <= tolerance).then_some(MatchRule::Fuzzy)
    };

    report.matched = rule.is_some();
    report.rule = rule;
    report
}

/// `true` when the spoken transcript counts as a correct answer for the
/// expected word. Pure and deterministic; see [`grade`] for the rule order.
pub fn is_match(spoken: &str, expected: &str) -> bool {
    grade(spoken, expected).matched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflexive_after_normalization() {
        for word in ["perro", "gato", "biblioteca", "sol", "a"] {
            assert!(is_match(word, word), "{word} should match itself");
        }
    }

    #[test]
    fn test_empty_transcript_never_matches() {
        assert!(!is_match("", "cualquier"));
        assert!(!is_match("   ", "cualquier"));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert!(is_match("  PeRRo ", "perro"));
        let report = grade("  PeRRo ", "perro");
        assert_eq!(report.rule, Some(MatchRule::Exact));
    }

    #[test]
    fn test_leading_article_stripped() {
        assert!(is_match("el perro", "perro"));
        assert_eq!(
            grade("el perro", "perro").rule,
            Some(MatchRule::ArticleStripped)
        );
        // Both sides are stripped.
        assert!(is_match("perro", "el perro"));
        assert!(is_match("la casa", "una casa"));
    }

    #[test]
    fn test_trailing_article_not_stripped_matches_by_containment() {
        // Article stripping is leading-only, so "perro el" keeps its trailing
        // token. It still matches, but through containment, not stripping —
        // this pins the leading-only policy.
        let report = grade("perro el", "perro");
        assert!(report.matched);
        assert_eq!(report.rule, Some(MatchRule::Containment));
    }

    #[test]
    fn test_accent_insensitive() {
        assert!(is_match("celula", "célula"));
        assert_eq!(grade("celula", "célula").rule, Some(MatchRule::AccentFolded));
        assert!(is_match("canción", "cancion"));
        assert!(is_match("nino", "niño"));
    }

    #[test]
    fn test_containment_multiword_response() {
        assert!(is_match("un gato grande", "gato"));
        assert_eq!(
            grade("un gato grande", "gato").rule,
            Some(MatchRule::Containment)
        );
    }

    #[test]
    fn test_containment_partial_recognition() {
        // The recognizer cut off mid-word; the fragment is contained.
        assert!(is_match("bibliote", "biblioteca"));
    }

    #[test]
    fn test_containment_over_accepts_short_words() {
        // Documented tolerance tradeoff: "sol" inside "solo" matches.
        let report = grade("solo", "sol");
        assert!(report.matched);
        assert_eq!(report.rule, Some(MatchRule::Containment));
    }

    #[test]
    fn test_fuzzy_within_tolerance() {
        // "perro" vs "perros": distance 1, tolerance max(2, 6/5) = 2.
        assert!(is_match("perro", "perros"));
        // One substitution on a 10-letter word, tolerance max(2, 2) = 2.
        let report = grade("biblioteka", "biblioteca");
        assert!(report.matched);
        assert_eq!(report.rule, Some(MatchRule::Fuzzy));
        assert_eq!(report.distance, Some(1));
    }

    #[test]
    fn test_fuzzy_rejects_unrelated_word() {
        // distance("xyz", "casa") = 4 > tolerance max(2, 4/5) = 2.
        let report = grade("xyz", "casa");
        assert!(!report.matched);
        assert!(report.distance.unwrap() > report.tolerance);
    }

    #[test]
    fn test_end_to_end_biblioteca() {
        assert!(is_match("biblioteka", "biblioteca"));
        assert!(!is_match("libro", "biblioteca"));
    }

    #[test]
    fn test_tolerance_floor_for_short_words() {
        assert_eq!(tolerance_for("a"), 2);
        assert_eq!(tolerance_for("sol"), 2);
        assert_eq!(tolerance_for("perros"), 2);
        // 20% kicks in past 14 characters.
        assert_eq!(tolerance_for("quinceletters!!"), 3);
    }

    #[test]
    fn test_tolerance_floor_accepts_two_edits_on_short_word() {
        // "pan" -> "pon" is one substitution; "pes" -> "pez" likewise.
        assert!(is_match("pon", "pan"));
        assert!(is_match("pes", "pez"));
    }

    #[test]
    fn test_edit_distance_identity() {
        assert_eq!(edit_distance("perro", "perro"), 0);
        assert_eq!(edit_distance("", ""), 0);
    }

    #[test]
    fn test_edit_distance_symmetry() {
        for (a, b) in [("perro", "perros"), ("casa", "xyz"), ("", "gato")] {
            assert_eq!(edit_distance(a, b), edit_distance(b, a));
        }
    }

    #[test]
    fn test_edit_distance_upper_bound() {
        for (a, b) in [("perro", "gatos"), ("sol", "biblioteca"), ("", "casa")] {
            let max_len = a.chars().count().max(b.chars().count());
            assert!(edit_distance(a, b) <= max_len);
        }
    }

    #[test]
    fn test_report_carries_normalized_forms() {
        let report = grade("El Célula", "celula");
        assert_eq!(report.spoken_folded, "celula");
        assert_eq!(report.expected_folded, "celula");
    }

    #[test]
    fn test_no_match_reports_distance_and_tolerance() {
        let report = grade("manzana", "biblioteca");
        assert!(!report.matched);
        assert!(report.rule.is_none());
        assert_eq!(report.tolerance, 2);
        assert!(report.distance.is_some());
    }

    #[test]
    fn test_rule_labels() {
        assert_eq!(MatchRule::Exact.label(), "exact");
        assert_eq!(MatchRule::ArticleStripped.label(), "article_stripped");
        assert_eq!(MatchRule::AccentFolded.label(), "accent_folded");
        assert_eq!(MatchRule::Containment.label(), "containment");
        assert_eq!(MatchRule::Fuzzy.label(), "fuzzy");
    }
}
