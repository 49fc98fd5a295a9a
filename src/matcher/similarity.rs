use crate::config::MatcherConfig;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// How shared n-grams are counted.
///
/// `Occurrence` counts every gram of the left string that appears anywhere
/// in the right string, duplicates included, which inflates scores for
/// names with repeated substrings. It is the default because existing
/// match confidences were produced that way. `Set` is the plain Jaccard
/// index over distinct grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GramCounting {
    #[default]
    Occurrence,
    Set,
}

pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Character n-grams in order, duplicates kept. Empty when `s` is shorter
/// than `n`.
pub fn ngrams(s: &str, n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = s.chars().collect();
    chars.windows(n).map(|w| w.iter().collect()).collect()
}

/// N-gram overlap of two already-normalized strings, in `[0, 1]`.
pub fn ngram_similarity(a: &str, b: &str, n: usize, counting: GramCounting) -> f64 {
    let grams_a = ngrams(a, n);
    let grams_b = ngrams(b, n);
    if grams_a.is_empty() || grams_b.is_empty() {
        return 0.0;
    }

    let set_b: AHashSet<&str> = grams_b.iter().map(String::as_str).collect();

    let score = match counting {
        GramCounting::Occurrence => {
            let matches = grams_a
                .iter()
                .filter(|g| set_b.contains(g.as_str()))
                .count();
            // matches <= |grams_a|, so the denominator is at least |grams_b|
            let denominator = grams_a.len() + grams_b.len() - matches;
            matches as f64 / denominator as f64
        }
        GramCounting::Set => {
            let set_a: AHashSet<&str> = grams_a.iter().map(String::as_str).collect();
            let intersection = set_a.intersection(&set_b).count();
            let union = set_a.len() + set_b.len() - intersection;
            intersection as f64 / union as f64
        }
    };

    score.min(1.0)
}

/// Similarity between two store names.
///
/// Containment in either direction short-circuits to the configured
/// substring score; otherwise the n-gram overlap is used.
pub fn similarity(a: &str, b: &str, config: &MatcherConfig) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.contains(&b) || b.contains(&a) {
        return config.substring_score;
    }
    ngram_similarity(&a, &b, config.ngram_size, config.gram_counting)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ngrams() {
        assert_eq!(ngrams("abcd", 3), vec!["abc", "bcd"]);
        assert_eq!(ngrams("abc", 3), vec!["abc"]);
        assert!(ngrams("ab", 3).is_empty());
        assert!(ngrams("", 3).is_empty());
        assert!(ngrams("abc", 0).is_empty());
    }

    #[test]
    fn test_ngrams_are_char_based() {
        assert_eq!(ngrams("dún", 2), vec!["dú", "ún"]);
    }

    #[test]
    fn test_substring_scores_fixed_value() {
        let config = MatcherConfig::default();
        assert_eq!(similarity("Circle K Gallowshill", "circle k", &config), 0.8);
        assert_eq!(similarity("SPAR", "Spar Express Naas", &config), 0.8);
        assert_eq!(similarity("Tesco", "TESCO", &config), 0.8);
    }

    #[test]
    fn test_blank_names_score_zero() {
        let config = MatcherConfig::default();
        assert_eq!(similarity("", "Centra", &config), 0.0);
        assert_eq!(similarity("Centra", "   ", &config), 0.0);
    }

    #[test]
    fn test_occurrence_ngram_score() {
        // 9 grams vs 8 grams, 6 of the left grams found on the right
        let score = ngram_similarity("gallowshill", "gallowhill", 3, GramCounting::Occurrence);
        assert!(approx_eq(score, 6.0 / 11.0));
    }

    #[test]
    fn test_occurrence_counts_repeated_grams() {
        let occurrence = ngram_similarity("aaaaaz", "baaay", 3, GramCounting::Occurrence);
        let set = ngram_similarity("aaaaaz", "baaay", 3, GramCounting::Set);
        assert!(approx_eq(occurrence, 3.0 / 4.0));
        assert!(approx_eq(set, 1.0 / 4.0));
    }

    #[test]
    fn test_occurrence_score_is_clamped() {
        // three "aaa" grams against a single one would give 3.0 unclamped
        let score = ngram_similarity("aaaaa", "aaa", 3, GramCounting::Occurrence);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_unrelated_names_score_zero() {
        let config = MatcherConfig::default();
        assert_eq!(similarity("Applegreen Naas", "Topaz Cork", &config), 0.0);
    }

    #[test]
    fn test_short_names_without_grams() {
        let config = MatcherConfig::default();
        assert_eq!(similarity("ab", "xy", &config), 0.0);
    }
}
