use levenshtein::levenshtein;

/// A candidate title with its similarity to the query
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// The candidate title
    pub title: String,

    /// Similarity in percent (higher is better)
    pub score: f64,
}

/// Search configuration options
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum number of suggestions to return (default: 3)
    pub limit: usize,

    /// Minimum score a suggestion needs, 0-100 (default: 0.0)
    pub score_threshold: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 3,
            score_threshold: 0.0,
        }
    }
}

impl SearchOptions {
    /// Options returning at most `limit` suggestions
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }
}

/// Case-sensitive similarity of two strings in percent.
///
/// `100 * (1 - distance / longest)`, where lengths count characters rather
/// than bytes. Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 100.0;
    }

    let distance = levenshtein(a, b);
    100.0 * (1.0 - distance as f64 / longest as f64)
}

/// Rank `candidates` by similarity to `query`.
///
/// Returns at most `options.limit` suggestions, best first. Equal scores keep
/// the order in which the candidates were given.
pub fn suggest<I, S>(query: &str, candidates: I, options: &SearchOptions) -> Vec<Suggestion>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if options.limit == 0 {
        return Vec::new();
    }

    let mut results: Vec<Suggestion> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let candidate = candidate.as_ref();
            let score = similarity(query, candidate);
            if score < options.score_threshold {
                return None;
            }

            Some(Suggestion {
                title: candidate.to_string(),
                score,
            })
        })
        .collect();

    // Sort by score (descending), stable for ties
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    // Apply limit
    results.truncate(options.limit);

    log::debug!("{} suggestions for '{}'", results.len(), query);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLES: [&str; 3] = ["The Godfather", "The Room", "Pulp Fiction"];

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("Alien", "Alien"), 100.0);
        assert_eq!(similarity("", ""), 100.0);
        assert_eq!(similarity("abc", ""), 0.0);
        assert_eq!(similarity("abcd", "abce"), 75.0);
        // Case-sensitive
        assert!(similarity("alien", "Alien") < 100.0);
    }

    #[test]
    fn test_similarity_counts_characters() {
        // One substitution over six characters, regardless of byte length
        assert_eq!(similarity("Amélie", "Amelie"), 100.0 * (1.0 - 1.0 / 6.0));
    }

    #[test]
    fn test_suggest_misspelled_title() {
        let results = suggest("Gotfather", TITLES, &SearchOptions::with_limit(3));

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "The Godfather");
        assert!(results[0].score > results[1].score + 30.0);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_suggest_respects_limit() {
        let results = suggest("Gotfather", TITLES, &SearchOptions::with_limit(1));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "The Godfather");

        assert!(suggest("Gotfather", TITLES, &SearchOptions::with_limit(0)).is_empty());
    }

    #[test]
    fn test_suggest_empty_candidates() {
        let empty: Vec<String> = Vec::new();
        assert!(suggest("Gotfather", empty, &SearchOptions::default()).is_empty());
    }

    #[test]
    fn test_suggest_ties_keep_candidate_order() {
        let results = suggest("abc", ["abd", "abe", "xbc"], &SearchOptions::default());
        let titles: Vec<&str> = results.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["abd", "abe", "xbc"]);
    }

    #[test]
    fn test_suggest_case_variant_scores_high() {
        let results = suggest("the godfather", TITLES, &SearchOptions::default());
        assert_eq!(results[0].title, "The Godfather");
        assert!(results[0].score < 100.0);
        assert!(results[0].score > 80.0);
    }

    #[test]
    fn test_suggest_threshold() {
        let options = SearchOptions {
            limit: 3,
            score_threshold: 50.0,
        };
        let results = suggest("Gotfather", TITLES, &options);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "The Godfather");
    }
}
