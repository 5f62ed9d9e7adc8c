use crate::models::Suggestion;
use crate::storage::{load_suggestions, save_suggestions};

/// Cleans and standardizes suggestion text.
pub fn clean_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Scores how well a stored suggestion matches a query.
///
/// # Returns
/// - `1.0` for an exact match.
/// - `0.8` when the suggestion starts with the query.
/// - `0.6` when the query appears anywhere in the suggestion.
/// - `0.0` otherwise.
pub fn matching_score(query: &str, suggestion: &str) -> f64 {
    let query = query.to_lowercase();
    let suggestion = suggestion.to_lowercase();

    if query == suggestion {
        1.0
    } else if suggestion.starts_with(&query) {
        0.8
    } else if suggestion.contains(&query) {
        0.6
    } else {
        0.0
    }
}

/// Records a use of the given task text, creating the suggestion or
/// bumping its frequency.
pub fn record(text: &str) -> std::io::Result<()> {
    let text = clean_text(text);
    if text.is_empty() {
        return Ok(());
    }
    let mut suggestions = load_suggestions();
    if let Some(s) = suggestions.iter_mut().find(|s| s.text == text) {
        s.frequency += 1;
    } else {
        suggestions.push(Suggestion { text, frequency: 1 });
    }
    save_suggestions(&suggestions)
}

/// Returns the best-matching suggestions for a query, ordered by score
/// then by frequency, truncated to `limit`.
pub fn top_matches(query: &str, limit: usize) -> Vec<Suggestion> {
    let query = clean_text(query);
    let mut scored: Vec<(f64, Suggestion)> = load_suggestions()
        .into_iter()
        .filter_map(|s| {
            let score = matching_score(&query, &s.text);
            if score > 0.0 {
                Some((score, s))
            } else {
                None
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap()
            .then(b.1.frequency.cmp(&a.1.frequency))
    });
    scored.truncate(limit);
    scored.into_iter().map(|(_, s)| s).collect()
}
