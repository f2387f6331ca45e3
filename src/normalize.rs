use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+|www\S+|https\S+").unwrap());
static HASHTAG_GAP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\s+(\w+)").unwrap());
static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(\w+)").unwrap());
static NOISE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+|[^a-z\s]").unwrap());

/// Standard English stop-word list. Contraction fragments ("don", "ve", "ll")
/// are listed bare because apostrophes are stripped before filtering runs.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
        "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
        "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
        "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
        "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
        "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
        "for", "with", "about", "against", "between", "into", "through", "during", "before",
        "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
        "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
        "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
        "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
        "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
        "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
        "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
    ]
    .into_iter()
    .collect()
});

/// Normalizes a raw post into cleaned text and extracts its hashtags.
///
/// The steps are order-sensitive: URLs go first so their fragments never leak
/// into hashtags or words, hashtag spacing is repaired and hashtags captured
/// (original case, source order, duplicates kept) before lowercasing, then
/// mentions and non-letters are dropped and stop words filtered out.
pub fn normalize(text: &str) -> (String, Vec<String>) {
    let text = URL_RE.replace_all(text, " ");
    let text = HASHTAG_GAP_RE.replace_all(&text, "#$1");

    let hashtags: Vec<String> = HASHTAG_RE
        .captures_iter(&text)
        .map(|cap| cap[1].to_string())
        .collect();

    let text = text.to_lowercase();
    let text = NOISE_RE.replace_all(&text, " ");

    let cleaned = text
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ");

    (cleaned, hashtags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_urls_mentions_and_punctuation() {
        let (cleaned, hashtags) = normalize("Fire near LA!! #wildfire #wildfire http://x.co @bob");
        assert_eq!(hashtags, vec!["wildfire", "wildfire"]);
        assert_eq!(cleaned, "fire near la wildfire wildfire");
    }

    #[test]
    fn repairs_hashtag_spacing_before_extraction() {
        let (_, hashtags) = normalize("flooding downtown # Earthquake now");
        assert_eq!(hashtags, vec!["Earthquake"]);
    }

    #[test]
    fn hashtags_keep_original_case_and_order() {
        let (cleaned, hashtags) = normalize("#StaySafe evacuating #flood zone #StaySafe");
        assert_eq!(hashtags, vec!["StaySafe", "flood", "StaySafe"]);
        // The lowercased hashtag bodies stay in the text once '#' is stripped
        assert!(cleaned.contains("staysafe"));
    }

    #[test]
    fn drops_stop_words_and_digits() {
        let (cleaned, _) = normalize("The storm is hitting 3 towns and it will not stop");
        assert_eq!(cleaned, "storm hitting towns stop");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let (cleaned, hashtags) = normalize("");
        assert_eq!(cleaned, "");
        assert!(hashtags.is_empty());
    }

    #[test]
    fn all_noise_input_yields_empty_string() {
        let (cleaned, hashtags) = normalize("@alice 1234 !!! https://a.example");
        assert_eq!(cleaned, "");
        assert!(hashtags.is_empty());
    }

    #[test]
    fn cleaned_output_is_lowercase_single_spaced() {
        let (cleaned, _) = normalize("  Huge   WAVES\tcrashing\n\nover the  seawall!  ");
        assert!(!cleaned.starts_with(' ') && !cleaned.ends_with(' '));
        assert!(cleaned
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == ' '));
        assert!(!cleaned.contains("  "));
    }

    #[test]
    fn normalization_is_a_fixed_point() {
        let (cleaned, _) = normalize("Wildfire spreading fast in Los Angeles #wildfire");
        let (again, hashtags) = normalize(&cleaned);
        assert_eq!(again, cleaned);
        assert!(hashtags.is_empty());
    }
}
