//! Heading synthesis for sections created by an insertion.

const SEPARATORS: &[char] = &['_', '-', '.', ' '];

/// Derive a display heading from a section id.
///
/// Ids of the form `art_11`, `art_11bis`, `article-11-bis` produce
/// `"Article 11."` / `"Article 11 bis."`. Anything else is returned verbatim.
///
/// # Examples
///
/// ```
/// use lawline_replay::synthesize_heading;
///
/// assert_eq!(synthesize_heading("art_11bis"), "Article 11 bis.");
/// assert_eq!(synthesize_heading("preamble"), "preamble");
/// ```
pub fn synthesize_heading(id: &str) -> String {
    match parse_article_id(id) {
        Some((number, None)) => format!("Article {number}."),
        Some((number, Some(suffix))) => format!("Article {number} {suffix}."),
        None => id.to_string(),
    }
}

fn parse_article_id(id: &str) -> Option<(&str, Option<String>)> {
    let lower = id.to_ascii_lowercase();
    let prefix_len = if lower.starts_with("article") {
        "article".len()
    } else if lower.starts_with("art") {
        "art".len()
    } else {
        return None;
    };

    let rest = id[prefix_len..].trim_start_matches(SEPARATORS);
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let (number, tail) = rest.split_at(digits);

    let suffix = tail.trim_start_matches(SEPARATORS);
    if suffix.is_empty() {
        return Some((number, None));
    }
    if !suffix.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some((number, Some(suffix.to_ascii_lowercase())))
}
