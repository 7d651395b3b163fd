//! Hashtag extraction and canonicalization.
//!
//! A hashtag is `#` followed by a word of letters, digits, `_` or `-`. It
//! extends across a single space only when the next word starts with an
//! uppercase letter, so `#Cornell Notes and` yields `#cornell-notes` while
//! `#exam prep` yields `#exam`. Canonical form is lowercase, hyphen-joined,
//! letters/digits/hyphens only, prefixed with one `#`.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#([\p{L}\p{N}_-]+(?: \p{Lu}[\p{L}\p{N}_-]*)*)").expect("hashtag pattern is valid")
});

/// Normalize a raw tag body (with or without leading `#`) to its canonical
/// token, without the `#`. Returns an empty string when nothing survives.
pub fn normalize_tag(raw: &str) -> String {
    let joined = raw
        .trim()
        .trim_start_matches('#')
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect();

    kept.split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn dedupe_prefixed<I>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for token in tokens {
        if token.is_empty() || !seen.insert(token.clone()) {
            continue;
        }
        out.push(format!("#{}", token));
    }
    out
}

/// Extract canonical hashtags from free text, de-duplicated in first-seen order.
pub fn extract_tags(content: &str) -> Vec<String> {
    dedupe_prefixed(
        HASHTAG_RE
            .captures_iter(content)
            .map(|cap| normalize_tag(&cap[1])),
    )
}

/// Canonicalize a comma- or newline-separated tag list (e.g. AI output
/// like `#Math, algebra, Linear Equations`).
pub fn sanitize_tag_list(text: &str) -> Vec<String> {
    dedupe_prefixed(text.split([',', '\n']).map(normalize_tag))
}

/// Canonicalize an already-split list of tags, e.g. one read back from disk.
pub fn canonicalize_tags(tags: &[String]) -> Vec<String> {
    dedupe_prefixed(tags.iter().map(|t| normalize_tag(t)))
}

/// Canonical tag marking which template a note was started from.
pub fn tag_for_template_name(name: &str) -> Option<String> {
    let token = normalize_tag(name);
    if token.is_empty() {
        None
    } else {
        Some(format!("#{}", token))
    }
}

/// Embed tags back into text, one space apart.
pub fn render_tags(tags: &[String]) -> String {
    tags.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_tags_scenario() {
        let tags = extract_tags("Discuss #Cornell Notes and #exam prep, also #exam");
        assert_eq!(tags, vec!["#cornell-notes", "#exam"]);
    }

    #[test]
    fn test_extract_tags_dedupes_case_insensitively() {
        let txt = "This is a #note about #Math and #science. Repeated #math should dedupe.";
        assert_eq!(extract_tags(txt), vec!["#note", "#math", "#science"]);
    }

    #[test]
    fn test_extract_tags_edge_cases() {
        assert!(extract_tags("no tags here").is_empty());
        assert!(extract_tags("# Heading\n#\n#-- #__").is_empty());
        assert_eq!(extract_tags("#Main-Idea #main_idea"), vec!["#main-idea", "#mainidea"]);
        assert_eq!(extract_tags("##double and #trailing-"), vec!["#double", "#trailing"]);
        assert_eq!(extract_tags("year #2024 plan"), vec!["#2024"]);
    }

    #[test]
    fn test_extract_tags_unicode() {
        assert_eq!(extract_tags("#Über Physik und #café"), vec!["#über-physik", "#café"]);
    }

    #[test]
    fn test_extract_tags_every_entry_single_hash_no_duplicates() {
        let content = "#A #a ##b #B-b #c_ d #Ee Ff #ee-ff #Z";
        let tags = extract_tags(content);
        let unique: HashSet<_> = tags.iter().collect();
        assert_eq!(unique.len(), tags.len());
        for tag in &tags {
            assert!(tag.starts_with('#'));
            assert!(!tag[1..].starts_with('#'));
        }
    }

    #[test]
    fn test_extract_tags_idempotent() {
        let samples = [
            "Discuss #Cornell Notes and #exam prep, also #exam",
            "#Über Physik #2024 #Main_Idea #x-Y-z",
            "plain text",
            "#Week Three Review, #Problem Set 4",
        ];
        for sample in samples {
            let once = extract_tags(sample);
            let again = extract_tags(&format!("text {} more", render_tags(&once)));
            assert_eq!(once, again, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_sanitize_tag_list() {
        let out = sanitize_tag_list(" , #Cornell Notes, cornell-notes, #cornell NOTES  ,");
        assert_eq!(out, vec!["#cornell-notes"]);
        assert!(sanitize_tag_list("").is_empty());
        assert_eq!(sanitize_tag_list("  , , #a, #A, a\n#b"), vec!["#a", "#b"]);
    }

    #[test]
    fn test_tag_for_template_name() {
        assert_eq!(tag_for_template_name("Main Idea & Details").as_deref(), Some("#main-idea-details"));
        assert_eq!(tag_for_template_name("Polya's 4 Steps").as_deref(), Some("#polyas-4-steps"));
        assert_eq!(tag_for_template_name("&&"), None);
    }

    #[test]
    fn test_canonicalize_tags() {
        let raw = vec!["#Exam".to_string(), "exam".to_string(), "Study Group".to_string(), "".to_string()];
        assert_eq!(canonicalize_tags(&raw), vec!["#exam", "#study-group"]);
    }
}
