//! Response parser — converts free-form LLM analysis prose into structured
//! scores, feedback lines, and lists.
//!
//! The model's output format is not guaranteed, so every operation here
//! degrades to a documented default instead of failing. Downstream code must
//! never branch on parser failure; callers that care whether a default was
//! substituted inspect `ParseResult::was_defaulted`.

use regex::Regex;

/// Default score used when a category score cannot be located in the response.
pub const DEFAULT_SCORE: f64 = 7.0;

/// Maximum entries returned by [`extract_list`].
const MAX_LIST_ITEMS: usize = 7;

/// An extracted value tagged with whether the fallback default was used.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<T> {
    pub value: T,
    pub was_defaulted: bool,
}

impl<T> ParseResult<T> {
    fn found(value: T) -> Self {
        Self {
            value,
            was_defaulted: false,
        }
    }

    fn defaulted(value: T) -> Self {
        Self {
            value,
            was_defaulted: true,
        }
    }
}

/// Extracts the first number following `category` (case-insensitive), e.g.
/// "Clarity: 8" or "CLARITY 7.5". Returns `DEFAULT_SCORE` when no match.
pub fn extract_score(response: &str, category: &str) -> ParseResult<f64> {
    let pattern = format!(r"(?i){}[:\s]*(\d+(?:\.\d+)?)", regex::escape(category));
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(_) => return ParseResult::defaulted(DEFAULT_SCORE),
    };

    re.captures(response)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(ParseResult::found)
        .unwrap_or_else(|| ParseResult::defaulted(DEFAULT_SCORE))
}

/// Returns the first non-empty line after the first line containing
/// `category` (case-insensitive substring match). Falls back to a templated
/// string when no such line exists.
pub fn extract_feedback(response: &str, category: &str) -> ParseResult<String> {
    let category_lower = category.to_lowercase();
    let lines: Vec<&str> = response.lines().collect();

    let category_index = lines
        .iter()
        .position(|line| line.to_lowercase().contains(&category_lower));

    if let Some(index) = category_index {
        let next = lines[index + 1..]
            .iter()
            .map(|line| line.trim())
            .find(|line| !line.is_empty());
        if let Some(next) = next {
            return ParseResult::found(next.to_string());
        }
    }

    ParseResult::defaulted(format!(
        "Analysis for {category} completed. See full report for details."
    ))
}

/// Collects bullet items from the section following the first line containing
/// `keyword` (case-insensitive). Items begin with `-`, `•`, or `N.` and are
/// returned with the marker stripped. Collection stops at the first blank
/// line or a line containing "score" or "analysis" (section-boundary
/// heuristic). At most 7 items; no keyword match yields an empty vec.
pub fn extract_list(response: &str, keyword: &str) -> Vec<String> {
    let keyword_lower = keyword.to_lowercase();
    let numbered = Regex::new(r"^\d+\.").expect("static regex");
    let marker_prefix = Regex::new(r"^[-•\d.\s]+").expect("static regex");

    let mut items = Vec::new();
    let mut in_section = false;

    for line in response.lines() {
        if line.to_lowercase().contains(&keyword_lower) {
            in_section = true;
            continue;
        }

        if !in_section {
            continue;
        }

        let trimmed = line.trim();
        let is_bullet =
            trimmed.starts_with('-') || trimmed.starts_with('•') || numbered.is_match(trimmed);

        if is_bullet {
            let stripped = marker_prefix.replace(trimmed, "").trim().to_string();
            items.push(stripped);
        } else if trimmed.is_empty()
            || trimmed.to_lowercase().contains("score")
            || trimmed.to_lowercase().contains("analysis")
        {
            break;
        }
    }

    items.truncate(MAX_LIST_ITEMS);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK_RESPONSE: &str = "\
PITCH DECK ANALYSIS

1. CLARITY: 8
The problem statement is crisp and the market sizing is easy to follow.

2. STORYTELLING: 6.5
The narrative jumps between product and traction without a connecting arc.

3. FLOW: 7
Slides build logically, though the financials arrive too early.

Key Strengths:
- Clear problem framing
- Strong founding team slide
• Credible go-to-market plan

Areas for Improvement:
1. Tighten the competitive landscape
2. Quantify the traction claims

Actionable Recommendations:
- Move financials after traction
- Add a customer quote
";

    #[test]
    fn test_extract_score_finds_integer() {
        let result = extract_score(DECK_RESPONSE, "clarity");
        assert_eq!(result.value, 8.0);
        assert!(!result.was_defaulted);
    }

    #[test]
    fn test_extract_score_finds_decimal() {
        let result = extract_score(DECK_RESPONSE, "storytelling");
        assert_eq!(result.value, 6.5);
        assert!(!result.was_defaulted);
    }

    #[test]
    fn test_extract_score_is_case_insensitive() {
        let result = extract_score("Clarity: 8", "CLARITY");
        assert_eq!(result.value, 8.0);
    }

    #[test]
    fn test_extract_score_defaults_when_missing() {
        let result = extract_score("No relevant content here.", "clarity");
        assert_eq!(result.value, DEFAULT_SCORE);
        assert!(result.was_defaulted);
    }

    #[test]
    fn test_extract_score_takes_first_occurrence() {
        let response = "Clarity: 9\nLater discussion of clarity 3 is ignored.";
        assert_eq!(extract_score(response, "clarity").value, 9.0);
    }

    #[test]
    fn test_extract_score_regex_metacharacters_in_category() {
        // A category containing regex metacharacters must not panic or error.
        let result = extract_score("a+b: 5", "a+b");
        assert_eq!(result.value, 5.0);
    }

    #[test]
    fn test_extract_feedback_returns_next_line() {
        let result = extract_feedback(DECK_RESPONSE, "flow");
        assert_eq!(
            result.value,
            "Slides build logically, though the financials arrive too early."
        );
        assert!(!result.was_defaulted);
    }

    #[test]
    fn test_extract_feedback_skips_blank_lines() {
        let result = extract_feedback("CLARITY: 8\n\nGood clarity throughout.", "clarity");
        assert_eq!(result.value, "Good clarity throughout.");
        assert!(!result.was_defaulted);
    }

    #[test]
    fn test_extract_feedback_defaults_when_nothing_follows() {
        let result = extract_feedback("Some preamble.\nCLARITY: 8\n\n   \n", "clarity");
        assert!(result.was_defaulted);
    }

    #[test]
    fn test_extract_feedback_falls_back_to_template() {
        let result = extract_feedback("nothing relevant", "confidence");
        assert_eq!(
            result.value,
            "Analysis for confidence completed. See full report for details."
        );
        assert!(result.was_defaulted);
    }

    #[test]
    fn test_extract_list_collects_mixed_markers() {
        let items = extract_list(DECK_RESPONSE, "strengths");
        assert_eq!(
            items,
            vec![
                "Clear problem framing",
                "Strong founding team slide",
                "Credible go-to-market plan",
            ]
        );
    }

    #[test]
    fn test_extract_list_strips_numeric_markers() {
        let items = extract_list(DECK_RESPONSE, "improvement");
        assert_eq!(
            items,
            vec![
                "Tighten the competitive landscape",
                "Quantify the traction claims",
            ]
        );
    }

    #[test]
    fn test_extract_list_entries_never_start_with_marker() {
        for keyword in ["strengths", "improvement", "recommendations"] {
            for item in extract_list(DECK_RESPONSE, keyword) {
                assert!(!item.starts_with('-'), "unstripped dash in {item:?}");
                assert!(!item.starts_with('•'), "unstripped bullet in {item:?}");
                assert!(
                    Regex::new(r"^\d+\.").unwrap().find(&item).is_none(),
                    "unstripped number in {item:?}"
                );
            }
        }
    }

    #[test]
    fn test_extract_list_stops_at_blank_line() {
        let response = "Strengths:\n- One\n- Two\n\n- Orphan after blank";
        assert_eq!(extract_list(response, "strengths"), vec!["One", "Two"]);
    }

    #[test]
    fn test_extract_list_stops_at_score_boundary() {
        let response = "Strengths:\n- One\nOverall score discussion\n- Orphan";
        assert_eq!(extract_list(response, "strengths"), vec!["One"]);
    }

    #[test]
    fn test_extract_list_truncates_to_seven() {
        let mut response = String::from("Recommendations:\n");
        for i in 1..=12 {
            response.push_str(&format!("- Item {i}\n"));
        }
        let items = extract_list(&response, "recommendations");
        assert_eq!(items.len(), 7);
        assert_eq!(items[6], "Item 7");
    }

    #[test]
    fn test_extract_list_no_keyword_is_empty() {
        assert!(extract_list(DECK_RESPONSE, "weaknesses").is_empty());
    }

    #[test]
    fn test_extract_list_preserves_order() {
        let items = extract_list(DECK_RESPONSE, "recommendations");
        assert_eq!(
            items,
            vec!["Move financials after traction", "Add a customer quote"]
        );
    }
}
