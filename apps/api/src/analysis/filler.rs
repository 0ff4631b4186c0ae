//! Filler-word counter — deterministic lexical scan of a transcript.
//!
//! Exact counts must not depend on model nondeterminism, so this never goes
//! through the LLM. The LLM only supplies the qualitative filler *score* and
//! feedback; the numbers come from here.

use regex::Regex;

/// Fixed filler vocabulary. Matched case-insensitively on whole-word (or
/// whole-phrase) boundaries — "like" inside "likely" does not match.
pub const FILLER_WORDS: [&str; 7] = ["um", "uh", "like", "you know", "so", "actually", "basically"];

/// Count and share of filler words in a transcript.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillerWordStats {
    pub count: u32,
    /// Percentage of total whitespace-delimited words, rounded to the
    /// nearest integer. 0 for an empty transcript.
    pub percentage: f64,
}

/// Counts non-overlapping whole-word matches of the filler vocabulary.
pub fn count(transcript: &str) -> FillerWordStats {
    let count: u32 = FILLER_WORDS
        .iter()
        .map(|word| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(word));
            Regex::new(&pattern)
                .expect("static vocabulary pattern")
                .find_iter(transcript)
                .count() as u32
        })
        .sum();

    let total_words = transcript.split_whitespace().count() as u32;
    let percentage = if total_words == 0 {
        0.0
    } else {
        (100.0 * f64::from(count) / f64::from(total_words)).round()
    };

    FillerWordStats { count, percentage }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_whole_words_only() {
        // "like" appears twice as a word; "likely" must not match.
        let stats = count("I was, like, really like this but likely not");
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn test_percentage_over_word_count() {
        // 2 filler words out of 6 whitespace-delimited tokens.
        let stats = count("I was, like, really like this");
        assert_eq!(stats.count, 2);
        assert_eq!(stats.percentage, (100.0 * 2.0 / 6.0_f64).round());
    }

    #[test]
    fn test_empty_transcript_has_no_division_by_zero() {
        let stats = count("");
        assert_eq!(stats.count, 0);
        assert_eq!(stats.percentage, 0.0);
    }

    #[test]
    fn test_whitespace_only_transcript() {
        let stats = count("   \n\t  ");
        assert_eq!(stats.count, 0);
        assert_eq!(stats.percentage, 0.0);
    }

    #[test]
    fn test_matches_are_case_insensitive() {
        let stats = count("Um, UM, um");
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_multi_word_phrase_matches() {
        let stats = count("you know the market, you know the team");
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn test_phrase_not_matched_across_words() {
        // "you" and "know" separated by another token is not the phrase.
        let stats = count("you really know");
        assert_eq!(stats.count, 0);
    }

    #[test]
    fn test_all_vocabulary_entries_counted() {
        // 7 vocabulary hits over 8 tokens ("you know" is one hit, two tokens).
        let stats = count("um uh like so actually basically you know");
        assert_eq!(stats.count, 7);
        assert_eq!(stats.percentage, 88.0);
    }

    #[test]
    fn test_no_fillers_in_clean_transcript() {
        let stats = count("our revenue grew threefold this quarter");
        assert_eq!(stats.count, 0);
        assert_eq!(stats.percentage, 0.0);
    }
}
