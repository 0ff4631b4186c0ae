//! Analysis assembly — builds deck, video, and investor Q&A artifacts.
//!
//! Each operation is one prompt-template fill, one `LlmGateway` call, and a
//! parse pass. Gateway failures propagate as `AppError::Analysis`; parse gaps
//! never propagate (the parser substitutes documented defaults).

use chrono::Utc;
use regex::Regex;
use tracing::info;
use uuid::Uuid;

use crate::analysis::filler;
use crate::analysis::parser::{extract_feedback, extract_list, extract_score};
use crate::analysis::prompts::{
    ANALYSIS_SYSTEM, DECK_ANALYSIS_PROMPT_TEMPLATE, QA_PROMPT_TEMPLATE, QA_SYSTEM,
    VIDEO_ANALYSIS_PROMPT_TEMPLATE,
};
use crate::analysis::round1;
use crate::errors::AppError;
use crate::llm_client::LlmGateway;
use crate::models::analysis::{
    CategoryScore, DeckAnalysis, FillerWords, SpeechPace, VideoAnalysis,
};
use crate::models::ids::{DeckId, UserId, VideoId};
use crate::models::qa::{InvestorQa, QaItem};

const ANALYSIS_MAX_TOKENS: u32 = 1500;
const QA_MAX_TOKENS: u32 = 2000;
const MAX_QA_ITEMS: usize = 10;

/// Generic delivery tips attached to each Q&A item until per-question tips
/// are parsed separately.
const GENERIC_QA_TIPS: [&str; 3] = [
    "Be confident and specific in your response",
    "Use data to support your claims",
    "Keep your answer concise but comprehensive",
];

/// Analyzes pitch deck text: one LLM call, three category scores (clarity,
/// storytelling, flow), three lists. Overall score is the rounded mean of
/// the three category scores.
pub async fn analyze_deck(
    llm: &dyn LlmGateway,
    deck_id: DeckId,
    title: &str,
    text: &str,
) -> Result<DeckAnalysis, AppError> {
    let prompt = DECK_ANALYSIS_PROMPT_TEMPLATE
        .replace("{title}", title)
        .replace("{text}", text);

    let response = llm
        .generate(&prompt, ANALYSIS_SYSTEM, ANALYSIS_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Analysis(format!("deck analysis LLM call failed: {e}")))?;

    let clarity = extract_score(&response, "clarity");
    let storytelling = extract_score(&response, "storytelling");
    let flow = extract_score(&response, "flow");

    let overall_score = round1((clarity.value + storytelling.value + flow.value) / 3.0);

    info!("Deck {deck_id} analyzed: overall {overall_score}");

    Ok(DeckAnalysis {
        id: Uuid::new_v4(),
        deck_id,
        overall_score,
        clarity: CategoryScore {
            score: clarity.value,
            feedback: extract_feedback(&response, "clarity").value,
        },
        storytelling: CategoryScore {
            score: storytelling.value,
            feedback: extract_feedback(&response, "storytelling").value,
        },
        flow: CategoryScore {
            score: flow.value,
            feedback: extract_feedback(&response, "flow").value,
        },
        key_strengths: extract_list(&response, "strengths"),
        areas_for_improvement: extract_list(&response, "improvement"),
        actionable_recommendations: extract_list(&response, "recommendations"),
        created_at: Utc::now(),
    })
}

/// Words per minute, rounded. 0 when the duration is 0.
pub fn words_per_minute(transcript: &str, duration_seconds: u32) -> u32 {
    if duration_seconds == 0 {
        return 0;
    }
    let words = transcript.split_whitespace().count() as f64;
    (words / f64::from(duration_seconds) * 60.0).round() as u32
}

/// Analyzes pitch video delivery from its transcript. WPM and filler counts
/// are computed deterministically before and after the LLM call; the model
/// only supplies qualitative scores and feedback. Overall score is the
/// rounded mean of the four category scores.
pub async fn analyze_video(
    llm: &dyn LlmGateway,
    video_id: VideoId,
    transcript: &str,
    duration_seconds: u32,
) -> Result<VideoAnalysis, AppError> {
    let wpm = words_per_minute(transcript, duration_seconds);

    let prompt = VIDEO_ANALYSIS_PROMPT_TEMPLATE
        .replace("{duration}", &duration_seconds.to_string())
        .replace("{wpm}", &wpm.to_string())
        .replace("{transcript}", transcript);

    let response = llm
        .generate(&prompt, ANALYSIS_SYSTEM, ANALYSIS_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Analysis(format!("video analysis LLM call failed: {e}")))?;

    let pace = extract_score(&response, "pace");
    let filler_score = extract_score(&response, "filler");
    let confidence = extract_score(&response, "confidence");
    let tone = extract_score(&response, "tone");

    let overall_score = round1(
        (pace.value + filler_score.value + confidence.value + tone.value) / 4.0,
    );

    // Exact counts come from the lexical scan, never from the LLM.
    let filler_stats = filler::count(transcript);

    info!(
        "Video {video_id} analyzed: overall {overall_score}, {wpm} WPM, {} filler words",
        filler_stats.count
    );

    Ok(VideoAnalysis {
        id: Uuid::new_v4(),
        video_id,
        overall_score,
        speech_pace: SpeechPace {
            score: pace.value,
            words_per_minute: wpm,
            feedback: extract_feedback(&response, "pace").value,
        },
        filler_words: FillerWords {
            count: filler_stats.count,
            percentage: filler_stats.percentage,
            feedback: extract_feedback(&response, "filler").value,
        },
        confidence: CategoryScore {
            score: confidence.value,
            feedback: extract_feedback(&response, "confidence").value,
        },
        tone: CategoryScore {
            score: tone.value,
            feedback: extract_feedback(&response, "tone").value,
        },
        key_strengths: extract_list(&response, "strengths"),
        areas_for_improvement: extract_list(&response, "improvement"),
        actionable_recommendations: extract_list(&response, "recommendations"),
        created_at: Utc::now(),
    })
}

/// Generates a simulated investor Q&A set from deck text and/or a video
/// transcript. At least one input must be non-empty.
pub async fn generate_investor_qa(
    llm: &dyn LlmGateway,
    user_id: UserId,
    deck_id: Option<DeckId>,
    video_id: Option<VideoId>,
    deck_text: Option<&str>,
    video_text: Option<&str>,
) -> Result<InvestorQa, AppError> {
    let content: Vec<&str> = [deck_text, video_text]
        .into_iter()
        .flatten()
        .filter(|t| !t.trim().is_empty())
        .collect();

    if content.is_empty() {
        return Err(AppError::Validation(
            "Q&A generation requires deck text or a video transcript".to_string(),
        ));
    }

    let prompt = QA_PROMPT_TEMPLATE.replace("{content}", &content.join("\n\n"));

    let response = llm
        .generate(&prompt, QA_SYSTEM, QA_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Analysis(format!("Q&A generation LLM call failed: {e}")))?;

    let questions = parse_qa_response(&response);

    info!("Generated {} investor questions for user {user_id}", questions.len());

    Ok(InvestorQa {
        id: Uuid::new_v4(),
        user_id,
        deck_id,
        video_id,
        questions,
        created_at: Utc::now(),
    })
}

/// Segments the Q&A response on leading `N.` markers. Within each block the
/// first non-empty line (minus an optional "Question:" prefix) is the
/// question and the first line containing "answer" is the suggested answer.
/// Truncated to 10 items.
fn parse_qa_response(response: &str) -> Vec<QaItem> {
    let block_marker = Regex::new(r"\d+\.").expect("static regex");
    let question_prefix = Regex::new(r"(?i)^Question:?\s*").expect("static regex");
    let answer_prefix = Regex::new(r"(?i)^.*answer:?\s*").expect("static regex");

    let mut questions = Vec::new();

    for section in block_marker.split(response) {
        let lines: Vec<&str> = section
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if lines.len() < 2 {
            continue;
        }

        let question = question_prefix.replace(lines[0], "").trim().to_string();
        let suggested_answer = lines
            .iter()
            .find(|l| l.to_lowercase().contains("answer"))
            .map(|l| answer_prefix.replace(l, "").trim().to_string())
            .unwrap_or_default();

        let answer_quality = rate_answer(&suggested_answer);

        questions.push(QaItem {
            question,
            suggested_answer,
            answer_quality,
            tips: GENERIC_QA_TIPS.iter().map(|t| t.to_string()).collect(),
        });
    }

    questions.truncate(MAX_QA_ITEMS);
    questions
}

/// Deterministic answer-quality heuristic, bounded to [7, 9]: one point for
/// a substantive answer (20+ words), one for quantitative evidence.
fn rate_answer(answer: &str) -> u8 {
    let mut quality = 7u8;
    if answer.split_whitespace().count() >= 20 {
        quality += 1;
    }
    if answer.chars().any(|c| c.is_ascii_digit()) {
        quality += 1;
    }
    quality
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::llm_client::LlmError;

    /// Fake gateway returning a fixed response (or a fixed failure).
    struct ScriptedLlm {
        response: Result<String, String>,
    }

    impl ScriptedLlm {
        fn ok(response: &str) -> Self {
            Self {
                response: Ok(response.to_string()),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err("quota exhausted".to_string()),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedLlm {
        async fn generate(
            &self,
            _prompt: &str,
            _system: &str,
            _max_tokens: u32,
        ) -> Result<String, LlmError> {
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(LlmError::Api {
                    status: 429,
                    message: message.clone(),
                }),
            }
        }
    }

    const DECK_RESPONSE: &str = "\
CLARITY: 8
The problem is stated crisply.

STORYTELLING: 7
The arc is serviceable.

FLOW: 6
Financials arrive too early.

Key Strengths:
- Clear problem framing

Areas for Improvement:
- Tighten the competitive slide

Actionable Recommendations:
- Move financials later
";

    const VIDEO_RESPONSE: &str = "\
SPEECH PACE: 8
Comfortable pace throughout.

FILLER: 6
Noticeable reliance on hedging words.

CONFIDENCE: 7
Steady delivery with occasional hesitation.

TONE: 7
Professional and engaged.
";

    #[tokio::test]
    async fn test_analyze_deck_overall_is_rounded_mean() {
        let llm = ScriptedLlm::ok(DECK_RESPONSE);
        let analysis = analyze_deck(&llm, DeckId::new(), "Acme", "content")
            .await
            .unwrap();

        assert_eq!(analysis.clarity.score, 8.0);
        assert_eq!(analysis.storytelling.score, 7.0);
        assert_eq!(analysis.flow.score, 6.0);
        assert_eq!(analysis.overall_score, 7.0);
    }

    #[tokio::test]
    async fn test_analyze_deck_populates_feedback_and_lists() {
        let llm = ScriptedLlm::ok(DECK_RESPONSE);
        let analysis = analyze_deck(&llm, DeckId::new(), "Acme", "content")
            .await
            .unwrap();

        assert_eq!(analysis.clarity.feedback, "The problem is stated crisply.");
        assert_eq!(analysis.key_strengths, vec!["Clear problem framing"]);
        assert_eq!(
            analysis.actionable_recommendations,
            vec!["Move financials later"]
        );
    }

    #[tokio::test]
    async fn test_analyze_deck_defaults_fill_gaps() {
        let llm = ScriptedLlm::ok("The model rambled without any structure.");
        let analysis = analyze_deck(&llm, DeckId::new(), "Acme", "content")
            .await
            .unwrap();

        assert_eq!(analysis.clarity.score, 7.0);
        assert_eq!(analysis.overall_score, 7.0);
        assert!(analysis.key_strengths.is_empty());
        assert_eq!(
            analysis.clarity.feedback,
            "Analysis for clarity completed. See full report for details."
        );
    }

    #[tokio::test]
    async fn test_analyze_deck_llm_failure_propagates() {
        let llm = ScriptedLlm::failing();
        let result = analyze_deck(&llm, DeckId::new(), "Acme", "content").await;
        assert!(matches!(result, Err(AppError::Analysis(_))));
    }

    #[tokio::test]
    async fn test_analyze_deck_rounds_to_one_decimal() {
        let response = "CLARITY: 8\nSTORYTELLING: 8\nFLOW: 7";
        let llm = ScriptedLlm::ok(response);
        let analysis = analyze_deck(&llm, DeckId::new(), "Acme", "content")
            .await
            .unwrap();
        // mean = 7.666... → 7.7
        assert_eq!(analysis.overall_score, 7.7);
    }

    #[test]
    fn test_words_per_minute_basic() {
        let transcript = vec!["word"; 150].join(" ");
        assert_eq!(words_per_minute(&transcript, 60), 150);
    }

    #[test]
    fn test_words_per_minute_zero_duration() {
        assert_eq!(words_per_minute("some words here", 0), 0);
    }

    #[tokio::test]
    async fn test_analyze_video_overall_is_four_category_mean() {
        let llm = ScriptedLlm::ok(VIDEO_RESPONSE);
        let analysis = analyze_video(&llm, VideoId::new(), "a clean transcript", 30)
            .await
            .unwrap();

        assert_eq!(analysis.speech_pace.score, 8.0);
        assert_eq!(analysis.filler_words.feedback, "Noticeable reliance on hedging words.");
        assert_eq!(analysis.confidence.score, 7.0);
        assert_eq!(analysis.tone.score, 7.0);
        // mean(8, 6, 7, 7) = 7.0
        assert_eq!(analysis.overall_score, 7.0);
    }

    #[tokio::test]
    async fn test_analyze_video_filler_counts_are_lexical_not_llm() {
        // The LLM claims a filler score of 6; the counts must still come from
        // the transcript scan.
        let llm = ScriptedLlm::ok(VIDEO_RESPONSE);
        let analysis = analyze_video(&llm, VideoId::new(), "um, like, our um growth", 10)
            .await
            .unwrap();

        assert_eq!(analysis.filler_words.count, 3);
        assert_eq!(analysis.filler_words.percentage, 60.0);
    }

    #[tokio::test]
    async fn test_analyze_video_embeds_computed_wpm() {
        let llm = ScriptedLlm::ok(VIDEO_RESPONSE);
        let transcript = vec!["word"; 150].join(" ");
        let analysis = analyze_video(&llm, VideoId::new(), &transcript, 60)
            .await
            .unwrap();
        assert_eq!(analysis.speech_pace.words_per_minute, 150);
    }

    const QA_RESPONSE: &str = "\
1. Question: What is your customer acquisition cost?
Answer: Our blended CAC is $42, recovered within 3 months through subscription revenue across both segments.

2. How large is the addressable market?
Suggested Answer: We size the serviceable market at roughly 2 million SMBs.

3. Incomplete block
";

    #[tokio::test]
    async fn test_generate_qa_parses_numbered_blocks() {
        let llm = ScriptedLlm::ok(QA_RESPONSE);
        let qa = generate_investor_qa(&llm, UserId::new(), None, None, Some("deck text"), None)
            .await
            .unwrap();

        assert_eq!(qa.questions.len(), 2);
        assert_eq!(
            qa.questions[0].question,
            "What is your customer acquisition cost?"
        );
        assert_eq!(
            qa.questions[1].question,
            "How large is the addressable market?"
        );
        assert_eq!(
            qa.questions[1].suggested_answer,
            "We size the serviceable market at roughly 2 million SMBs."
        );
    }

    #[tokio::test]
    async fn test_generate_qa_rejects_empty_inputs() {
        let llm = ScriptedLlm::ok(QA_RESPONSE);
        let result =
            generate_investor_qa(&llm, UserId::new(), None, None, Some("   "), None).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_generate_qa_truncates_to_ten() {
        let mut response = String::new();
        for i in 1..=14 {
            response.push_str(&format!(
                "{i}. Question number {i}?\nAnswer: A serviceable answer.\n\n"
            ));
        }
        let llm = ScriptedLlm::ok(&response);
        let qa = generate_investor_qa(&llm, UserId::new(), None, None, Some("deck"), None)
            .await
            .unwrap();
        assert_eq!(qa.questions.len(), 10);
    }

    #[tokio::test]
    async fn test_generate_qa_attaches_generic_tips() {
        let llm = ScriptedLlm::ok(QA_RESPONSE);
        let qa = generate_investor_qa(&llm, UserId::new(), None, None, Some("deck"), None)
            .await
            .unwrap();
        assert_eq!(qa.questions[0].tips.len(), 3);
    }

    #[test]
    fn test_rate_answer_is_bounded_and_deterministic() {
        assert_eq!(rate_answer(""), 7);
        assert_eq!(rate_answer("We will grow."), 7);
        assert_eq!(rate_answer("Our CAC is $42."), 8);
        let long = vec!["word"; 25].join(" ");
        assert_eq!(rate_answer(&long), 8);
        let long_with_numbers = format!("{long} 42");
        assert_eq!(rate_answer(&long_with_numbers), 9);
        assert_eq!(rate_answer(&long_with_numbers), rate_answer(&long_with_numbers));
    }
}
