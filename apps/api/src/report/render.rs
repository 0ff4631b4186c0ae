//! Static HTML rendering of a pitch report.
//!
//! Pure template substitution: identical `PitchReport` input produces
//! byte-identical output. Sections are emitted only for the parts of the
//! report that are present, and every field of a present structure appears
//! in the markup.

use crate::models::analysis::{DeckAnalysis, VideoAnalysis};
use crate::models::qa::InvestorQa;
use crate::models::report::PitchReport;

/// Maximum Q&A items included in the rendered document.
const MAX_RENDERED_QUESTIONS: usize = 8;

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; }
        .header { text-align: center; margin-bottom: 40px; }
        .score { font-size: 2em; color: #6366F1; font-weight: bold; }
        .section { margin-bottom: 30px; }
        .section h2 { color: #1F2937; border-bottom: 2px solid #6366F1; padding-bottom: 10px; }
        .feedback { background: #F9FAFB; padding: 15px; border-radius: 8px; margin: 10px 0; }
        .recommendations { background: #FEF3C7; padding: 15px; border-radius: 8px; }
        .qa-item { margin-bottom: 20px; padding: 15px; border: 1px solid #E5E7EB; border-radius: 8px; }
        .question { font-weight: bold; color: #1F2937; margin-bottom: 10px; }
        .answer { color: #4B5563; }
        ul { padding-left: 20px; }
        li { margin-bottom: 5px; }
"#;

/// Renders a report as a self-contained HTML document.
pub fn render_report_html(report: &PitchReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str(&format!(
        "    <title>PitchAI Report - {}</title>\n",
        report.title
    ));
    html.push_str(&format!("    <style>{STYLE}    </style>\n"));
    html.push_str("</head>\n<body>\n");

    html.push_str("    <div class=\"header\">\n");
    html.push_str("        <h1>PitchAI Analysis Report</h1>\n");
    html.push_str(&format!("        <h2>{}</h2>\n", report.title));
    html.push_str(&format!(
        "        <div class=\"score\">Overall Score: {}/10</div>\n",
        report.overall_score
    ));
    html.push_str(&format!(
        "        <p>Generated on {}</p>\n",
        report.created_at.format("%Y-%m-%d")
    ));
    html.push_str("    </div>\n");

    if let Some(deck) = &report.deck_analysis {
        render_deck_section(&mut html, deck);
    }

    if let Some(video) = &report.video_analysis {
        render_video_section(&mut html, video);
    }

    if let Some(qa) = &report.investor_qa {
        render_qa_section(&mut html, qa);
    }

    html.push_str("    <div class=\"section\">\n");
    html.push_str(
        "        <p><em>This report was generated by PitchAI - AI-powered pitch analysis platform</em></p>\n",
    );
    html.push_str("    </div>\n</body>\n</html>\n");

    html
}

fn render_deck_section(html: &mut String, deck: &DeckAnalysis) {
    html.push_str("    <div class=\"section\">\n");
    html.push_str("        <h2>Pitch Deck Analysis</h2>\n");

    for (label, category) in [
        ("Clarity", &deck.clarity),
        ("Storytelling", &deck.storytelling),
        ("Flow", &deck.flow),
    ] {
        html.push_str("        <div class=\"feedback\">\n");
        html.push_str(&format!(
            "            <h3>{label} ({}/10)</h3>\n",
            category.score
        ));
        html.push_str(&format!("            <p>{}</p>\n", category.feedback));
        html.push_str("        </div>\n");
    }

    render_lists(
        html,
        &deck.key_strengths,
        &deck.areas_for_improvement,
        &deck.actionable_recommendations,
    );
    html.push_str("    </div>\n");
}

fn render_video_section(html: &mut String, video: &VideoAnalysis) {
    html.push_str("    <div class=\"section\">\n");
    html.push_str("        <h2>Video Delivery Analysis</h2>\n");

    html.push_str("        <div class=\"feedback\">\n");
    html.push_str(&format!(
        "            <h3>Speech Pace ({}/10)</h3>\n",
        video.speech_pace.score
    ));
    html.push_str(&format!(
        "            <p>Words per minute: {}</p>\n",
        video.speech_pace.words_per_minute
    ));
    html.push_str(&format!(
        "            <p>{}</p>\n",
        video.speech_pace.feedback
    ));
    html.push_str("        </div>\n");

    html.push_str("        <div class=\"feedback\">\n");
    html.push_str("            <h3>Filler Words</h3>\n");
    html.push_str(&format!(
        "            <p>Count: {} ({}%)</p>\n",
        video.filler_words.count, video.filler_words.percentage
    ));
    html.push_str(&format!(
        "            <p>{}</p>\n",
        video.filler_words.feedback
    ));
    html.push_str("        </div>\n");

    for (label, category) in [("Confidence", &video.confidence), ("Tone", &video.tone)] {
        html.push_str("        <div class=\"feedback\">\n");
        html.push_str(&format!(
            "            <h3>{label} ({}/10)</h3>\n",
            category.score
        ));
        html.push_str(&format!("            <p>{}</p>\n", category.feedback));
        html.push_str("        </div>\n");
    }

    render_lists(
        html,
        &video.key_strengths,
        &video.areas_for_improvement,
        &video.actionable_recommendations,
    );
    html.push_str("    </div>\n");
}

fn render_lists(
    html: &mut String,
    strengths: &[String],
    improvements: &[String],
    recommendations: &[String],
) {
    html.push_str("        <h3>Key Strengths</h3>\n        <ul>\n");
    for item in strengths {
        html.push_str(&format!("            <li>{item}</li>\n"));
    }
    html.push_str("        </ul>\n");

    html.push_str("        <h3>Areas for Improvement</h3>\n        <ul>\n");
    for item in improvements {
        html.push_str(&format!("            <li>{item}</li>\n"));
    }
    html.push_str("        </ul>\n");

    html.push_str("        <div class=\"recommendations\">\n");
    html.push_str("            <h3>Actionable Recommendations</h3>\n            <ul>\n");
    for item in recommendations {
        html.push_str(&format!("                <li>{item}</li>\n"));
    }
    html.push_str("            </ul>\n        </div>\n");
}

fn render_qa_section(html: &mut String, qa: &InvestorQa) {
    html.push_str("    <div class=\"section\">\n");
    html.push_str("        <h2>Investor Q&amp;A Simulation</h2>\n");
    html.push_str(
        "        <p>Practice these common investor questions to improve your pitch readiness:</p>\n",
    );

    for (index, item) in qa.questions.iter().take(MAX_RENDERED_QUESTIONS).enumerate() {
        html.push_str("        <div class=\"qa-item\">\n");
        html.push_str(&format!(
            "            <div class=\"question\">Q{}: {}</div>\n",
            index + 1,
            item.question
        ));
        html.push_str(&format!(
            "            <div class=\"answer\"><strong>Suggested Answer:</strong> {}</div>\n",
            item.suggested_answer
        ));
        html.push_str(&format!(
            "            <div><strong>Answer Quality Score:</strong> {}/10</div>\n",
            item.answer_quality
        ));
        html.push_str("            <div><strong>Tips:</strong></div>\n            <ul>\n");
        for tip in &item.tips {
            html.push_str(&format!("                <li>{tip}</li>\n"));
        }
        html.push_str("            </ul>\n        </div>\n");
    }

    html.push_str("    </div>\n");
}
