// All LLM prompt constants for the Analysis module.
// Responses are free-form prose parsed by `analysis::parser` — the parser
// tolerates format drift, so these prompts ask for labeled sections rather
// than strict JSON.

/// System prompt for deck and video analysis.
pub const ANALYSIS_SYSTEM: &str = "You are an experienced venture investor and pitch coach. \
    Label every category score as 'CATEGORY: N' on its own line, with the \
    explanation on the following line. Use bulleted lists for strengths, \
    improvements, and recommendations.";

/// Deck analysis prompt. Replace `{title}` and `{text}` before sending.
pub const DECK_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following startup pitch deck content for a presentation titled "{title}".

Pitch Content:
{text}

Please provide a comprehensive analysis with scores (1-10) and detailed feedback for:

1. CLARITY: How clear and understandable is the content?
2. STORYTELLING: How compelling is the narrative and flow?
3. FLOW: How well do the slides connect and build upon each other?

For each category, provide:
- A score from 1-10
- Specific feedback explaining the score
- Actionable recommendations for improvement

Also provide:
- 3-5 key strengths
- 3-5 areas for improvement
- 5-7 actionable recommendations

Format your response as a structured analysis that would be valuable for a founder preparing for investor meetings."#;

/// Video delivery analysis prompt.
/// Replace `{duration}`, `{wpm}`, and `{transcript}` before sending.
pub const VIDEO_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following pitch video transcription for speech delivery quality.

Video Duration: {duration} seconds
Transcription:
{transcript}

Please analyze and score (1-10) the following aspects:

1. SPEECH PACE: Evaluate the speaking pace ({wpm} WPM)
2. FILLER WORDS: Assess usage of "um", "uh", "like", "you know", etc.
3. CONFIDENCE: Assess confidence level based on word choice and structure
4. TONE: Evaluate enthusiasm, professionalism, and engagement

For each category, provide:
- A score from 1-10
- Specific feedback explaining the score
- Actionable recommendations for improvement

Also provide:
- 3-5 key strengths in delivery
- 3-5 areas for improvement
- 5-7 actionable recommendations for better delivery

Focus on practical advice for improving pitch delivery and investor engagement."#;

/// System prompt for investor Q&A generation.
pub const QA_SYSTEM: &str = "You are a venture investor preparing tough but fair questions for a \
    founder. Number each question block '1.', '2.', and so on. Inside each \
    block, put the question on the first line and prefix the suggested \
    response with 'Answer:'.";

/// Investor Q&A prompt. Replace `{content}` before sending.
pub const QA_PROMPT_TEMPLATE: &str = r#"Based on the following startup pitch content, generate 8-10 typical investor questions that would likely be asked during a pitch meeting or due diligence process.

Pitch Content:
{content}

For each question, provide:
1. The investor question
2. A suggested high-quality answer prefixed with "Answer:"

Focus on questions that investors commonly ask about:
- Business model and revenue
- Market size and competition
- Team and execution capability
- Financial projections and funding needs
- Growth strategy and scalability
- Risk factors and mitigation

Make the questions realistic and challenging, as they would be in a real investor meeting."#;
