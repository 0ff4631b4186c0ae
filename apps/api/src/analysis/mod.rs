// Analysis core: LLM prose parsing, deterministic transcript metrics, and
// the three artifact assemblers (deck, video, investor Q&A).
// All LLM calls go through llm_client — no direct API calls here.

pub mod assembler;
pub mod filler;
pub mod handlers;
pub mod parser;
pub mod prompts;

/// Rounds to one decimal place. Used for every aggregate score.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
