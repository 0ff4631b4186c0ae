// Typed repositories, one per entity. Analyses and Q&A sets are immutable
// after insert; reports mutate only through `mark_shared`. Nested analysis
// payloads are stored as a JSONB `data` column beside the queryable keys.

pub mod analyses;
pub mod pitches;
pub mod qa;
pub mod reports;
