// Report assembly: combines stored analyses and a generated Q&A set into a
// shareable pitch report, and renders it to a self-contained HTML document.

pub mod assembler;
pub mod handlers;
pub mod render;
