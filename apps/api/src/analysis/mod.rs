//! Analysis — the relay between extracted CV text and the upstream LLM,
//! plus the render endpoint that exposes the formatter.

pub mod handlers;
pub mod prompts;
