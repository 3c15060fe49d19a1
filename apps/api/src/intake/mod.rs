//! Intake — upload validation and server-side text extraction.

pub mod extract;
pub mod handlers;
pub mod validation;
