//! Exam configuration models and DTOs, re-exported from the shared crate.

pub use gradebook_models::exams::*;
