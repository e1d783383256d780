//! Result data models and DTOs.
//!
//! This module re-exports result models from the `gradebook-models` crate
//! for backward compatibility and provides any controller-specific types.

// Re-export all result models from the shared crate
pub use gradebook_models::analytics::*;
pub use gradebook_models::report_card::*;
pub use gradebook_models::results::*;
