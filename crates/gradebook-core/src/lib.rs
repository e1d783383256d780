//! # Gradebook Core
//!
//! Pure computation primitives for the Gradebook API. Everything in this
//! crate is synchronous and side-effect free so it can be unit tested
//! without a database or a running server:
//!
//! - [`grading`]: the ten-point grade scale and percentage evaluation
//! - [`ranking`]: competition ranking with tie-sharing
//! - [`stats`]: small mean/variance helpers used by the analytics builder

pub mod grading;
pub mod ranking;
pub mod stats;

// Re-export commonly used items at crate root
pub use grading::{Grade, Marksheet, PASS_MARK_PERCENT, evaluate, round2};
pub use ranking::competition_ranks;
pub use stats::{mean, population_std_dev, population_variance};
