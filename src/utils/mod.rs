//! Shared utilities:
//!
//! - [`errors`]: application error type and HTTP mapping
//! - [`keylock`]: per-result-key mutual exclusion

pub mod errors;
pub mod keylock;
