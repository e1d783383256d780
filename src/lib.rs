//! # Gradebook API
//!
//! A REST API built with Rust, Axum, and PostgreSQL that implements an
//! examination results and analytics engine for schools: bulk marks entry,
//! automatic grading and class ranking, consolidated report cards, class
//! analytics, and a publish workflow with class-wide announcements.
//!
//! ## Overview
//!
//! Gradebook covers the full result lifecycle:
//!
//! - **Bulk entry**: marks for a whole class, one exam and subject per call,
//!   with replace-on-resubmit semantics
//! - **Grading**: ten-point grade scale with grade points and pass/fail,
//!   derived once at entry and never accepted from input
//! - **Ranking**: competition ranking within each (class, year, exam,
//!   subject) group, kept current through every mutation
//! - **Report cards**: weighted per-subject cumulatives, trends, class rank,
//!   and co-scholastic terms
//! - **Analytics**: class summaries, subject heatmaps, at-risk detection,
//!   and a recognition board
//! - **Publishing**: idempotent draft-to-published flips plus a class-wide
//!   notification
//!
//! ## Architecture
//!
//! The codebase follows a modular architecture inspired by NestJS:
//!
//! ```text
//! src/
//! ├── modules/          # Feature modules
//! │   ├── results/     # Results, report cards, analytics, publishing
//! │   ├── exam_configs/# Exam weightage configuration
//! │   └── coscholastic/# Co-scholastic assessments
//! ├── store/           # Persistence traits + Postgres and in-memory stores
//! └── utils/           # Shared utilities (errors, per-key locks)
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers (routes)
//! - `service.rs`: Business logic
//! - `model.rs`: Data models, DTOs
//! - `router.rs`: Axum router configuration
//!
//! Services talk to persistence through the traits in [`store`], so the
//! engine's behaviour is the same against PostgreSQL and against the
//! in-memory store the integration tests run on.

pub mod docs;
pub mod logging;
pub mod modules;
pub mod router;
pub mod state;
pub mod store;
pub mod utils;

// Re-export workspace crates
pub use gradebook_config;
pub use gradebook_core;
pub use gradebook_db;
pub use gradebook_models;
