//! # Gradebook Config
//!
//! Configuration types for the Gradebook API, loaded from environment
//! variables:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: bind address and port
//!
//! # Example
//!
//! ```ignore
//! use gradebook_config::{CorsConfig, ServerConfig};
//!
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use server::ServerConfig;
