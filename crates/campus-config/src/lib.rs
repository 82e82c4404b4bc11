//! # Campus Config
//!
//! Configuration types for the Campus API, loaded from environment variables.
//!
//! - [`jwt`]: token signing secret, lifetime, issuer and audience
//! - [`cors`]: allowed browser origins
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: listen address
//!
//! Every `from_env()` falls back to a development default when a variable is
//! missing or unparsable, so the binary boots with an empty environment.
//!
//! # Example
//!
//! ```ignore
//! use campus_config::{JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server = ServerConfig::from_env();
//! println!("listening on {}", server.addr());
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
