//! # Campus Core
//!
//! Core types, errors, and utilities for the Campus API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Lenient page/limit parsing and pagination metadata
//! - [`password`]: Password hashing and verification
//! - [`response`]: The uniform `{ success, message, data, meta }` envelope
//!
//! # Example
//!
//! ```ignore
//! use campus_core::{AppError, ApiResponse, PageRequest};
//!
//! let page = PageRequest::parse(Some("2"), Some("10"));
//! assert_eq!(page.skip(), 10);
//!
//! let error = AppError::not_found(anyhow::anyhow!("Class not found"));
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod response;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PageRequest, PaginationMeta};
pub use password::{hash_password, verify_dummy_password, verify_password};
pub use response::{ApiResponse, ListResponse};
