//! Utility functions for code generation and request handling.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - Long URL validation
//! - [`client_ip`] - Client address extraction from HTTP requests
//! - [`db_error`] - Database error classification

pub mod client_ip;
pub mod code_generator;
pub mod db_error;
pub mod url_validator;
