//! Application layer services implementing business logic.
//!
//! Services consume the repository traits from [`crate::domain::repositories`]
//! and expose the operations used by HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, lookup and click statistics

pub mod services;
