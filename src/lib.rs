//! # linktrack
//!
//! A URL shortener with asynchronous click tracking, built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, repository traits, the click
//!   event channel and its worker pool
//! - **Application Layer** ([`application`]) - Link creation, lookup and statistics
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite repositories and migrations
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Click Tracking
//!
//! Every redirect hands a [`domain::click_event::ClickEvent`] to a bounded
//! channel through the [`domain::click_dispatcher::ClickDispatcher`]. A fixed
//! pool of workers ([`domain::click_worker::ClickWorkerPool`]) drains the
//! channel and stores each event as a click. Delivery is at-most-once.
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://linktrack.db"
//!
//! # Apply the schema and create a link
//! cargo run --bin admin -- migrate
//! cargo run --bin admin -- create --url="https://www.rust-lang.org"
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod telemetry;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkService, LinkStats};
    pub use crate::domain::click_dispatcher::{ClickDispatcher, DispatchError, EnqueuePolicy};
    pub use crate::domain::click_event::ClickEvent;
    pub use crate::domain::click_worker::ClickWorkerPool;
    pub use crate::domain::entities::{Click, Link, NewClick, NewLink};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
