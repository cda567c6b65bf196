//! Repository trait definitions for the domain layer.
//!
//! The traits describe the narrow storage contract the service layer and the
//! click workers depend on. Implementations live in
//! `crate::infrastructure::persistence`; mocks are generated by `mockall`
//! for unit tests.
//!
//! - [`LinkRepository`] - Short link creation and lookup
//! - [`ClickRepository`] - Click recording and counting
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod click_repository;
pub mod link_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
