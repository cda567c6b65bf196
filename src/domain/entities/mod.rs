//! Core domain entities.
//!
//! - [`Link`] - A shortened URL mapping
//! - [`Click`] - A recorded redirect
//!
//! Persisted records and their creation inputs are separate structs:
//! `NewLink` and `NewClick` carry everything except the store-assigned id.

pub mod click;
pub mod link;

pub use click::{Click, NewClick};
pub use link::{Link, MAX_SHORT_CODE_LEN, NewLink};
