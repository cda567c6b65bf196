//! Domain layer containing business entities and the click pipeline.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click tracking event model
//! - [`click_dispatcher`] - Producer side of the click channel
//! - [`click_worker`] - Consumer side: the click worker pool
//!
//! # Click Processing Flow
//!
//! 1. HTTP handler resolves a short code
//! 2. [`click_event::ClickEvent`] is enqueued via [`click_dispatcher::ClickDispatcher`]
//! 3. One worker of [`click_worker::ClickWorkerPool`] dequeues it
//! 4. Click data is persisted via [`repositories::ClickRepository`]

pub mod click_dispatcher;
pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
