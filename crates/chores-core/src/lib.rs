//! Core types and trait definitions for the chores tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The storage backend and the API layer both depend on it.

pub mod log;
pub mod member;
pub mod store;
pub mod task;
