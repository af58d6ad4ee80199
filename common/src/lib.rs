//! Shared types for the collection dashboard.
//!
//! Both the wasm frontend and the actix backend depend on this crate, so the
//! JSON payloads exchanged between them are described exactly once.

pub mod config;
pub mod fetch;
pub mod model;
pub mod ui;
