//! AWS-oriented adapters and handlers for the Account Factory pipeline.
//!
//! This crate owns runtime integration details (Lambda handlers, SDK-backed
//! providers, credential chaining, logging setup). Discovery, filtering, and
//! event contracts live in `aft_common_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
