//! Shared utilities for stockscope
//!
//! This crate provides common functionality used across the stockscope workspace:
//! tracing setup and a small lookup layer over the process environment and a
//! local `.env` file.

pub mod env;
pub mod logging;

pub use env::{EnvError, EnvSource};
pub use logging::{init_tracing, init_tracing_json};
