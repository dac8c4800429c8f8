//! Core types and utilities shared across fht crates.
//!
//! Provides:
//! - Centralized error types via thiserror
//! - Configuration management with TOML support
//! - tracing subscriber initialization

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, BenchConfig, ElementType, KernelConfig};
pub use error::{FhtError, Result};
