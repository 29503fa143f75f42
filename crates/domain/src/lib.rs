//! # Assembly Domain
//!
//! Domain types for the Assembly SDK.
//!
//! This crate contains:
//! - Token payload types and their client / internal-user refinements
//! - The `AssemblyError` taxonomy and Result alias
//! - SDK configuration structures
//! - Domain constants (default endpoints, header names, limits)
//!
//! ## Architecture
//! - Depends only on the foundation tier of `assembly-common`
//! - No I/O, no async runtime

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
