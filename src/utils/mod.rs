//! Shared utilities
//!
//! Arrow value access and logging helpers.

pub mod arrow;
pub mod logging;
