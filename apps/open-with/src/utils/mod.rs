//! Shared utilities for open-with
//!
//! Path resolution and the small filesystem helpers used by the settings store.

pub mod fs;
pub mod paths;
