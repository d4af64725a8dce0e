//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for subject names, weekdays, colors and thresholds
pub mod autocomplete;
