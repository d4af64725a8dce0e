//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Attendance marking commands
pub mod attendance;

/// General utility commands
pub mod general;

/// Schedule commands
pub mod schedule;

/// Threshold setting command
pub mod settings;

/// Statistics and risk report commands
pub mod stats;

/// Subject management commands
pub mod subject;

// Export commands
pub use attendance::*;
pub use general::*;
pub use schedule::*;
pub use settings::*;
pub use stats::*;
pub use subject::*;
