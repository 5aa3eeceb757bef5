//! One-line status messages for operation feedback.

use std::fmt;

use crate::worksheet::LayoutWarning;

/// Severity of an [`OperationStatus`], which picks its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Warning,
    Failure,
}

/// A status line such as `Success: Draft cleared`.
///
/// ```rust
/// use stitch_core::display::OperationStatus;
///
/// assert_eq!(OperationStatus::success("Draft cleared").to_string(), "Success: Draft cleared\n");
/// assert_eq!(OperationStatus::warning("No image").to_string(), "Warning: No image\n");
/// assert_eq!(OperationStatus::failure("Offline").to_string(), "Error: Offline\n");
/// ```
pub struct OperationStatus {
    pub message: String,
    pub level: StatusLevel,
}

impl OperationStatus {
    /// The operation completed.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: StatusLevel::Success,
        }
    }

    /// The operation completed, with something the user should know about.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: StatusLevel::Warning,
        }
    }

    /// The operation did not complete.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: StatusLevel::Failure,
        }
    }
}

impl From<&LayoutWarning> for OperationStatus {
    fn from(warning: &LayoutWarning) -> Self {
        OperationStatus::warning(warning.to_string())
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.level {
            StatusLevel::Success => "Success:",
            StatusLevel::Warning => "Warning:",
            StatusLevel::Failure => "Error:",
        };
        writeln!(f, "{prefix} {}", self.message)
    }
}
