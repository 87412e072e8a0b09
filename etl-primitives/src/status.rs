//! Status codes returned by configuration operations.
//!
//! A status is a signed integer: zero is success, positive values are
//! warnings, negative values are errors. Existing codes are never renumbered;
//! new warning or error kinds take the next free value on their side of zero.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Coarse classification of a [`StatusCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// The operation completed without remarks.
    Success,
    /// The operation completed but something worth reporting happened.
    Warning,
    /// The operation failed.
    Error,
}

/// Signed status code returned by registration and configuration calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(i32);

impl StatusCode {
    /// Operation succeeded.
    pub const SUCCESS: Self = Self(0);
    /// The source path was already registered.
    pub const ALREADY_REGISTERED: Self = Self(1);
    /// Directory traversal stopped at the depth bound. Only reported when the
    /// traversal policy opts in; otherwise the skip returns [`Self::SUCCESS`].
    pub const DEPTH_EXCEEDED: Self = Self(2);
    /// The source path does not exist or could not be inspected.
    pub const PATH_NOT_FOUND: Self = Self(-1);
    /// Configuration was applied before any source was registered.
    pub const NOT_CONFIGURED: Self = Self(-2);

    /// Wraps a raw integer code.
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Returns the raw integer code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Classifies the code by its sign.
    #[must_use]
    pub const fn kind(self) -> StatusKind {
        if self.0 == 0 {
            StatusKind::Success
        } else if self.0 > 0 {
            StatusKind::Warning
        } else {
            StatusKind::Error
        }
    }

    /// Returns `true` for the success code.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` for any warning code.
    #[must_use]
    pub const fn is_warning(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` for any error code.
    #[must_use]
    pub const fn is_error(self) -> bool {
        self.0 < 0
    }

    /// Returns `true` when the operation did not fail (success or warning).
    #[must_use]
    pub const fn is_ok(self) -> bool {
        self.0 >= 0
    }

    /// Short description of the known codes.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self.0 {
            0 => "success",
            1 => "already registered",
            2 => "maximum depth exceeded",
            -1 => "path not found",
            -2 => "not configured",
            c if c > 0 => "unknown warning",
            _ => "unknown error",
        }
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.description())
    }
}

impl From<StatusCode> for i32 {
    fn from(value: StatusCode) -> Self {
        value.0
    }
}

impl From<i32> for StatusCode {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_sign() {
        assert_eq!(StatusCode::SUCCESS.kind(), StatusKind::Success);
        assert_eq!(StatusCode::ALREADY_REGISTERED.kind(), StatusKind::Warning);
        assert_eq!(StatusCode::DEPTH_EXCEEDED.kind(), StatusKind::Warning);
        assert_eq!(StatusCode::PATH_NOT_FOUND.kind(), StatusKind::Error);
        assert_eq!(StatusCode::new(-7).kind(), StatusKind::Error);
    }

    #[test]
    fn ok_covers_success_and_warnings() {
        assert!(StatusCode::SUCCESS.is_ok());
        assert!(StatusCode::ALREADY_REGISTERED.is_ok());
        assert!(!StatusCode::PATH_NOT_FOUND.is_ok());
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(i32::from(StatusCode::SUCCESS), 0);
        assert_eq!(i32::from(StatusCode::ALREADY_REGISTERED), 1);
        assert_eq!(i32::from(StatusCode::DEPTH_EXCEEDED), 2);
        assert_eq!(i32::from(StatusCode::PATH_NOT_FOUND), -1);
        assert_eq!(i32::from(StatusCode::NOT_CONFIGURED), -2);
    }

    #[test]
    fn display_includes_description() {
        assert_eq!(StatusCode::PATH_NOT_FOUND.to_string(), "-1 (path not found)");
        assert_eq!(StatusCode::new(9).to_string(), "9 (unknown warning)");
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&StatusCode::PATH_NOT_FOUND).unwrap();
        assert_eq!(json, "-1");
    }
}
