//! Process exit status taxonomy.
//!
//! Every operation reports its outcome as an [`ExitStatus`]. Zero is success;
//! the nonzero codes below are stable so scripts can branch on them.

use std::fmt;
use std::process::ExitCode;

/// Integer outcome code of an operation or of the whole process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitStatus(i32);

impl ExitStatus {
    /// Completed successfully.
    pub const SUCCESS: Self = Self(0);
    /// Generic or fatal failure.
    pub const FAILURE: Self = Self(1);
    /// Unknown operation or bad command-line usage.
    pub const USAGE: Self = Self(2);
    /// Configuration could not be loaded or validated.
    pub const CONFIG: Self = Self(3);
    /// The target companion does not exist.
    pub const NOT_FOUND: Self = Self(4);
    /// The companion registry failed.
    pub const REGISTRY: Self = Self(5);
    /// The device link failed or disconnected.
    pub const DEVICE: Self = Self(6);

    /// Wrap a raw status code.
    #[inline]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// The raw status code.
    #[inline]
    pub const fn code(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Static label for log fields.
    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "success",
            1 => "failure",
            2 => "usage",
            3 => "config",
            4 => "not_found",
            5 => "registry",
            6 => "device",
            _ => "other",
        }
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.label())
    }
}

impl From<ExitStatus> for ExitCode {
    /// Process exit codes are a byte; out-of-range codes collapse to FAILURE.
    fn from(status: ExitStatus) -> Self {
        match u8::try_from(status.0) {
            Ok(code) => ExitCode::from(code),
            Err(_) => ExitCode::from(ExitStatus::FAILURE.0 as u8),
        }
    }
}
