//! Exit codes for the rbundle CLI.
//!
//! # Exit Code Table
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Bundle written successfully |
//! | 1 | `INTERNAL` | General/internal failure (I/O while bundling) |
//! | 2 | `CLI_ARGS` | Research dir missing, invalid config or query pattern |

/// Exit codes matching the documented exit code table.
///
/// Use [`as_i32()`](Self::as_i32) to get the numeric value for
/// `std::process::exit()`.
///
/// # Example
///
/// ```rust
/// use rbundle_utils::exit_codes::ExitCode;
///
/// assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
/// assert_eq!(ExitCode::CLI_ARGS, ExitCode::from_i32(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - bundle created
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Internal error - general failure
    pub const INTERNAL: ExitCode = ExitCode(1);

    /// CLI arguments error - bad research dir, config, or pattern
    pub const CLI_ARGS: ExitCode = ExitCode(2);

    /// Get the numeric exit code value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Create an ExitCode from a raw i32 value.
    ///
    /// Prefer using the named constants when possible.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<i32> for ExitCode {
    fn from(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_constants() {
        assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
        assert_eq!(ExitCode::INTERNAL.as_i32(), 1);
        assert_eq!(ExitCode::CLI_ARGS.as_i32(), 2);
    }

    #[test]
    fn test_exit_code_conversions() {
        let code: ExitCode = 2.into();
        assert_eq!(code, ExitCode::CLI_ARGS);
        let raw: i32 = ExitCode::INTERNAL.into();
        assert_eq!(raw, 1);
    }
}
