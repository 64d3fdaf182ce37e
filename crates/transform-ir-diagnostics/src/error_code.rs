use std::fmt;

/// A stable identifier of a kind of diagnostic: `E` (error) or `W` (warning) followed by four
/// digits, e.g. `E0001`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorCode(&'static str);
impl ErrorCode {
    /// Panics if `code` is not a valid error code. In a const context this fails compilation.
    pub const fn new(code: &'static str) -> Self {
        let bytes = code.as_bytes();
        assert!(bytes.len() == 5, "Error codes are 5 characters long.");
        assert!(bytes[0] == b'E' || bytes[0] == b'W', "Error codes start with `E` or `W`.");
        let mut i = 1;
        while i < bytes.len() {
            assert!(bytes[i].is_ascii_digit(), "Error codes end with 4 decimal digits.");
            i += 1;
        }
        Self(code)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}
impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Constructs an [`ErrorCode`], checking it at compile time.
///
/// ```
/// # use transform_ir_diagnostics::{ErrorCode, error_code};
/// let code: ErrorCode = error_code!(E0004);
/// assert_eq!(code.to_string(), "E0004");
/// ```
#[macro_export]
macro_rules! error_code {
    ($code:ident) => {
        const { $crate::ErrorCode::new(stringify!($code)) }
    };
}
