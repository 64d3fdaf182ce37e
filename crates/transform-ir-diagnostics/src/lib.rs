//! Diagnostics reported while checking transform scripts, with their locations in the script the
//! IR was built from.

pub use diagnostics::{
    DiagnosticAdded, DiagnosticEntry, DiagnosticLocation, DiagnosticNote, Diagnostics,
    DiagnosticsBuilder, FormattedDiagnosticEntry, Maybe, Severity,
};
pub use error_code::ErrorCode;

mod diagnostics;
mod error_code;
