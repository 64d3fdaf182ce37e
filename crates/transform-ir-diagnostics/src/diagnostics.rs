use std::fmt;
use std::hash::Hash;

use itertools::Itertools;
use smol_str::SmolStr;

use crate::error_code::ErrorCode;

#[cfg(test)]
#[path = "diagnostics_test.rs"]
mod test;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}
impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// A problem found in a script, rendered with the help of a context object.
pub trait DiagnosticEntry: Clone + fmt::Debug + Eq + Hash {
    /// The context resolving the entry's ids into text and locations.
    type DbType: ?Sized;

    fn format(&self, db: &Self::DbType) -> String;
    fn location(&self, db: &Self::DbType) -> Option<DiagnosticLocation>;
    fn notes(&self, _db: &Self::DbType) -> Vec<DiagnosticNote> {
        vec![]
    }
    fn severity(&self) -> Severity {
        Severity::Error
    }
    fn error_code(&self) -> Option<ErrorCode> {
        None
    }
}

/// A position in a script file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiagnosticLocation {
    pub file_name: SmolStr,
    /// 1-based.
    pub line: u32,
    /// 1-based.
    pub col: u32,
}
impl DiagnosticLocation {
    pub fn new(file_name: impl Into<SmolStr>, line: u32, col: u32) -> Self {
        Self { file_name: file_name.into(), line, col }
    }
}
impl fmt::Display for DiagnosticLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_name, self.line, self.col)
    }
}

/// Extra information attached to a diagnostic, optionally pointing somewhere else in the script.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DiagnosticNote {
    pub text: String,
    pub location: Option<DiagnosticLocation>,
}
impl DiagnosticNote {
    pub fn text_only(text: String) -> Self {
        Self { text, location: None }
    }

    pub fn with_location(text: String, location: DiagnosticLocation) -> Self {
        Self { text, location: Some(location) }
    }
}
impl fmt::Display for DiagnosticNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}:\n  --> {location}", self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// Proof that an error diagnostic was reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DiagnosticAdded;

/// A value, or the marker that producing it failed with a reported diagnostic.
pub type Maybe<T> = Result<T, DiagnosticAdded>;

/// Accumulates diagnostic entries in report order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DiagnosticsBuilder<TEntry: DiagnosticEntry> {
    entries: Vec<TEntry>,
    error_count: usize,
}
impl<TEntry: DiagnosticEntry> Default for DiagnosticsBuilder<TEntry> {
    fn default() -> Self {
        Self { entries: vec![], error_count: 0 }
    }
}
impl<TEntry: DiagnosticEntry> DiagnosticsBuilder<TEntry> {
    pub fn add(&mut self, entry: TEntry) -> DiagnosticAdded {
        if entry.severity() == Severity::Error {
            self.error_count += 1;
        }
        self.entries.push(entry);
        DiagnosticAdded
    }

    /// Appends all the entries of `diagnostics` after the ones already added.
    pub fn extend(&mut self, diagnostics: Diagnostics<TEntry>) {
        self.error_count += diagnostics.error_count;
        self.entries.extend(diagnostics.entries);
    }

    pub fn build(self) -> Diagnostics<TEntry> {
        Diagnostics { entries: self.entries, error_count: self.error_count }
    }
}

/// A diagnostic rendered to text, ready to be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattedDiagnosticEntry {
    severity: Severity,
    error_code: Option<ErrorCode>,
    message: String,
}
impl FormattedDiagnosticEntry {
    /// Renders `entry`: the message, its location and then each note on its own line.
    pub fn new<TEntry: DiagnosticEntry>(entry: &TEntry, db: &TEntry::DbType) -> Self {
        let mut message = entry.format(db);
        if let Some(location) = entry.location(db) {
            message.push_str(&format!("\n --> {location}"));
        }
        for note in entry.notes(db) {
            message.push_str(&format!("\nnote: {note}"));
        }
        message.push_str("\n\n");
        Self { severity: entry.severity(), error_code: entry.error_code(), message }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
impl fmt::Display for FormattedDiagnosticEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.error_code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// The diagnostics reported by a computation, in report order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostics<TEntry: DiagnosticEntry> {
    entries: Vec<TEntry>,
    error_count: usize,
}
impl<TEntry: DiagnosticEntry> Default for Diagnostics<TEntry> {
    fn default() -> Self {
        DiagnosticsBuilder::default().build()
    }
}
impl<TEntry: DiagnosticEntry> Diagnostics<TEntry> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TEntry] {
        &self.entries
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Fails if any of the entries is an error.
    pub fn check_error_free(&self) -> Maybe<()> {
        if self.error_count == 0 { Ok(()) } else { Err(DiagnosticAdded) }
    }

    pub fn format_with_severity(&self, db: &TEntry::DbType) -> Vec<FormattedDiagnosticEntry> {
        self.entries.iter().map(|entry| FormattedDiagnosticEntry::new(entry, db)).collect()
    }

    /// Renders all the entries, each followed by an empty line.
    pub fn format(&self, db: &TEntry::DbType) -> String {
        self.format_with_severity(db).iter().join("")
    }
}
