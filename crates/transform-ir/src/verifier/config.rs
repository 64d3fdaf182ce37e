/// A configuration struct that controls the behavior of the linear-use verifier.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct VerifierConfig {
    /// Whether operations with region branching are checked for a well-formed shape.
    pub structural_checks: bool,
}

impl VerifierConfig {
    /// Sets the `structural_checks` flag.
    pub fn with_structural_checks(mut self, structural_checks: bool) -> Self {
        self.structural_checks = structural_checks;
        self
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self { structural_checks: true }
    }
}
