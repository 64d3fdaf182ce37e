//! Transform IR.
//!
//! This crate holds the operation graph of transform scripts, the linear-use verifier that
//! checks each intermediate result is consumed at most once, and the scoped control-flow
//! construct together with the region branching queries built on it.
pub mod diagnostic;
pub mod flow;
pub mod fmt;
pub mod graph;
pub mod objects;
pub mod scope;
pub mod verifier;
pub mod walk;

pub use self::graph::{IrError, IrGraph};
pub use self::objects::*;
pub use self::verifier::{
    LinearUseVerifier, ValidationReport, VerifierConfig, Violation, ViolationKind, verify_sequence,
};

#[cfg(any(feature = "testing", test))]
pub mod test_utils;
