//! Debug formatting for objects that can only be printed with some context, e.g. arena ids that
//! need the owning graph to be resolved.

pub mod debug;

pub use self::debug::{DebugWith, DebugWithDb};
