//! Transform IR utilities.

use std::fmt;

pub mod extract_matches;
#[cfg(feature = "env_logger")]
pub mod logging;
pub mod ordered_hash_map;

#[cfg(test)]
#[path = "lib_test.rs"]
mod test;

/// Writes the given values to the formatter, separated by `", "`.
pub fn write_comma_separated<Iter: IntoIterator<Item = V>, V: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    values: Iter,
) -> fmt::Result {
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

/// Returns `Some(())` if `condition` holds, for early returns with `?`:
/// `require(condition).ok_or(error)?;`
#[must_use = "The result must be checked with `?` to have an effect."]
pub fn require(condition: bool) -> Option<()> {
    condition.then_some(())
}
