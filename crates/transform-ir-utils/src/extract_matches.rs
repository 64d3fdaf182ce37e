/// Macro to try to evaluate an expression as a pattern and extract its fields.
/// # Examples:
/// ```
/// use transform_ir_utils::try_extract_matches;
///
/// #[derive(Debug)]
/// enum Def {
///     Result(usize),
///     Argument(usize),
/// }
/// let def = Def::Result(3);
/// assert_eq!(try_extract_matches!(def, Def::Result), Some(3));
/// assert_eq!(try_extract_matches!(Def::Argument(0), Def::Result), None);
/// ```
#[macro_export]
macro_rules! try_extract_matches {
    ($e:expr, $variant:path) => {
        if let $variant(x) = $e { Some(x) } else { None }
    };
}

/// Macro to verify an expression matches a pattern and extract its fields.
/// # Examples:
/// ```
/// use transform_ir_utils::extract_matches;
///
/// #[derive(Debug)]
/// enum Def {
///     Result(usize),
///     Argument(usize),
/// }
/// let index = extract_matches!(Def::Result(3), Def::Result);
/// assert_eq!(index, 3);
///
/// // Would panic with 'Variant extract failed: `Argument(0)` is not of variant `Def::Result`:
/// // expected a result'
/// // let _ = extract_matches!(Def::Argument(0), Def::Result, "expected a result");
/// ```
#[macro_export]
macro_rules! extract_matches {
    ($e:expr, $variant:path) => {
        match $e {
            $variant(x) => x,
            ref e => {
                panic!("Variant extract failed: `{:?}` is not of variant `{}`", e, stringify!($variant))
            }
        }
    };
    ( $e:expr , $variant:path , $($arg:tt)* ) => {
        match $e {
            $variant(x) => x,
            ref e => panic!("Variant extract failed: `{:?}` is not of variant `{}`: {}",
                e, stringify!($variant), format_args!($($arg)*))
        }
    };
}
