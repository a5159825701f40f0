//! Internal helper macros shared across the crate.

/// Early-return with an error when a condition does not hold.
///
/// Reads like `assert!`, but produces an `Err` instead of panicking.
///
/// # Arguments
///
/// * `$predicate` - A boolean expression that should evaluate to true
/// * `$error` - The error value to return if the predicate is false
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
