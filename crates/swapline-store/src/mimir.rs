//! Runtime parameter resolution
//!
//! A tunable set in the parameter store overrides the compiled constant, but
//! only when it is present and non-negative.

use swapline_core::{ConstantName, ConstantValues};

use crate::Keeper;

/// Resolve `name` against the parameter store, falling back to `constants`.
///
/// Read failures are logged and treated as unset.
pub fn resolve_int64(keeper: &dyn Keeper, constants: &ConstantValues, name: ConstantName) -> i64 {
    resolve_mimir(keeper, name.as_str()).unwrap_or_else(|| constants.get_int64_value(name))
}

/// Parameter store value for `key` when set and non-negative
pub fn resolve_mimir(keeper: &dyn Keeper, key: &str) -> Option<i64> {
    match keeper.get_mimir(key) {
        Ok(Some(value)) if value >= 0 => Some(value),
        Ok(_) => None,
        Err(e) => {
            tracing::error!(key, error = %e, "Failed to read mimir value");
            None
        }
    }
}
