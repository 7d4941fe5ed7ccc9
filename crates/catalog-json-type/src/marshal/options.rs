//! Marshaler options.

use serde::Deserialize;

/// Options for the marshaler.
///
/// Deserializable so that callers can embed it in their own configuration
/// files; missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarshalOptions {
    /// Reject wire keys the descriptor does not declare instead of dropping them.
    pub deny_unknown_keys: bool,
    /// Read a wire `null` on a non-`any` field as an absent field.
    /// When off, such a `null` is a type mismatch.
    pub null_as_absent: bool,
}

impl Default for MarshalOptions {
    fn default() -> Self {
        Self {
            deny_unknown_keys: false,
            null_as_absent: true,
        }
    }
}

impl MarshalOptions {
    /// Options that reject anything not declared by the descriptors.
    pub fn strict() -> Self {
        Self {
            deny_unknown_keys: true,
            null_as_absent: false,
        }
    }
}
