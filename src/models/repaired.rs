//! Outcome of a repair step.

use serde::Serialize;

/// A value that was either accepted as given or substituted by a repair.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repaired<T> {
    /// `false` when `value` is a substitute for malformed input.
    pub original_was_valid: bool,
    pub value: T,
}

impl<T> Repaired<T> {
    pub fn original(value: T) -> Self {
        Repaired {
            original_was_valid: true,
            value,
        }
    }

    pub fn substituted(value: T) -> Self {
        Repaired {
            original_was_valid: false,
            value,
        }
    }

    pub fn was_repaired(&self) -> bool {
        !self.original_was_valid
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Repaired<U> {
        Repaired {
            original_was_valid: self.original_was_valid,
            value: f(self.value),
        }
    }
}
