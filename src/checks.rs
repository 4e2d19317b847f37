//! The bundled check catalog.
//!
//! Every check here is a thin call site of the chain-step contract
//! ([`Arg::check`]): evaluate a predicate, hand back the handle on
//! success, classify and halt on failure. No check carries state of its
//! own, and adding a new one never touches the core.

use std::any::type_name;
use std::fmt;
use std::ops::RangeBounds;

use crate::arg::Arg;
use crate::compat::{self, Compatible, Inspect};
use crate::fault::{display_name, Fault, FaultKind};

// ============================================================================
// PRESENCE CHECKS
// ============================================================================

impl<T> Arg<Option<T>> {
    /// Require the option to hold a value, unwrapping it for later steps.
    ///
    /// Asserts the argument itself rather than deriving a new value, so
    /// the handle's `modified` flag is carried over untouched.
    pub fn some(self) -> Result<Arg<T>, Fault> {
        match self.value {
            Some(inner) => Ok(Arg {
                value: inner,
                name: self.name,
                modified: self.modified,
                secret: self.secret,
            }),
            None => Err(crate::fault::classify(
                self.name,
                None,
                self.modified,
                FaultKind::Missing,
                None,
            )),
        }
    }
}

impl<T: Inspect + fmt::Debug> Arg<T> {
    /// Require a non-absent value.
    pub fn required(self) -> Result<Self, Fault> {
        if self.has_value() {
            Ok(self)
        } else {
            Err(self.reject(FaultKind::Missing))
        }
    }
}

// ============================================================================
// RANGE CHECKS
// ============================================================================

impl<T: PartialOrd + fmt::Debug> Arg<T> {
    /// Require `value >= min`.
    pub fn at_least(self, min: T) -> Result<Self, Fault> {
        self.check(FaultKind::OutOfRange, |v| *v >= min)
    }

    /// Require `value <= max`.
    pub fn at_most(self, max: T) -> Result<Self, Fault> {
        self.check(FaultKind::OutOfRange, |v| *v <= max)
    }

    /// Require the value to fall within `range`.
    pub fn in_range(self, range: impl RangeBounds<T>) -> Result<Self, Fault> {
        self.check(FaultKind::OutOfRange, |v| range.contains(v))
    }
}

// ============================================================================
// STRING SHAPE CHECKS
// ============================================================================

impl<T: AsRef<str> + fmt::Debug> Arg<T> {
    /// Require a non-empty string.
    pub fn not_empty(self) -> Result<Self, Fault> {
        self.check(FaultKind::Shape, |v| !v.as_ref().is_empty())
    }

    /// Require a string with non-whitespace content.
    pub fn trimmed_not_empty(self) -> Result<Self, Fault> {
        self.check(FaultKind::Shape, |v| !v.as_ref().trim().is_empty())
    }

    /// Require at least `len` bytes.
    pub fn min_len(self, len: usize) -> Result<Self, Fault> {
        self.check(FaultKind::Shape, |v| v.as_ref().len() >= len)
    }

    /// Require at most `len` bytes.
    pub fn max_len(self, len: usize) -> Result<Self, Fault> {
        self.check(FaultKind::Shape, |v| v.as_ref().len() <= len)
    }
}

// ============================================================================
// TYPE-COMPATIBILITY CHECKS
// ============================================================================

impl<T: Inspect + fmt::Debug> Arg<T> {
    /// Require the value to be treatable as target type `U`.
    ///
    /// Consults the process-wide compatibility cache; the first query for
    /// `U` compiles its predicate, every later one reuses it.
    pub fn compatible_with<U: Compatible + ?Sized>(self) -> Result<Self, Fault> {
        let message = format!(
            "{} cannot be treated as {}",
            display_name(self.name()),
            type_name::<U>()
        );
        self.check_with(FaultKind::Type, |v| compat::is_compatible::<U, T>(v), message)
    }

    /// Require the value *not* to be treatable as target type `U`.
    pub fn not_compatible_with<U: Compatible + ?Sized>(self) -> Result<Self, Fault> {
        let message = format!(
            "{} must not be treatable as {}",
            display_name(self.name()),
            type_name::<U>()
        );
        self.check_with(FaultKind::Type, |v| !compat::is_compatible::<U, T>(v), message)
    }
}

// ============================================================================
// CUSTOM-PREDICATE CHECKS
// ============================================================================

impl<T: fmt::Debug> Arg<T> {
    /// Require an arbitrary caller-supplied condition (generic kind).
    pub fn satisfies(self, predicate: impl FnOnce(&T) -> bool) -> Result<Self, Fault> {
        self.check(FaultKind::Violation, predicate)
    }

    /// [`Arg::satisfies`] with a caller-supplied message.
    pub fn satisfies_with(
        self,
        predicate: impl FnOnce(&T) -> bool,
        message: impl Into<String>,
    ) -> Result<Self, Fault> {
        self.check_with(FaultKind::Violation, predicate, message)
    }
}
