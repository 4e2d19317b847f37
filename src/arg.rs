// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The argument handle threaded through a validation chain.
//!
//! An [`Arg`] carries the value being validated together with its name and
//! two flags: `modified` (the value is a derivative of the original
//! argument) and `secret` (failure messages must not render the value).
//! It is a small by-value struct with no indirection beyond what `T`
//! itself carries, so threading it through a chain allocates nothing.
//!
//! # Invariants
//!
//! - `name` and `secret` never change across a chain.
//! - `modified` is monotonic: false→true via [`Arg::map`] or
//!   [`Arg::with_value`], never back. Those two are the *only* ways the
//!   flag becomes true - a step that merely checks returns the handle
//!   untouched.
//!
//! The flag drives failure-kind selection: a `Missing` failure on an
//! unmodified handle blames the argument itself, while the same failure
//! after a transform reports the generic `Violation` kind instead (see
//! [`crate::fault`]).

use std::fmt;

use crate::compat::{Inspect, Presence};
use crate::contracts;
use crate::fault::{classify, Fault, FaultKind};

/// Value/name/state carrier for one validation chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arg<T> {
    pub(crate) value: T,
    pub(crate) name: &'static str,
    pub(crate) modified: bool,
    pub(crate) secret: bool,
}

impl<T> Arg<T> {
    /// Begin a chain for `value` under `name`.
    #[inline]
    pub fn new(value: T, name: &'static str) -> Self {
        Arg {
            value,
            name,
            modified: false,
            secret: false,
        }
    }

    /// Like [`Arg::new`], but failure messages never render the value.
    #[inline]
    pub fn secret(value: T, name: &'static str) -> Self {
        Arg {
            value,
            name,
            modified: false,
            secret: true,
        }
    }

    /// The value under validation.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The argument's name (may be empty).
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Has the value been replaced by a derivative since chain start?
    #[inline]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Is value rendering suppressed in failure messages?
    #[inline]
    pub fn is_secret(&self) -> bool {
        self.secret
    }

    /// End the chain, taking the value back out.
    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Replace the value with `f(value)`, carrying name and secrecy over.
    ///
    /// Marks the handle modified unconditionally, identity transforms
    /// included: later `Missing`/`OutOfRange` failures then classify as
    /// the generic `Violation`, since they no longer describe the original
    /// argument.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Arg<U> {
        let was_modified = self.modified;
        let next = Arg {
            value: f(self.value),
            name: self.name,
            modified: true,
            secret: self.secret,
        };
        contracts::check_flag_monotonic(was_modified, next.modified);
        next
    }

    /// Replace the value outright; same `modified` semantics as [`Arg::map`].
    pub fn with_value<U>(self, value: U) -> Arg<U> {
        self.map(|_| value)
    }
}

impl<T: Inspect> Arg<T> {
    /// True iff the value is non-absent.
    ///
    /// Plain values are always present; `Option::None` is the absent
    /// representation. No boxing or copying involved.
    #[inline]
    pub fn has_value(&self) -> bool {
        !matches!(self.value.presence(), Presence::Absent)
    }
}

impl<T: fmt::Debug> Arg<T> {
    /// The chain-step contract: evaluate `predicate` over the value.
    ///
    /// On success the same handle comes back unchanged; on failure a
    /// classified [`Fault`] is built from the handle's current name,
    /// value, and `modified` state, and the chain halts at the first `?`.
    pub fn check(self, kind: FaultKind, predicate: impl FnOnce(&T) -> bool) -> Result<Self, Fault> {
        if predicate(&self.value) {
            Ok(self)
        } else {
            Err(self.reject(kind))
        }
    }

    /// [`Arg::check`] with a caller-supplied message that wins verbatim.
    pub fn check_with(
        self,
        kind: FaultKind,
        predicate: impl FnOnce(&T) -> bool,
        message: impl Into<String>,
    ) -> Result<Self, Fault> {
        if predicate(&self.value) {
            Ok(self)
        } else {
            Err(self.reject_with(kind, message))
        }
    }

    /// Build the classified failure a violated step would produce.
    pub fn reject(&self, kind: FaultKind) -> Fault {
        classify(self.name, self.rendered().as_deref(), self.modified, kind, None)
    }

    /// [`Arg::reject`] with a caller-supplied message.
    pub fn reject_with(&self, kind: FaultKind, message: impl Into<String>) -> Fault {
        classify(
            self.name,
            self.rendered().as_deref(),
            self.modified,
            kind,
            Some(message.into()),
        )
    }

    fn rendered(&self) -> Option<String> {
        if self.secret {
            None
        } else {
            Some(format!("{:?}", self.value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_unmodified_and_public() {
        let arg = Arg::new(7, "n");
        assert_eq!(*arg.value(), 7);
        assert_eq!(arg.name(), "n");
        assert!(!arg.is_modified());
        assert!(!arg.is_secret());
    }

    #[test]
    fn map_carries_name_and_marks_modified() {
        let arg = Arg::new(" hi ", "s").map(str::trim);
        assert_eq!(*arg.value(), "hi");
        assert_eq!(arg.name(), "s");
        assert!(arg.is_modified());
    }

    #[test]
    fn identity_map_still_marks_modified() {
        let arg = Arg::new(7, "n").map(|v| v);
        assert_eq!(*arg.value(), 7);
        assert!(arg.is_modified());
    }

    #[test]
    fn with_value_changes_type_and_marks_modified() {
        let arg = Arg::new(7, "n").with_value("seven");
        assert_eq!(*arg.value(), "seven");
        assert_eq!(arg.name(), "n");
        assert!(arg.is_modified());
    }

    #[test]
    fn secret_survives_map() {
        let arg = Arg::secret("hunter2", "password").map(str::len);
        assert!(arg.is_secret());
    }

    #[test]
    fn has_value_tracks_option_state() {
        assert!(Arg::new(Some(1), "x").has_value());
        assert!(!Arg::new(None::<i32>, "x").has_value());
        assert!(Arg::new(5i32, "x").has_value());
    }

    #[test]
    fn passing_check_returns_handle_untouched() {
        let arg = Arg::new(7, "n").check(FaultKind::Violation, |v| *v == 7).unwrap();
        assert_eq!(*arg.value(), 7);
        assert!(!arg.is_modified());
    }

    #[test]
    fn failing_check_reports_name_and_value() {
        let fault = Arg::new(3, "n")
            .check(FaultKind::OutOfRange, |v| *v > 5)
            .unwrap_err();
        assert_eq!(fault.kind, FaultKind::OutOfRange);
        assert_eq!(fault.name, "n");
        assert!(fault.message.contains("(value: 3)"));
    }

    #[test]
    fn secret_handle_never_renders_its_value() {
        let fault = Arg::secret("hunter2", "password")
            .check(FaultKind::Shape, |v| v.len() > 10)
            .unwrap_err();
        assert!(!fault.message.contains("hunter2"));
    }

    #[test]
    fn check_with_message_wins_verbatim() {
        let fault = Arg::new(3, "n")
            .check_with(FaultKind::OutOfRange, |v| *v > 5, "n must exceed 5")
            .unwrap_err();
        assert_eq!(fault.message, "n must exceed 5");
    }

    #[test]
    fn missing_after_map_downgrades_to_violation() {
        let fault = Arg::new(String::from(" "), "s")
            .map(|s| s.trim().to_string())
            .check(FaultKind::Missing, |v| !v.is_empty())
            .unwrap_err();
        assert_eq!(fault.kind, FaultKind::Violation);
        assert_eq!(fault.name, "s");
    }
}
