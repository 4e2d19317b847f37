// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Failure classification for violated preconditions.
//!
//! Every violated check produces exactly one [`Fault`], built here and
//! nowhere else. The classifier is a pure function: the same inputs always
//! produce the same kind and message.
//!
//! # Kind selection
//!
//! Each check declares a default [`FaultKind`]. Kinds that imply the
//! identity of the *original* argument (`Missing`, `OutOfRange`) are
//! downgraded to the generic `Violation` once the handle has been
//! transformed, because the thing that failed is then a derivative, not
//! the argument itself:
//!
//! | Hint        | `modified = false` | `modified = true` |
//! |-------------|--------------------|-------------------|
//! | `Missing`   | `Missing`          | `Violation`       |
//! | `OutOfRange`| `OutOfRange`       | `Violation`       |
//! | `Shape`     | `Shape`            | `Shape`           |
//! | `Type`      | `Type`             | `Type`            |
//! | `Violation` | `Violation`        | `Violation`       |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::contracts;

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultKind {
    /// A value is absent where presence was required.
    Missing,
    /// An ordered value fails a bound check.
    OutOfRange,
    /// A structural check (length, emptiness, pattern) failed.
    Shape,
    /// A type-compatibility check failed.
    Type,
    /// Generic catch-all, also the downgrade target for `Missing` and
    /// `OutOfRange` on transformed handles.
    Violation,
}

impl FaultKind {
    /// The kind actually reported for this hint on a handle with the
    /// given `modified` state.
    #[inline]
    pub fn observed(self, modified: bool) -> FaultKind {
        match (self, modified) {
            (FaultKind::Missing | FaultKind::OutOfRange, true) => FaultKind::Violation,
            (kind, _) => kind,
        }
    }
}

/// A classified precondition failure.
///
/// Carries the failure kind, the offending argument's name, and a
/// human-readable message. Fully built before being returned - a `Fault`
/// is never observed half-constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct Fault {
    /// Failure category after the downgrade rule has been applied.
    pub kind: FaultKind,
    /// Name of the offending argument (may be empty).
    pub name: String,
    /// Human-readable description.
    pub message: String,
}

/// Build a classified failure from a violated-condition context.
///
/// `rendered` is the textual form of the offending value, or `None` when
/// the handle is secret or the value is absent. A caller-supplied
/// `custom` message wins verbatim over the kind-specific template.
pub fn classify(
    name: &str,
    rendered: Option<&str>,
    modified: bool,
    hint: FaultKind,
    custom: Option<String>,
) -> Fault {
    let kind = hint.observed(modified);
    contracts::check_kind_observed(hint, modified, kind);

    let message = custom.unwrap_or_else(|| default_message(kind, name, rendered));
    Fault {
        kind,
        name: name.to_string(),
        message,
    }
}

/// Name as rendered in messages: empty names fall back to "argument".
pub(crate) fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "argument"
    } else {
        name
    }
}

fn default_message(kind: FaultKind, name: &str, rendered: Option<&str>) -> String {
    let subject = display_name(name);
    let mut message = match kind {
        FaultKind::Missing => format!("{} must have a value", subject),
        FaultKind::OutOfRange => format!("{} is out of the permitted range", subject),
        FaultKind::Shape => format!("{} has an invalid shape", subject),
        FaultKind::Type => format!("{} is not compatible with the required type", subject),
        FaultKind::Violation => format!("{} does not satisfy a required condition", subject),
    };
    if let Some(value) = rendered {
        message.push_str(&format!(" (value: {})", value));
    }
    message
}
