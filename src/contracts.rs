//! Runtime contracts over the core invariants.
//!
//! Debug-mode assertions that verify the properties the rest of the crate
//! is built on. These contracts:
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Provide **early failure detection** during development
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function               | Invariant                           |
//! |---------------------------------|-------------------------------------|
//! | `check_flag_monotonic`          | `modified` never reverts to false   |
//! | `check_kind_observed`           | the downgrade table is exact        |
//! | `check_members_include_target`  | a compiled predicate admits its own |
//! |                                 | target type                         |

use std::any::TypeId;
use std::collections::HashSet;

use crate::fault::FaultKind;

// ============================================================================
// HANDLE CONTRACTS
// ============================================================================

/// Check that a transform never clears the `modified` flag.
///
/// # Panics (debug builds only)
/// Panics if a handle went from modified back to unmodified.
#[inline]
pub fn check_flag_monotonic(before: bool, after: bool) {
    debug_assert!(
        after || !before,
        "Contract violation: modified flag reverted from true to false"
    );
}

// ============================================================================
// CLASSIFIER CONTRACTS
// ============================================================================

/// Check that kind selection matches the downgrade table: `Missing` and
/// `OutOfRange` become `Violation` on modified handles, everything else
/// passes through.
///
/// # Panics (debug builds only)
/// Panics if the observed kind disagrees with the table.
#[inline]
pub fn check_kind_observed(hint: FaultKind, modified: bool, observed: FaultKind) {
    let expected = match (hint, modified) {
        (FaultKind::Missing | FaultKind::OutOfRange, true) => FaultKind::Violation,
        (kind, _) => kind,
    };
    debug_assert_eq!(
        observed, expected,
        "Contract violation: hint {:?} with modified={} observed as {:?} (expected {:?})",
        hint, modified, observed, expected
    );
}

// ============================================================================
// COMPATIBILITY-CACHE CONTRACTS
// ============================================================================

/// Check that a freshly compiled member closure contains the target's own
/// identity - an exact match must always be admitted.
///
/// # Panics (debug builds only)
/// Panics if the closure misses the target type.
#[inline]
pub fn check_members_include_target(target: TypeId, members: &HashSet<TypeId>) {
    debug_assert!(
        members.contains(&target),
        "Contract violation: compiled member set omits the target type itself"
    );
}
