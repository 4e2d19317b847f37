// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Process-wide memoized type-compatibility answers.
//!
//! Answers "can this value be treated as type `T`" for arbitrary runtime
//! types. Rust has no runtime subtype reflection, so the widening graph is
//! declared explicitly: a target type lists the narrower types whose
//! instances satisfy it ([`Compatible::subtypes`]), and `dyn Trait`
//! targets stand in for interfaces (`TypeId::of::<dyn Trait>()` is a
//! perfectly good identity for a `'static` trait object).
//!
//! The first query for a target compiles its transitive member closure
//! into a predicate; every later query reuses the installed predicate.
//!
//! # Semantics
//!
//! | Target              | Satisfied by                                  |
//! |---------------------|-----------------------------------------------|
//! | value type `T`      | a present value of exactly `T`                |
//! | widening target     | exact matches plus declared narrower types    |
//! | `Option<T>`         | an absent value, or anything satisfying `T`   |
//!
//! # Thread-safety contract
//!
//! One compiled predicate per target per process, installed exactly once,
//! never evicted. Readers of populated entries share a read lock and never
//! block each other; building a new entry happens outside the lock, so a
//! losing concurrent builder discards its copy. Closure computation is
//! pure, so both copies are content-identical and the answer is
//! deterministic regardless of which thread wins.

use std::any::{type_name, Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::contracts;

// =============================================================================
// CANDIDATE SIDE: runtime identity of a value under inspection
// =============================================================================

/// Runtime view of a candidate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// No value (the `Option::None` representation of absence).
    Absent,
    /// A value whose erased concrete type has this identity.
    Concrete(TypeId),
}

/// A value that can report its runtime identity to compatibility checks.
///
/// Implemented for primitives and `String` below, for `Option<T>` (absence
/// aware), and for `dyn Any` / `Box<dyn Any>` (erased concrete type). Wire
/// up your own types with [`impl_inspect!`](crate::impl_inspect).
pub trait Inspect {
    /// The value's presence and concrete type identity.
    fn presence(&self) -> Presence;
}

impl Inspect for dyn Any {
    fn presence(&self) -> Presence {
        Presence::Concrete(self.type_id())
    }
}

impl Inspect for Box<dyn Any> {
    fn presence(&self) -> Presence {
        Presence::Concrete((**self).type_id())
    }
}

impl<T: Any> Inspect for Option<T> {
    fn presence(&self) -> Presence {
        match self {
            Some(_) => Presence::Concrete(TypeId::of::<T>()),
            None => Presence::Absent,
        }
    }
}

/// Implement [`Inspect`] for concrete types that are their own runtime
/// identity.
#[macro_export]
macro_rules! impl_inspect {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::compat::Inspect for $ty {
            fn presence(&self) -> $crate::compat::Presence {
                $crate::compat::Presence::Concrete(::std::any::TypeId::of::<$ty>())
            }
        }
    )*};
}

impl_inspect!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
    &'static str,
);

// =============================================================================
// TARGET SIDE: declared widening graph
// =============================================================================

/// One node of the declared widening graph.
///
/// Carries a type identity plus a function expanding to the types declared
/// narrower than it, so closure computation can recurse without a type
/// level link between `TypeId`s.
#[derive(Clone, Copy)]
pub struct TypeRelation {
    id: TypeId,
    name: &'static str,
    expand: fn() -> Vec<TypeRelation>,
}

impl TypeRelation {
    /// The relation node for target type `T`.
    pub fn of<T: Compatible + ?Sized>() -> Self {
        TypeRelation {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            expand: T::subtypes,
        }
    }

    /// Runtime identity of this node's type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Diagnostic name of this node's type.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Debug for TypeRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRelation")
            .field("name", &self.name)
            .finish()
    }
}

/// A type that can stand as the target of a compatibility query.
///
/// The defaults give value-type semantics: only an exact, present match
/// satisfies the target. Widening targets override [`subtypes`] to list
/// the narrower types whose instances also satisfy them; the relation must
/// be declared before the target's first query and is fixed for the
/// process lifetime.
///
/// [`subtypes`]: Compatible::subtypes
pub trait Compatible: 'static {
    /// Types declared narrower than this one (their instances satisfy it).
    fn subtypes() -> Vec<TypeRelation> {
        Vec::new()
    }

    /// Whether an absent value satisfies this target.
    fn absent_ok() -> bool {
        false
    }
}

macro_rules! impl_value_target {
    ($($ty:ty),* $(,)?) => {$(
        impl Compatible for $ty {}
    )*};
}

impl_value_target!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
    &'static str,
);

impl<T: Compatible> Compatible for Option<T> {
    fn subtypes() -> Vec<TypeRelation> {
        vec![TypeRelation::of::<T>()]
    }

    fn absent_ok() -> bool {
        true
    }
}

// =============================================================================
// COMPILED PREDICATE AND PROCESS-WIDE CACHE
// =============================================================================

/// Compiled compatibility predicate for one target type.
#[derive(Debug)]
pub(crate) struct Compat {
    absent_ok: bool,
    members: HashSet<TypeId>,
}

impl Compat {
    /// Compile the predicate for target `T`: the transitive closure of its
    /// declared widening graph, own identity included.
    fn build<T: Compatible + ?Sized>() -> Compat {
        let mut members = HashSet::new();
        let mut pending = vec![TypeRelation::of::<T>()];
        while let Some(relation) = pending.pop() {
            if members.insert(relation.id) {
                pending.extend((relation.expand)());
            }
        }
        contracts::check_members_include_target(TypeId::of::<T>(), &members);
        Compat {
            absent_ok: T::absent_ok(),
            members,
        }
    }

    /// Does a value with the given runtime view satisfy the target?
    pub(crate) fn admits(&self, presence: Presence) -> bool {
        match presence {
            Presence::Absent => self.absent_ok,
            Presence::Concrete(id) => self.members.contains(&id),
        }
    }
}

type Cache = RwLock<HashMap<TypeId, Arc<Compat>>>;

static CACHE: OnceLock<Cache> = OnceLock::new();

fn cache() -> &'static Cache {
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// The installed predicate for target `T`, compiling it on first query.
pub(crate) fn compat_of<T: Compatible + ?Sized>() -> Arc<Compat> {
    let key = TypeId::of::<T>();
    if let Some(entry) = cache().read().get(&key) {
        return Arc::clone(entry);
    }

    // Built outside the lock: a concurrent builder may win the install
    // race, in which case this copy is discarded. Closure computation is
    // pure, so both copies are content-identical.
    let built = Arc::new(Compat::build::<T>());
    let mut map = cache().write();
    Arc::clone(map.entry(key).or_insert(built))
}

/// Would treating `value` as target type `T` succeed?
pub fn is_compatible<T, V>(value: &V) -> bool
where
    T: Compatible + ?Sized,
    V: Inspect + ?Sized,
{
    compat_of::<T>().admits(value.presence())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct CacheProbe;
    impl Compatible for CacheProbe {}

    #[test]
    fn value_type_requires_exact_present_match() {
        assert!(is_compatible::<i32, _>(&5i32));
        assert!(!is_compatible::<i32, _>(&"x"));
        assert!(!is_compatible::<i32, _>(&5u32));
    }

    #[test]
    fn option_target_accepts_absent_and_inner() {
        assert!(is_compatible::<Option<i32>, _>(&None::<i32>));
        assert!(is_compatible::<Option<i32>, _>(&Some(5i32)));
        assert!(is_compatible::<Option<i32>, _>(&5i32));
        assert!(!is_compatible::<Option<i32>, _>(&"x"));
    }

    #[test]
    fn plain_value_type_rejects_absent() {
        assert!(!is_compatible::<i32, _>(&None::<i32>));
        assert!(is_compatible::<i32, _>(&Some(5i32)));
    }

    #[test]
    fn one_predicate_is_installed_per_target() {
        let first = compat_of::<CacheProbe>();
        let second = compat_of::<CacheProbe>();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn concurrent_first_queries_converge_on_one_predicate() {
        use std::sync::Barrier;

        #[derive(Debug)]
        struct RaceProbe;
        impl Compatible for RaceProbe {}

        let barrier = Arc::new(Barrier::new(8));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    compat_of::<RaceProbe>()
                })
            })
            .collect();

        let predicates: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let installed = compat_of::<RaceProbe>();
        for predicate in &predicates {
            assert!(Arc::ptr_eq(predicate, &installed));
            assert!(predicate.admits(Presence::Concrete(TypeId::of::<RaceProbe>())));
        }
    }

    #[test]
    fn erased_candidates_report_their_concrete_type() {
        let boxed: Box<dyn Any> = Box::new(5i32);
        assert!(is_compatible::<i32, _>(&boxed));
        assert!(!is_compatible::<String, _>(&boxed));

        let slot: &dyn Any = &7u8;
        assert!(is_compatible::<u8, _>(slot));
    }

    #[test]
    fn relation_nodes_expose_identity_and_name() {
        let relation = TypeRelation::of::<i32>();
        assert_eq!(relation.id(), TypeId::of::<i32>());
        assert_eq!(relation.name(), "i32");
    }
}
