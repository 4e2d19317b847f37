//! Test fixtures shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides a small declared-widening hierarchy so compatibility tests
//! don't each invent their own.

#![doc(hidden)]

use std::any::{Any, TypeId};

use crate::compat::{Compatible, Inspect, Presence, TypeRelation};

/// Marker trait standing in for a stream interface.
///
/// `dyn Stream` is the widening target; the concrete stream types below
/// declare themselves narrower than it.
pub trait Stream: Any {}

/// A concrete stream over raw bytes.
#[derive(Debug, Default)]
pub struct ByteStream;

/// A concrete stream over text.
#[derive(Debug, Default)]
pub struct TextStream;

/// A buffered refinement of [`ByteStream`], two widening hops from
/// `dyn Stream`.
#[derive(Debug, Default)]
pub struct BufferedByteStream;

impl Stream for ByteStream {}
impl Stream for TextStream {}
impl Stream for BufferedByteStream {}

impl Compatible for dyn Stream {
    fn subtypes() -> Vec<TypeRelation> {
        vec![
            TypeRelation::of::<ByteStream>(),
            TypeRelation::of::<TextStream>(),
        ]
    }
}

impl Compatible for ByteStream {
    fn subtypes() -> Vec<TypeRelation> {
        vec![TypeRelation::of::<BufferedByteStream>()]
    }
}

impl Compatible for TextStream {}
impl Compatible for BufferedByteStream {}

impl Inspect for ByteStream {
    fn presence(&self) -> Presence {
        Presence::Concrete(TypeId::of::<ByteStream>())
    }
}

impl Inspect for TextStream {
    fn presence(&self) -> Presence {
        Presence::Concrete(TypeId::of::<TextStream>())
    }
}

impl Inspect for BufferedByteStream {
    fn presence(&self) -> Presence {
        Presence::Concrete(TypeId::of::<BufferedByteStream>())
    }
}
