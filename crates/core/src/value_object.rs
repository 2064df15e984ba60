//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** - two instances
/// with the same attributes are interchangeable. `Product` is the canonical
/// example here: a unit of "milk @ 350" in one producer's inventory matches
/// a request for "milk @ 350" regardless of which producer published it.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
