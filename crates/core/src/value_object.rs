//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity of their own and are never mutated in place:
/// "changing" one means building a new value (`with_*` methods) and replacing
/// the old one. Condition readings and tracked medicines are modelled this way
/// so that policy (status derivation) stays outside the data.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
