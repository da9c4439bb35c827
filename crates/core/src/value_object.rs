//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values.
/// `Money` and a ledger transaction are value objects; a client or an account
/// is an entity and keeps its identity while its state changes.
///
/// ```ignore
/// let a = Money::units(100);
/// let b = "100.00".parse::<Money>()?;
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
